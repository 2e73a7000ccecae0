//! The scrolling terrain backdrop.

use std::cell::RefCell;
use std::rc::Rc;

use scene::draw::DrawList;
use scene::projection::Viewport;
use scene::terrain::{TerrainConfig, TerrainGrid};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::{canvas_2d, fit_to_window, replay};
use crate::lifecycle::{AnimationLoop, Listener, Listeners};
use crate::{log, log_error};

struct Surface {
    grid: TerrainGrid,
    viewport: Viewport,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    draw: DrawList,
}

impl Surface {
    fn frame(&mut self) {
        self.grid.advance();
        self.draw.reset();
        self.grid.render(self.viewport, &mut self.draw);
        if let Err(err) = replay(&self.ctx, &self.draw, self.viewport.width, self.viewport.height) {
            log_error(&format!("terrain draw error: {err:?}"));
        }
    }
}

#[wasm_bindgen]
pub struct TerrainBackground {
    surface: Option<Rc<RefCell<Surface>>>,
    animation: AnimationLoop,
    listeners: Listeners,
}

#[wasm_bindgen]
impl TerrainBackground {
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<TerrainBackground, JsValue> {
        let config = parse_terrain_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let (canvas, ctx) = canvas_2d(&document, canvas_id)?;
        let Some(ctx) = ctx else {
            log("terrain background: 2d context unavailable, staying idle");
            return Ok(Self {
                surface: None,
                animation: AnimationLoop::default(),
                listeners: Listeners::default(),
            });
        };

        let (w, h) = fit_to_window(&canvas);
        Ok(Self {
            surface: Some(Rc::new(RefCell::new(Surface {
                grid: TerrainGrid::new(config),
                viewport: Viewport::new(w, h),
                canvas,
                ctx,
                draw: DrawList::new(),
            }))),
            animation: AnimationLoop::default(),
            listeners: Listeners::default(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        let Some(surface) = self.surface.clone() else {
            return Ok(());
        };
        if self.animation.is_running() || !self.listeners.is_empty() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let target: &web_sys::EventTarget = window.as_ref();

        let s = surface.clone();
        self.listeners.push(Listener::attach(target, "resize", move |_| {
            if let Ok(mut s) = s.try_borrow_mut() {
                let (w, h) = fit_to_window(&s.canvas);
                s.viewport = Viewport::new(w, h);
            }
        })?);

        let started = self.animation.start(move || {
            if let Ok(mut s) = surface.try_borrow_mut() {
                s.frame();
            }
        });
        if let Err(err) = started {
            self.listeners.clear();
            return Err(err);
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.animation.stop();
        self.listeners.clear();
    }
}

impl Drop for TerrainBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn parse_terrain_config(json: Option<&str>) -> Result<TerrainConfig, String> {
    match json.map(str::trim) {
        None | Some("") => Ok(TerrainConfig::default()),
        Some(text) => serde_json::from_str(text).map_err(|e| e.to_string()),
    }
}
