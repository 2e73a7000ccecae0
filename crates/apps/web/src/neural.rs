//! The interactive point-cloud background.

use std::cell::RefCell;
use std::rc::Rc;

use foundation::math::Vec2;
use scene::annotation::OverlayPlacement;
use scene::config::EngineConfig;
use scene::content::FactTable;
use scene::input::PointerTarget;
use scene::projection::Viewport;
use scene::Engine;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::canvas::{canvas_2d, fit_to_window, replay};
use crate::facts::DEFAULT_FACTS;
use crate::lifecycle::{AnimationLoop, Listener, Listeners};
use crate::{log, log_error, session_seed};

/// Presses on these never start a drag or a click.
pub(crate) const INTERACTIVE_SELECTOR: &str = "a, button, input, textarea, select";

struct Surface {
    engine: Engine,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    overlay: Option<HtmlElement>,
    shown_index: Option<usize>,
}

impl Surface {
    fn resize(&mut self) {
        let (w, h) = fit_to_window(&self.canvas);
        self.engine.resize(Viewport::new(w, h));
    }

    /// Client coordinates relative to the canvas.
    fn local(&self, event: &MouseEvent) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        canvas_local(
            Vec2::new(event.client_x() as f64, event.client_y() as f64),
            Vec2::new(rect.left(), rect.top()),
        )
    }

    fn frame(&mut self) {
        let vp = self.engine.viewport();
        let list = self.engine.tick();
        if let Err(err) = replay(&self.ctx, list, vp.width, vp.height) {
            log_error(&format!("neural background draw error: {err:?}"));
        }
        self.sync_overlay();
        for event in self.engine.drain_events() {
            log(&event.to_string());
        }
    }

    fn sync_overlay(&mut self) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        let placement = self.engine.overlay();
        let style = overlay.style();
        for (property, value) in overlay_style(&placement) {
            let _ = style.set_property(property, &value);
        }

        let index = self.engine.selection().index();
        if index == self.shown_index {
            return;
        }
        self.shown_index = index;
        // Text stays put while fading out after a clear.
        if index.is_some() {
            set_role_text(overlay, "label", self.engine.selected_label().as_deref());
            set_role_text(overlay, "fact", self.engine.selected_fact());
        }
    }
}

fn set_role_text(overlay: &HtmlElement, role: &str, text: Option<&str>) {
    if let Ok(Some(el)) = overlay.query_selector(&format!("[data-role=\"{role}\"]")) {
        el.set_text_content(text);
    }
}

pub(crate) fn canvas_local(client: Vec2, origin: Vec2) -> Vec2 {
    client - origin
}

/// Inline style for the overlay element. The panel never takes pointer
/// input, so clicks always reach the canvas beneath it.
pub(crate) fn overlay_style(placement: &OverlayPlacement) -> [(&'static str, String); 3] {
    [
        ("transform", placement.css_transform()),
        ("opacity", format!("{:.3}", placement.opacity.clamp(0.0, 1.0))),
        ("pointer-events", "none".to_string()),
    ]
}

fn pointer_target(event: &Event) -> PointerTarget {
    let interactive = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some();
    if interactive {
        PointerTarget::Interactive
    } else {
        PointerTarget::Surface
    }
}

/// Canvas-backed handle for the neural background.
///
/// Mounting never touches the window; `start` wires listeners and the frame
/// loop, `stop` releases them again.
#[wasm_bindgen]
pub struct NeuralBackground {
    surface: Option<Rc<RefCell<Surface>>>,
    animation: AnimationLoop,
    listeners: Listeners,
}

#[wasm_bindgen]
impl NeuralBackground {
    /// `overlay_id` may name a missing element; the overlay is then skipped.
    /// `config_json` overrides any subset of the engine defaults.
    pub fn mount(
        canvas_id: &str,
        overlay_id: Option<String>,
        config_json: Option<String>,
    ) -> Result<NeuralBackground, JsValue> {
        let config = parse_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let (canvas, ctx) = canvas_2d(&document, canvas_id)?;

        let Some(ctx) = ctx else {
            log("neural background: 2d context unavailable, staying idle");
            return Ok(Self::inert());
        };

        let overlay = overlay_id
            .as_deref()
            .and_then(|id| document.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let (w, h) = fit_to_window(&canvas);
        let engine = Engine::new(
            config,
            FactTable::new(DEFAULT_FACTS.iter().copied()),
            Viewport::new(w, h),
            session_seed(),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            surface: Some(Rc::new(RefCell::new(Surface {
                engine,
                canvas,
                ctx,
                overlay,
                shown_index: None,
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
                s.resize();
            }
        })?);

        let s = surface.clone();
        self.listeners.push(Listener::attach(target, "pointerdown", move |ev| {
            let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut s) = s.try_borrow_mut() {
                let pos = s.local(mouse);
                s.engine.pointer_down(pos, pointer_target(&ev));
            }
        })?);

        let s = surface.clone();
        self.listeners.push(Listener::attach(target, "pointermove", move |ev| {
            let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut s) = s.try_borrow_mut() {
                let pos = s.local(mouse);
                s.engine.pointer_move(pos);
            }
        })?);

        let s = surface.clone();
        self.listeners.push(Listener::attach(target, "pointerup", move |ev| {
            let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut s) = s.try_borrow_mut() {
                let pos = s.local(mouse);
                s.engine.pointer_up(pos);
            }
        })?);

        let s = surface.clone();
        self.listeners.push(Listener::attach(target, "pointercancel", move |_| {
            if let Ok(mut s) = s.try_borrow_mut() {
                s.engine.pointer_cancel();
            }
        })?);

        let s = surface;
        let started = self.animation.start(move || {
            if let Ok(mut s) = s.try_borrow_mut() {
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

    /// Live-tunes one engine value; returns `false` for unknown keys.
    pub fn set_config(&mut self, key: &str, value: f64) -> bool {
        self.surface
            .as_ref()
            .and_then(|s| s.try_borrow_mut().ok().map(|mut s| s.engine.set_config_key(key, value)))
            .unwrap_or(false)
    }

    /// Replaces the overlay content with a JSON array of strings.
    pub fn set_facts(&mut self, facts_json: &str) -> Result<(), JsValue> {
        let facts: Vec<String> =
            serde_json::from_str(facts_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(surface) = &self.surface {
            let mut s = surface
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("surface busy"))?;
            s.engine.set_facts(FactTable::new(facts));
            s.shown_index = None;
        }
        Ok(())
    }

    /// One-line render counter summary, for the console.
    pub fn metrics(&self) -> String {
        self.surface
            .as_ref()
            .and_then(|s| s.try_borrow().ok().map(|s| s.engine.metrics().summary()))
            .unwrap_or_default()
    }
}

impl NeuralBackground {
    fn inert() -> Self {
        Self {
            surface: None,
            animation: AnimationLoop::default(),
            listeners: Listeners::default(),
        }
    }
}

impl Drop for NeuralBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn parse_config(json: Option<&str>) -> Result<EngineConfig, String> {
    match json.map(str::trim) {
        None | Some("") => Ok(EngineConfig::default()),
        Some(text) => EngineConfig::from_json(text).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{canvas_local, overlay_style, parse_config};
    use foundation::math::Vec2;
    use scene::annotation::OverlayPlacement;

    #[test]
    fn config_json_is_optional() {
        assert_eq!(parse_config(None).unwrap().point_count, 300);
        assert_eq!(parse_config(Some("  ")).unwrap().point_count, 300);
        let cfg = parse_config(Some(r#"{"point_count": 120}"#)).unwrap();
        assert_eq!(cfg.point_count, 120);
        assert_eq!(cfg.friction, 0.95);
    }

    #[test]
    fn bad_config_json_is_reported() {
        assert!(parse_config(Some("{not json")).is_err());
        assert!(parse_config(Some(r#"{"friction": 2.0}"#)).is_err());
    }

    #[test]
    fn overlay_style_strings() {
        let p = OverlayPlacement {
            x: 12.5,
            y: 40.0,
            opacity: 0.2,
        };
        assert_eq!(
            overlay_style(&p),
            [
                ("transform", "translate3d(12.5px, 40.0px, 0)".to_string()),
                ("opacity", "0.200".to_string()),
                ("pointer-events", "none".to_string()),
            ]
        );
    }

    #[test]
    fn visible_overlay_still_passes_pointer_through() {
        let p = OverlayPlacement {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
        };
        assert!(p.is_visible());
        let style = overlay_style(&p);
        assert!(style.contains(&("pointer-events", "none".to_string())));
    }

    #[test]
    fn pointer_positions_are_canvas_local() {
        let p = canvas_local(Vec2::new(110.0, 60.0), Vec2::new(10.0, 20.0));
        assert_eq!((p.x, p.y), (100.0, 40.0));
    }
}
