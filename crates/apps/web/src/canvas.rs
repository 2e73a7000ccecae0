//! Replays engine draw lists onto a Canvas2D context.

use std::f64::consts::TAU;

use scene::draw::{DrawCmd, DrawList, Glow};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub(crate) fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), value);
}

pub(crate) fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

/// Resolves `canvas_id` and its 2D context.
///
/// A missing element is an error; a canvas whose context cannot be created
/// yields `Ok((canvas, None))` so the caller can stay inert.
pub(crate) fn canvas_2d(
    document: &Document,
    canvas_id: &str,
) -> Result<(HtmlCanvasElement, Option<CanvasRenderingContext2d>), JsValue> {
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing {canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = match canvas.get_context("2d") {
        Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
        _ => None,
    };
    Ok((canvas, ctx))
}

/// Sizes the backing store to the window and returns the new size.
pub(crate) fn fit_to_window(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (w, h) = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
            (width, height)
        })
        .unwrap_or((1280.0, 720.0));
    let (w, h) = (w.max(1.0), h.max(1.0));
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w, h)
}

fn set_glow(ctx: &CanvasRenderingContext2d, glow: Option<&Glow>) {
    match glow {
        Some(g) => {
            ctx.set_shadow_blur(g.blur);
            ctx.set_shadow_color(&g.color.css());
        }
        None => ctx.set_shadow_blur(0.0),
    }
}

pub(crate) fn replay(
    ctx: &CanvasRenderingContext2d,
    list: &DrawList,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    for cmd in list.iter() {
        match cmd {
            DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, width, height),
            DrawCmd::Fill { color } => {
                ctx_set_fill_style(ctx, &JsValue::from_str(&color.css()));
                ctx.fill_rect(0.0, 0.0, width, height);
            }
            DrawCmd::Line {
                from,
                to,
                width: line_width,
                color,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.set_line_width(*line_width);
                ctx_set_stroke_style(ctx, &color.css());
                ctx.stroke();
            }
            DrawCmd::Disc {
                center,
                radius,
                color,
                glow,
            } => {
                set_glow(ctx, glow.as_ref());
                ctx.begin_path();
                ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU)?;
                ctx_set_fill_style(ctx, &JsValue::from_str(&color.css()));
                ctx.fill();
                if glow.is_some() {
                    set_glow(ctx, None);
                }
            }
            DrawCmd::Ring {
                center,
                radius,
                width: line_width,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU)?;
                ctx.set_line_width(*line_width);
                ctx_set_stroke_style(ctx, &color.css());
                ctx.stroke();
            }
            DrawCmd::RadialGlow {
                center,
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => {
                let gradient = ctx.create_radial_gradient(
                    center.x,
                    center.y,
                    inner_radius.max(0.0),
                    center.x,
                    center.y,
                    outer_radius.max(0.0),
                )?;
                gradient.add_color_stop(0.0, &inner.css())?;
                gradient.add_color_stop(1.0, &outer.css())?;
                ctx_set_fill_style(ctx, gradient.as_ref());
                ctx.fill_rect(0.0, 0.0, width, height);
            }
        }
    }
    Ok(())
}
