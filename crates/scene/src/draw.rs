//! Backend-agnostic 2D draw commands.
//!
//! The engine never touches a canvas; it fills a [`DrawList`] that the host
//! replays onto whatever surface it owns. This keeps every frame testable.

use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0..=1
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(a: f64) -> Self {
        Self::new(255, 255, 255, a)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, alpha clamped to `[0, 1]`.
    pub fn css(&self) -> String {
        let a = self.a.clamp(0.0, 1.0);
        format!("rgba({},{},{},{a:.3})", self.r, self.g, self.b)
    }
}

/// Shadow blur applied to a single primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface to transparent.
    Clear,
    /// Fill the whole surface.
    Fill { color: Rgba },
    Line {
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Rgba,
    },
    Disc {
        center: Vec2,
        radius: f64,
        color: Rgba,
        glow: Option<Glow>,
    },
    Ring {
        center: Vec2,
        radius: f64,
        width: f64,
        color: Rgba,
    },
    /// Radial gradient painted over the whole surface.
    RadialGlow {
        center: Vec2,
        inner_radius: f64,
        outer_radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
}

/// Commands for one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the list but keeps its allocation.
    pub fn reset(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> + '_ {
        self.cmds.iter()
    }
}
