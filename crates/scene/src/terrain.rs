//! Scrolling "digital terrain" backdrop.
//!
//! A grid of dots flown over at constant speed. Nothing is stored per dot:
//! every frame the grid is regenerated from the scroll offset, and the
//! height field is keyed on absolute row so the landscape stays put while
//! the rows wrap around.

use foundation::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::draw::{DrawCmd, DrawList, Rgba};
use crate::projection::{Viewport, project_around};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Rows of depth.
    pub rows: u32,
    /// Columns across, centred on the view axis.
    pub cols: u32,
    /// World distance between neighbouring dots.
    pub spacing: f64,
    /// Scroll distance per frame.
    pub speed: f64,
    /// Amplitude of the height field.
    pub peaks: f64,
    /// Vertical offset of the plane below the eye.
    pub lift: f64,
    pub focal_length: f64,
    /// Horizon height as a fraction of the viewport height.
    pub horizon_fraction: f64,
    pub dot_radius: f64,
    pub background: Rgba,
    pub color: Rgba,
    /// Alpha at the centre of the horizon glow.
    pub glow_alpha: f64,
    pub glow_radius: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 60,
            spacing: 40.0,
            speed: 1.5,
            peaks: 60.0,
            lift: 150.0,
            focal_length: 300.0,
            horizon_fraction: 0.5,
            dot_radius: 2.0,
            background: Rgba::new(2, 2, 5, 1.0),
            color: Rgba::new(168, 85, 247, 1.0),
            glow_alpha: 0.3,
            glow_radius: 400.0,
        }
    }
}

/// One projected grid dot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TerrainDot {
    pub position: Vec2,
    pub radius: f64,
    /// Distance fog, in `(0, 1]`.
    pub alpha: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TerrainGrid {
    config: TerrainConfig,
    scroll: f64,
}

impl TerrainGrid {
    /// Keeps the grid from vanishing under the camera plane.
    const NEAR_OFFSET: f64 = 10.0;

    pub fn new(config: TerrainConfig) -> Self {
        Self { config, scroll: 0.0 }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn advance(&mut self) {
        self.scroll += self.config.speed;
    }

    /// Dots for the current scroll offset, near rows first.
    pub fn dots(&self, viewport: Viewport) -> Vec<TerrainDot> {
        let c = &self.config;
        if c.spacing <= 0.0 {
            return Vec::new();
        }
        let horizon = Vec2::new(viewport.width * 0.5, viewport.height * c.horizon_fraction);
        let depth_extent = c.rows as f64 * c.spacing;
        let phase = self.scroll.rem_euclid(c.spacing);
        let half = c.cols as i64 / 2;

        let mut dots = Vec::with_capacity((c.rows * c.cols) as usize);
        for row in 0..c.rows {
            let z = row as f64 * c.spacing - phase + Self::NEAR_OFFSET;
            let alpha = 1.0 - z / depth_extent;
            if alpha <= 0.0 {
                continue;
            }
            let absolute_row = ((self.scroll + z) / c.spacing).floor();
            for col in -half..(c.cols as i64 - half) {
                let col = col as f64;
                let height = (col * 0.3).sin() * (absolute_row * 0.2).cos() * c.peaks + c.lift;
                let world = Vec3::new(col * c.spacing, height, z);
                let Some(p) = project_around(world, c.focal_length, horizon) else {
                    continue;
                };
                dots.push(TerrainDot {
                    position: p.position(),
                    radius: c.dot_radius * p.scale,
                    alpha,
                });
            }
        }
        dots
    }

    /// Background fill, dots, then the horizon glow.
    pub fn render(&self, viewport: Viewport, out: &mut DrawList) -> usize {
        let c = &self.config;
        out.push(DrawCmd::Fill {
            color: c.background,
        });
        let dots = self.dots(viewport);
        for d in &dots {
            out.push(DrawCmd::Disc {
                center: d.position,
                radius: d.radius,
                color: c.color.with_alpha(d.alpha),
                glow: None,
            });
        }
        out.push(DrawCmd::RadialGlow {
            center: Vec2::new(viewport.width * 0.5, viewport.height * c.horizon_fraction),
            inner_radius: 10.0,
            outer_radius: c.glow_radius,
            inner: c.color.with_alpha(c.glow_alpha),
            outer: c.color.with_alpha(0.0),
        });
        dots.len()
    }
}
