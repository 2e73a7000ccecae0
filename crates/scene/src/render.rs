//! Per-frame point-cloud rendering into a [`DrawList`].

use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;
use rand::Rng;

use crate::cloud::PointCloud;
use crate::config::EngineConfig;
use crate::draw::{DrawCmd, DrawList, Glow, Rgba};
use crate::projection::{Projected, Projector};

const ACTIVE_RADIUS_FACTOR: f64 = 1.8;
const ACTIVE_GLOW_PER_SCALE: f64 = 20.0;
const ACTIVE_RING_FACTOR: f64 = 2.5;
const ACTIVE_RING_ALPHA: f64 = 0.4;
const PULSE_RADIUS_FACTOR: f64 = 3.0;
const PULSE_ALPHA: f64 = 0.9;
const PULSE_GLOW: f64 = 10.0;

/// Counts for one rendered frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub projected: usize,
    pub culled: usize,
    pub lines: usize,
    pub pulsed: bool,
}

#[derive(Debug, Copy, Clone)]
struct Visible {
    index: usize,
    camera: Vec3,
    proj: Projected,
}

/// Projects, depth-sorts and draws the cloud (already rotated).
///
/// Paint order: connections, then points far to near, then an optional
/// synapse pulse. Only the selected point and the pulse carry a glow.
pub fn render_cloud<R: Rng + ?Sized>(
    cloud: &PointCloud,
    projector: &Projector,
    selected: Option<usize>,
    config: &EngineConfig,
    rng: &mut R,
    out: &mut DrawList,
) -> FrameStats {
    out.push(DrawCmd::Clear);

    let mut visible: Vec<Visible> = cloud
        .points()
        .iter()
        .filter_map(|p| {
            projector.project(p.current).map(|proj| Visible {
                index: p.index,
                camera: p.current,
                proj,
            })
        })
        .collect();
    let mut stats = FrameStats {
        projected: visible.len(),
        culled: cloud.len() - visible.len(),
        ..FrameStats::default()
    };

    // Painter's order: small scale (far) first.
    visible.sort_by(|a, b| {
        stable_total_cmp_f64(a.proj.scale, b.proj.scale).then_with(|| a.index.cmp(&b.index))
    });

    stats.lines = draw_connections(&visible, config, out);

    for v in &visible {
        draw_point(v, selected == Some(v.index), config, out);
    }

    if !visible.is_empty() && rng.random::<f64>() < config.pulse_probability {
        let target = &visible[rng.random_range(0..visible.len())];
        if target.proj.scale > config.pulse_min_scale {
            let scale = target.proj.scale;
            out.push(DrawCmd::Disc {
                center: target.proj.position(),
                radius: config.base_radius * scale * PULSE_RADIUS_FACTOR,
                color: Rgba::white(PULSE_ALPHA * scale),
                glow: Some(Glow {
                    blur: PULSE_GLOW,
                    color: Rgba::white(1.0),
                }),
            });
            stats.pulsed = true;
        }
    }

    stats
}

/// O(n²) pair scan; fine for a few hundred points.
fn draw_connections(visible: &[Visible], config: &EngineConfig, out: &mut DrawList) -> usize {
    let threshold = config.connection_distance;
    let threshold_sq = threshold * threshold;
    let mut lines = 0;

    for (i, a) in visible.iter().enumerate() {
        for b in &visible[i + 1..] {
            let dist_sq = a.camera.distance_squared(b.camera);
            if dist_sq >= threshold_sq {
                continue;
            }
            let closeness = 1.0 - dist_sq.sqrt() / threshold;
            if closeness <= 0.0 {
                continue;
            }
            let depth_fade = a.proj.scale.min(b.proj.scale);
            out.push(DrawCmd::Line {
                from: a.proj.position(),
                to: b.proj.position(),
                width: config.line_width,
                color: Rgba::white(closeness * depth_fade * config.line_weight),
            });
            lines += 1;
        }
    }

    lines
}

fn draw_point(v: &Visible, active: bool, config: &EngineConfig, out: &mut DrawList) {
    let scale = v.proj.scale;
    let center = v.proj.position();

    if !active {
        out.push(DrawCmd::Disc {
            center,
            radius: config.base_radius * scale,
            color: Rgba::white(scale.clamp(0.5, 1.0)),
            glow: None,
        });
        return;
    }

    let radius = config.base_radius * ACTIVE_RADIUS_FACTOR * scale;
    out.push(DrawCmd::Disc {
        center,
        radius,
        color: Rgba::white(1.0),
        glow: Some(Glow {
            blur: ACTIVE_GLOW_PER_SCALE * scale,
            color: Rgba::white(1.0),
        }),
    });
    out.push(DrawCmd::Ring {
        center,
        radius: radius * ACTIVE_RING_FACTOR,
        width: 1.0,
        color: Rgba::white(ACTIVE_RING_ALPHA * scale),
    });
}
