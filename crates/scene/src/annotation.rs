//! Keeps the floating info panel pinned to the selected point.

use crate::cloud::Point;
use crate::config::EngineConfig;
use crate::projection::Projector;

/// Where and how opaque the overlay should be this frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct OverlayPlacement {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

impl OverlayPlacement {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// CSS transform for an absolutely positioned element.
    pub fn css_transform(&self) -> String {
        format!("translate3d({:.1}px, {:.1}px, 0)", self.x, self.y)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationBinder {
    placement: OverlayPlacement,
}

impl AnnotationBinder {
    const SNAP: f64 = 1e-3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self) -> OverlayPlacement {
        self.placement
    }

    /// Re-projects `selected` and eases opacity toward its target.
    ///
    /// Target opacity is 0 with no selection or a failed projection, the dim
    /// value when the point is far (small scale), and 1 otherwise. The last
    /// known position is kept while fading out.
    pub fn update(
        &mut self,
        selected: Option<&Point>,
        projector: &Projector,
        config: &EngineConfig,
    ) -> OverlayPlacement {
        let projected = selected.and_then(|p| projector.project(p.current));
        let target = match projected {
            None => 0.0,
            Some(pr) => {
                self.placement.x = pr.x;
                self.placement.y = pr.y;
                if pr.scale < config.overlay_dim_scale {
                    config.overlay_dim_opacity
                } else {
                    1.0
                }
            }
        };

        let gap = target - self.placement.opacity;
        self.placement.opacity = if gap.abs() < Self::SNAP {
            target
        } else {
            self.placement.opacity + gap * config.overlay_fade_rate
        };
        self.placement
    }

    pub fn reset(&mut self) {
        self.placement = OverlayPlacement::default();
    }
}
