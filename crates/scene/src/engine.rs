//! The point-cloud interaction engine.
//!
//! Owns every piece of scene state and exposes the handful of entry points a
//! host needs: resize, pointer events, and one `tick` per display frame. All
//! state lives on the instance, so several engines can coexist and tests can
//! drive one without a drawing surface.

use foundation::math::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use runtime::{EventBus, EventKind, Frame, Metrics, Stat};
use tracing::{debug, warn};

use crate::annotation::{AnnotationBinder, OverlayPlacement};
use crate::cloud::PointCloud;
use crate::config::{ConfigError, EngineConfig};
use crate::content::{FactTable, node_label};
use crate::draw::DrawList;
use crate::input::{GestureOutcome, InputController, PointerTarget};
use crate::physics::RotationState;
use crate::picking::{PickHit, PickOptions, pick_point};
use crate::projection::{Projector, Viewport};
use crate::render::{FrameStats, render_cloud};
use crate::selection::Selection;

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    facts: FactTable,
    viewport: Viewport,
    cloud: PointCloud,
    rotation: RotationState,
    input: InputController,
    selection: Selection,
    annotation: AnnotationBinder,
    rng: SmallRng,
    frame: Frame,
    events: EventBus,
    metrics: Metrics,
    draw: DrawList,
    last_stats: FrameStats,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        facts: FactTable,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let cloud = PointCloud::seed(viewport, &config, &mut rng);
        let rotation = RotationState::new(&config);
        let mut engine = Self {
            config,
            facts,
            viewport,
            cloud,
            rotation,
            input: InputController::new(),
            selection: Selection::new(),
            annotation: AnnotationBinder::new(),
            rng,
            frame: Frame::first(),
            events: EventBus::new(),
            metrics: Metrics::new(),
            draw: DrawList::new(),
            last_stats: FrameStats::default(),
        };
        engine.emit_reseeded();
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.config.focal_length, self.viewport)
    }

    /// Header for the overlay, e.g. `Node_00A`.
    pub fn selected_label(&self) -> Option<String> {
        self.selection.index().map(node_label)
    }

    pub fn selected_fact(&self) -> Option<&str> {
        self.selection.fact()
    }

    pub fn overlay(&self) -> OverlayPlacement {
        self.annotation.placement()
    }

    pub fn drain_events(&mut self) -> Vec<runtime::Event> {
        self.events.drain()
    }

    /// Regenerates the whole point set for a new viewport.
    ///
    /// The selection follows the configured policy; an in-flight drag keeps
    /// going against the new points.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reseed();
    }

    /// Applies one live-tunable config value. Keys that shape the scene
    /// (point count, radius) reseed immediately. Unknown keys and non-finite
    /// values are reported as `config.rejected`.
    pub fn set_config_key(&mut self, key: &str, value: f64) -> bool {
        if !self.config.set_key(key, value) {
            warn!(key, value, "rejected config key");
            self.events.emit(
                self.frame,
                EventKind::ConfigRejected,
                format!("rejected `{key}` = {value}"),
            );
            return false;
        }
        if matches!(key, "point_count" | "radius_fraction") {
            self.reseed();
        }
        true
    }

    /// Replaces the content table; the current selection is rebound.
    pub fn set_facts(&mut self, facts: FactTable) {
        self.facts = facts;
        if let Some(index) = self.selection.index() {
            self.selection.select(index, &self.facts);
        }
    }

    /// Returns `true` if the engine took the gesture.
    pub fn pointer_down(&mut self, pos: Vec2, target: PointerTarget) -> bool {
        if !self.input.pointer_down(pos, target) {
            return false;
        }
        self.rotation.stop();
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(delta) = self.input.pointer_move(pos, self.config.click_threshold_px) {
            self.rotation
                .set_from_drag(delta.x, delta.y, self.config.drag_sensitivity);
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2) -> GestureOutcome {
        let outcome = self.input.pointer_up(pos, self.config.click_threshold_px);
        if let GestureOutcome::Click(at) = outcome {
            self.click(at);
        }
        outcome
    }

    pub fn pointer_cancel(&mut self) {
        self.input.cancel();
    }

    /// Hit-tests `at` against the points as last drawn and updates the selection.
    pub fn click(&mut self, at: Vec2) -> Option<PickHit> {
        let opts = PickOptions {
            hit_radius_px: self.config.hit_radius_px,
        };
        let hit = pick_point(self.cloud.points(), &self.projector(), at, opts);

        match hit {
            Some(h) => {
                self.selection.select(h.index, &self.facts);
                self.rotation
                    .apply_impulse(self.config.click_impulse_yaw, self.config.click_impulse_pitch);
                debug!(index = h.index, scale = h.scale, "point selected");
                self.events.emit(
                    self.frame,
                    EventKind::SelectionChanged,
                    format!("{} at {:.1}px", node_label(h.index), h.distance_px),
                );
            }
            None => {
                if self.selection.clear() {
                    debug!("selection cleared by empty click");
                    self.events
                        .emit(self.frame, EventKind::SelectionCleared, "empty space");
                }
            }
        }
        hit
    }

    /// Runs one animation frame: physics, rotation, render, overlay.
    pub fn tick(&mut self) -> &DrawList {
        self.rotation.step(self.input.is_dragging(), &self.config);
        self.cloud.rotate(self.rotation.yaw, self.rotation.pitch);

        let projector = self.projector();
        self.draw.reset();
        let stats = render_cloud(
            &self.cloud,
            &projector,
            self.selection.index(),
            &self.config,
            &mut self.rng,
            &mut self.draw,
        );

        let selected = self.selection.index().and_then(|i| self.cloud.get(i));
        self.annotation.update(selected, &projector, &self.config);

        self.metrics.record(Stat::Projected, stats.projected as u64);
        self.metrics.record(Stat::Culled, stats.culled as u64);
        self.metrics.record(Stat::Lines, stats.lines as u64);
        if stats.pulsed {
            self.metrics.record(Stat::Pulses, 1);
        }
        self.metrics.end_frame();
        self.last_stats = stats;
        self.frame = self.frame.next();

        &self.draw
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    fn reseed(&mut self) {
        self.cloud = PointCloud::seed(self.viewport, &self.config, &mut self.rng);
        self.cloud.rotate(self.rotation.yaw, self.rotation.pitch);
        if self
            .selection
            .on_reseed(self.config.selection_policy, self.cloud.len())
        {
            self.events
                .emit(self.frame, EventKind::SelectionCleared, "scene reseeded");
        }
        self.emit_reseeded();
    }

    fn emit_reseeded(&mut self) {
        debug!(
            points = self.cloud.len(),
            width = self.viewport.width,
            height = self.viewport.height,
            "scene reseeded"
        );
        self.events.emit(
            self.frame,
            EventKind::SceneReseeded,
            format!(
                "{} points, radius {:.1}",
                self.cloud.len(),
                self.cloud.radius()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::config::EngineConfig;
    use crate::content::FactTable;
    use crate::input::{GestureOutcome, PointerTarget};
    use crate::projection::Viewport;
    use crate::selection::SelectionPolicy;
    use foundation::math::Vec2;
    use runtime::EventKind;

    fn engine(config: EngineConfig) -> Engine {
        Engine::new(
            config,
            FactTable::new(["alpha", "beta", "gamma"]),
            Viewport::new(1000.0, 800.0),
            11,
        )
        .expect("valid config")
    }

    fn nearest_visible(e: &Engine) -> (usize, Vec2) {
        let proj = e.projector();
        e.cloud()
            .points()
            .iter()
            .filter_map(|p| proj.project(p.current).map(|pr| (p.index, pr)))
            .max_by(|a, b| a.1.scale.total_cmp(&b.1.scale))
            .map(|(i, pr)| (i, pr.position()))
            .expect("some point is visible")
    }

    #[test]
    fn rejects_invalid_config() {
        let bad = EngineConfig {
            friction: 0.0,
            ..EngineConfig::default()
        };
        assert!(Engine::new(bad, FactTable::default(), Viewport::default(), 0).is_err());
    }

    #[test]
    fn click_selects_and_binds_fact() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        let (index, pos) = nearest_visible(&e);

        assert!(e.pointer_down(pos, PointerTarget::Surface));
        let out = e.pointer_up(pos);
        assert_eq!(out, GestureOutcome::Click(pos));
        assert_eq!(e.selection().index(), Some(index));
        assert_eq!(e.selected_fact(), Some(["alpha", "beta", "gamma"][index % 3]));
        assert!(e.selected_label().is_some());

        let kinds: Vec<EventKind> = e.drain_events().into_iter().map(|ev| ev.kind).collect();
        assert_eq!(kinds, vec![EventKind::SceneReseeded, EventKind::SelectionChanged]);
    }

    #[test]
    fn click_impulse_follows_pointer_reset() {
        let cfg = EngineConfig::default();
        let mut e = engine(cfg.clone());
        e.tick();
        let (_, pos) = nearest_visible(&e);
        e.pointer_down(pos, PointerTarget::Surface);
        assert_eq!(e.rotation().velocity_yaw, 0.0);
        e.pointer_up(pos);
        assert_eq!(e.rotation().velocity_yaw, cfg.click_impulse_yaw);
        assert_eq!(e.rotation().velocity_pitch, cfg.click_impulse_pitch);
    }

    #[test]
    fn click_on_empty_space_clears() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        let (_, pos) = nearest_visible(&e);
        e.pointer_down(pos, PointerTarget::Surface);
        e.pointer_up(pos);
        assert!(!e.selection().is_empty());

        // Far corner is well outside the sphere's projection.
        e.pointer_down(Vec2::new(1.0, 1.0), PointerTarget::Surface);
        e.pointer_up(Vec2::new(1.0, 1.0));
        assert!(e.selection().is_empty());
        assert_eq!(e.selected_fact(), None);
    }

    #[test]
    fn drag_does_not_hit_test() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        let (_, pos) = nearest_visible(&e);
        e.pointer_down(pos, PointerTarget::Surface);
        e.pointer_move(Vec2::new(pos.x + 50.0, pos.y));
        assert!(e.rotation().velocity_yaw > 0.0);
        e.pointer_move(pos);
        assert_eq!(e.pointer_up(pos), GestureOutcome::Drag);
        assert!(e.selection().is_empty());
    }

    #[test]
    fn resize_resets_selection_by_default() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        let (_, pos) = nearest_visible(&e);
        e.pointer_down(pos, PointerTarget::Surface);
        e.pointer_up(pos);
        e.drain_events();

        e.resize(Viewport::new(600.0, 600.0));
        assert!(e.selection().is_empty());
        assert_eq!(e.cloud().radius(), 600.0 * 0.35);
        let kinds: Vec<EventKind> = e.drain_events().into_iter().map(|ev| ev.kind).collect();
        assert_eq!(kinds, vec![EventKind::SelectionCleared, EventKind::SceneReseeded]);
    }

    #[test]
    fn resize_mid_drag_keeps_dragging_without_hit_test() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        let (_, pos) = nearest_visible(&e);
        assert!(e.pointer_down(pos, PointerTarget::Surface));

        e.resize(Viewport::new(500.0, 400.0));
        assert!(e.input().is_dragging());
        let end = Vec2::new(pos.x + 40.0, pos.y);
        e.pointer_move(end);
        assert!(e.rotation().velocity_yaw > 0.0);
        assert_eq!(e.pointer_up(end), GestureOutcome::Drag);
        assert!(e.selection().is_empty());

        assert!(!e.tick().is_empty());
        assert_eq!(e.last_stats().projected + e.last_stats().culled, 300);
    }

    #[test]
    fn click_spanning_resize_hits_new_point_set() {
        let mut e = engine(EngineConfig::default());
        e.tick();
        // Centre of the viewport the click will land in.
        let at = Vec2::new(250.0, 200.0);
        e.pointer_down(at, PointerTarget::Surface);
        e.resize(Viewport::new(500.0, 400.0));
        assert!(matches!(e.pointer_up(at), GestureOutcome::Click(_)));

        let index = e.selection().index().expect("dense centre has a point");
        let point = e.cloud().get(index).expect("index is in the new set");
        let projected = e.projector().project(point.current).expect("visible");
        assert!(projected.position().distance(at) < e.config().hit_radius_px);
    }

    #[test]
    fn resize_can_preserve_selection() {
        let mut e = engine(EngineConfig {
            selection_policy: SelectionPolicy::Preserve,
            ..EngineConfig::default()
        });
        e.tick();
        let (index, pos) = nearest_visible(&e);
        e.pointer_down(pos, PointerTarget::Surface);
        e.pointer_up(pos);
        e.resize(Viewport::new(600.0, 600.0));
        assert_eq!(e.selection().index(), Some(index));
    }

    #[test]
    fn tick_records_metrics_and_advances_frame() {
        let mut e = engine(EngineConfig::default());
        for _ in 0..3 {
            e.tick();
        }
        assert_eq!(e.frame().index, 3);
        assert_eq!(e.metrics().frames(), 3);
        let stats = e.last_stats();
        assert_eq!(stats.projected + stats.culled, 300);
    }

    #[test]
    fn unknown_config_key_is_reported() {
        let mut e = engine(EngineConfig::default());
        e.drain_events();
        assert!(!e.set_config_key("gravity", 1.0));
        assert_eq!(e.drain_events()[0].kind, EventKind::ConfigRejected);
        assert!(e.set_config_key("point_count", 50.0));
        assert_eq!(e.cloud().len(), 50);
    }

    #[test]
    fn non_finite_config_value_is_rejected_and_config_kept() {
        let mut e = engine(EngineConfig::default());
        e.drain_events();
        assert!(!e.set_config_key("friction", f64::NAN));
        assert_eq!(e.config().friction, 0.95);
        let events = e.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::ConfigRejected);
        assert!(events[0].message.contains("friction"));
    }
}
