use crate::config::EngineConfig;

/// Global rotation and its angular velocity (radians, radians per frame).
///
/// Angles grow without bound and wrap implicitly through `sin`/`cos`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationState {
    pub yaw: f64,
    pub pitch: f64,
    pub velocity_yaw: f64,
    pub velocity_pitch: f64,
}

impl RotationState {
    /// At rest the scene already spins at the ambient speed.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            velocity_yaw: config.base_rotation_speed,
            velocity_pitch: 0.0,
        }
    }

    /// Advances one frame.
    ///
    /// While not dragging, velocities outside the ambient band decay by
    /// `friction`. Once both are inside the band, yaw eases toward the
    /// ambient speed and pitch eases toward zero, so an untouched scene
    /// settles into a steady idle spin rather than stopping.
    pub fn step(&mut self, dragging: bool, config: &EngineConfig) {
        if !dragging {
            let base = config.base_rotation_speed;
            let ambient = self.velocity_yaw.abs() < base && self.velocity_pitch.abs() < base;
            if ambient {
                self.velocity_yaw += (base - self.velocity_yaw) * config.idle_convergence;
                self.velocity_pitch -= self.velocity_pitch * config.idle_convergence;
            } else {
                self.velocity_yaw *= config.friction;
                self.velocity_pitch *= config.friction;
            }
        }

        self.yaw += self.velocity_yaw;
        self.pitch += self.velocity_pitch;
    }

    pub fn stop(&mut self) {
        self.velocity_yaw = 0.0;
        self.velocity_pitch = 0.0;
    }

    /// Drag input sets (not accumulates) the velocity from the last pointer delta.
    pub fn set_from_drag(&mut self, dx_px: f64, dy_px: f64, sensitivity: f64) {
        self.velocity_yaw = dx_px * sensitivity;
        self.velocity_pitch = dy_px * sensitivity;
    }

    pub fn apply_impulse(&mut self, yaw: f64, pitch: f64) {
        self.velocity_yaw += yaw;
        self.velocity_pitch += pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::RotationState;
    use crate::config::EngineConfig;

    #[test]
    fn idle_decay_settles_on_ambient_spin() {
        let cfg = EngineConfig::default();
        let mut rot = RotationState {
            velocity_yaw: 0.1,
            velocity_pitch: 0.1,
            ..RotationState::new(&cfg)
        };
        for _ in 0..5_000 {
            rot.step(false, &cfg);
        }
        assert!((rot.velocity_yaw - cfg.base_rotation_speed).abs() < 1e-9);
        assert!(rot.velocity_pitch.abs() < 1e-9);
        assert!(rot.velocity_yaw > 0.0);
    }

    #[test]
    fn reversed_spin_recovers_forward_ambient() {
        let cfg = EngineConfig::default();
        let mut rot = RotationState::new(&cfg);
        rot.set_from_drag(-40.0, 0.0, cfg.drag_sensitivity);
        for _ in 0..5_000 {
            rot.step(false, &cfg);
        }
        assert!((rot.velocity_yaw - cfg.base_rotation_speed).abs() < 1e-9);
    }

    #[test]
    fn dragging_suspends_friction() {
        let cfg = EngineConfig::default();
        let mut rot = RotationState::new(&cfg);
        rot.set_from_drag(10.0, -5.0, cfg.drag_sensitivity);
        rot.step(true, &cfg);
        rot.step(true, &cfg);
        assert!((rot.velocity_yaw - 0.04).abs() < 1e-12);
        assert!((rot.velocity_pitch + 0.02).abs() < 1e-12);
        assert!((rot.yaw - 0.08).abs() < 1e-12);
        assert!((rot.pitch + 0.04).abs() < 1e-12);
    }

    #[test]
    fn friction_decays_fast_spin() {
        let cfg = EngineConfig::default();
        let mut rot = RotationState::new(&cfg);
        rot.set_from_drag(50.0, 0.0, cfg.drag_sensitivity);
        rot.step(false, &cfg);
        assert!((rot.velocity_yaw - 0.2 * 0.95).abs() < 1e-12);
    }
}
