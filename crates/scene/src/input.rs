//! Pointer gesture classification.
//!
//! Two states: `Idle` and `Dragging`. A press starts as a click candidate
//! and is demoted to a plain drag once the pointer strays more than the
//! click threshold from where it went down (on either axis).

use foundation::math::Vec2;

/// What the pointer went down on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// The drawing surface (or anything not interactive).
    Surface,
    /// A link, button or form field; the press belongs to the page.
    Interactive,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        origin: Vec2,
        last: Vec2,
        click_candidate: bool,
    },
}

/// Result of releasing the pointer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureOutcome {
    /// No gesture was in progress.
    Ignored,
    /// The pointer moved too far to count as a click.
    Drag,
    /// A click at the release position; run a hit test there.
    Click(Vec2),
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    state: GestureState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Starts a gesture. Returns `false` (and stays idle) for interactive targets.
    pub fn pointer_down(&mut self, pos: Vec2, target: PointerTarget) -> bool {
        if target == PointerTarget::Interactive {
            return false;
        }
        self.state = GestureState::Dragging {
            origin: pos,
            last: pos,
            click_candidate: true,
        };
        true
    }

    /// Returns the delta since the previous pointer position while dragging.
    pub fn pointer_move(&mut self, pos: Vec2, threshold_px: f64) -> Option<Vec2> {
        let GestureState::Dragging {
            origin,
            last,
            click_candidate,
        } = &mut self.state
        else {
            return None;
        };

        if exceeds_threshold(*origin, pos, threshold_px) {
            *click_candidate = false;
        }
        let delta = pos - *last;
        *last = pos;
        Some(delta)
    }

    pub fn pointer_up(&mut self, pos: Vec2, threshold_px: f64) -> GestureOutcome {
        let GestureState::Dragging {
            origin,
            click_candidate,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return GestureOutcome::Ignored;
        };

        if click_candidate && !exceeds_threshold(origin, pos, threshold_px) {
            GestureOutcome::Click(pos)
        } else {
            GestureOutcome::Drag
        }
    }

    /// Abandons any gesture in progress (e.g. pointer capture lost).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

fn exceeds_threshold(origin: Vec2, pos: Vec2, threshold_px: f64) -> bool {
    (pos.x - origin.x).abs() > threshold_px || (pos.y - origin.y).abs() > threshold_px
}
