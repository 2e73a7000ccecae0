use crate::frame::Frame;

/// What happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The point set was regenerated for a new viewport.
    SceneReseeded,
    /// A click landed on a point and it became the annotated one.
    SelectionChanged,
    /// A click landed on empty space, or a reseed invalidated the selection.
    SelectionCleared,
    /// A live config update named an unknown key or carried a non-finite
    /// value; the current config was left unchanged.
    ConfigRejected,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SceneReseeded => "scene.reseeded",
            EventKind::SelectionChanged => "selection.changed",
            EventKind::SelectionCleared => "selection.cleared",
            EventKind::ConfigRejected => "config.rejected",
        }
    }
}

/// Structured engine event, stamped with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.frame_index, self.kind.as_str(), self.message)
    }
}

/// Append-only event log drained by the host once per frame.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventKind};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first().next().next(), EventKind::SelectionChanged, "node 5");
        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame_index, 2);
        assert_eq!(events[0].to_string(), "[2] selection.changed: node 5");
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(), EventKind::SceneReseeded, "300 points");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.drain().is_empty());
    }
}
