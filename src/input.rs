//! Per-frame input handed to the core by the presentation layer.

use glam::Vec2;

use crate::entities::MoveIntent;

/// Discrete keys the core cares about. Everything else is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Quit,
    Restart,
    /// Zero-based pick option (keys 1/2/3 map to 0/1/2).
    Choice(u8),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Primary click at a world-space pointer position.
    Click(Vec2),
}

/// Everything that happened since the previous frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Monotonic time in seconds.
    pub now: f64,
    pub movement: MoveIntent,
    pub shoot_held: bool,
    /// Current pointer position in world space.
    pub pointer: Vec2,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Key(k) => Some(*k),
            InputEvent::Click(_) => None,
        })
    }

    pub fn clicks(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Click(p) => Some(*p),
            InputEvent::Key(_) => None,
        })
    }
}
