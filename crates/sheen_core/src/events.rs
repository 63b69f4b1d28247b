//! Event dispatch system
//!
//! Input and lifecycle events in a platform-neutral form. Hosts translate
//! their native wheel/touch/pointer events into [`Event`]s and feed them to
//! the site context, which routes pointer events to per-card handlers.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Primary button press and release at a pointer position
    pub const CLICK: EventType = 1;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Mouse wheel / trackpad delta
    pub const WHEEL: EventType = 29;
    pub const SCROLL: EventType = 30;
    /// Touch drag delta
    pub const TOUCH_MOVE: EventType = 33;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    /// Router navigated to a new path
    pub const NAVIGATE: EventType = 90;
}

/// Target id used for events that aren't aimed at a specific element
pub const WINDOW_TARGET: u64 = 0;

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
    },
    Touch {
        delta_y: f32,
    },
    Scroll {
        position: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Navigate {
        path: String,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event)>;

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(u64, EventType), Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn register<F>(&mut self, target: u64, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers
            .entry((target, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Drop every handler registered for `target`
    pub fn remove_target(&mut self, target: u64) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|(t, _), _| *t != target);
        before - self.handlers.len()
    }

    /// Whether any handler listens on this target
    pub fn has_target(&self, target: u64) -> bool {
        self.handlers.keys().any(|(t, _)| *t == target)
    }

    /// Dispatch an event to all registered handlers.
    ///
    /// Returns `true` when at least one handler ran.
    pub fn dispatch(&self, event: &mut Event) -> bool {
        let Some(handlers) = self.handlers.get(&(event.target, event.event_type)) else {
            return false;
        };

        let mut handled = false;
        for handler in handlers {
            if event.propagation_stopped {
                break;
            }
            handler(event);
            handled = true;
        }
        handled
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
