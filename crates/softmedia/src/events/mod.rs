//! Generic event representation and queue
//!
//! Native toolkit events are translated into these platform-neutral events
//! and pushed onto an [`EventQueue`] in arrival order. The queue is a plain
//! FIFO: the pump pushes, the application drains.

use crate::input::{KeySym, MouseButton};
use crate::video::WindowId;
use std::collections::VecDeque;

/// A platform-neutral event produced by the event pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user or the native loop requested application exit
    Quit,
    /// A window became visible
    WindowShown {
        /// Window that changed visibility
        window: WindowId,
    },
    /// A window became hidden
    WindowHidden {
        /// Window that changed visibility
        window: WindowId,
    },
    /// A window was resized; the dimensions are the new native client size
    WindowResized {
        /// Window that changed size
        window: WindowId,
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// The pointer entered a window, which takes mouse focus
    MouseEntered {
        /// Window gaining mouse focus
        window: WindowId,
    },
    /// The pointer left a window, which loses mouse focus
    MouseLeft {
        /// Window losing mouse focus
        window: WindowId,
    },
    /// The pointer moved inside a window
    MouseMoved {
        /// Window under the pointer
        window: WindowId,
        /// Pointer x in window coordinates
        x: i32,
        /// Pointer y in window coordinates
        y: i32,
    },
    /// A mouse button changed state; a position update always precedes this
    MouseButton {
        /// Window under the pointer
        window: WindowId,
        /// Button that changed
        button: MouseButton,
        /// True on press, false on release
        pressed: bool,
        /// Pointer x at the time of the change
        x: i32,
        /// Pointer y at the time of the change
        y: i32,
    },
    /// A key changed state
    Key {
        /// Window with keyboard focus
        window: WindowId,
        /// Translated key identity
        sym: KeySym,
        /// True on press, false on release
        pressed: bool,
    },
}

/// FIFO queue of translated events
///
/// Arrival order is preserved exactly: events are polled in the order the
/// pump pushed them.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Push an event at the back of the queue
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Pop the oldest pending event, if any
    pub fn poll(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drain all pending events in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard all pending events (useful for state transitions)
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_preserves_arrival_order() {
        let window = WindowId::default();
        let mut queue = EventQueue::new();
        queue.push(Event::WindowShown { window });
        queue.push(Event::MouseMoved { window, x: 1, y: 2 });
        queue.push(Event::Quit);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.poll(), Some(Event::WindowShown { window }));
        assert_eq!(queue.poll(), Some(Event::MouseMoved { window, x: 1, y: 2 }));
        assert_eq!(queue.poll(), Some(Event::Quit));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn test_drain_empties_the_queue() {
        let window = WindowId::default();
        let mut queue = EventQueue::new();
        queue.push(Event::WindowHidden { window });
        queue.push(Event::Quit);

        let drained: Vec<Event> = queue.drain().collect();
        assert_eq!(drained, vec![Event::WindowHidden { window }, Event::Quit]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_discards_pending_events() {
        let mut queue = EventQueue::new();
        queue.push(Event::Quit);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.poll(), None);
    }
}
