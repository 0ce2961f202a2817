//! Event bus for queuing and draining notifications.
//!
//! Mutations emit onto the bus synchronously, after the state change that
//! caused them and before control returns to the caller. The host drains the
//! queue whenever it likes; FIFO order is preserved.

use std::collections::VecDeque;

use super::types::ScatterEvent;

/// A simple FIFO queue of [`ScatterEvent`]s.
#[derive(Debug, Default)]
pub struct EventBus {
    events: VecDeque<ScatterEvent>,
}

impl EventBus {
    /// Create a new empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Queue an event.
    pub fn emit(&mut self, event: ScatterEvent) {
        self.events.push_back(event);
    }

    /// Drain all pending events in FIFO order.
    pub fn drain(&mut self) -> impl Iterator<Item = ScatterEvent> + '_ {
        self.events.drain(..)
    }

    /// Take all pending events as an owned `Vec`, leaving the queue empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<ScatterEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }

    /// Check if there are any pending events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Peek at the next event without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&ScatterEvent> {
        self.events.front()
    }

    /// Drop all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
