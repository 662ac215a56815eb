//! Scroll plumbing for the select popup.
//!
//! `ScrollRegistry` tracks which widgets currently want scroll events. A
//! widget subscribes when its popup opens and must unsubscribe when it closes,
//! so repeated open/close cycles leave the registry at its baseline count.
//! `ScrollDebouncer` smooths high-resolution scroll deltas before they reach
//! subscribers.

use std::time::{Duration, Instant};

/// Handle identifying one scroll subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Registry of scroll-event subscribers.
#[derive(Debug, Default)]
pub struct ScrollRegistry {
    next_id: u64,
    subscribers: Vec<SubscriptionId>,
}

impl ScrollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and return its handle.
    pub fn subscribe(&mut self) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(id);
        id
    }

    /// Remove a subscriber. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|s| *s != id);
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

/// Accumulates scroll deltas over a short window so trackpad-style event
/// bursts turn into single reposition passes.
#[derive(Debug, Clone)]
pub struct ScrollDebouncer {
    accumulated: i32,
    last_event: Option<Instant>,
    window: Duration,
    threshold: i32,
}

impl Default for ScrollDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(50), 1)
    }
}

impl ScrollDebouncer {
    pub fn new(window: Duration, threshold: i32) -> Self {
        Self {
            accumulated: 0,
            last_event: None,
            window,
            threshold,
        }
    }

    /// Feed a delta; returns the accumulated value once it reaches the
    /// threshold, `None` while still accumulating.
    pub fn accumulate(&mut self, delta: i32) -> Option<i32> {
        let now = Instant::now();

        match self.last_event {
            Some(last) if now.duration_since(last) <= self.window => {
                self.accumulated += delta;
            }
            _ => {
                self.accumulated = delta;
            }
        }
        self.last_event = Some(now);

        if self.accumulated.abs() >= self.threshold {
            let result = self.accumulated;
            self.accumulated = 0;
            Some(result)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_subscription_count_returns_to_baseline() {
        let mut registry = ScrollRegistry::new();
        assert_eq!(registry.len(), 0);

        for _ in 0..5 {
            let id = registry.subscribe();
            assert_eq!(registry.len(), 1);
            registry.unsubscribe(id);
        }

        assert!(registry.is_empty());
    }

    #[test]
    fn test_unsubscribe_only_removes_own_handle() {
        let mut registry = ScrollRegistry::new();
        let first = registry.subscribe();
        let second = registry.subscribe();

        registry.unsubscribe(first);

        assert!(!registry.is_subscribed(first));
        assert!(registry.is_subscribed(second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_deltas_accumulate_to_threshold() {
        let mut debouncer = ScrollDebouncer::new(Duration::from_millis(100), 3);

        assert!(debouncer.accumulate(1).is_none());
        assert!(debouncer.accumulate(1).is_none());
        assert_eq!(debouncer.accumulate(1), Some(3));
    }

    #[test]
    fn test_stale_window_starts_fresh() {
        let mut debouncer = ScrollDebouncer::new(Duration::from_millis(10), 1);

        assert_eq!(debouncer.accumulate(5), Some(5));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.accumulate(3), Some(3));
    }
}
