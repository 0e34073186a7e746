//! Rep event delivery.
//!
//! The pipeline never calls into its consumers. Each subscriber gets its own
//! `mpsc` channel and drains it on whatever thread owns the display state;
//! events are `Copy` snapshots, so nothing on the receiving side can reach the
//! counter.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::counter::RepEvent;

/// Fan-out of [`RepEvent`]s to any number of channel subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<RepEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new consumer and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<RepEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber without blocking.
    ///
    /// Subscribers whose receiver has been dropped are removed. Returns the
    /// number of subscribers the event was delivered to.
    pub fn publish(&mut self, event: RepEvent) -> usize {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event).is_ok());

        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!(dropped, "pruned disconnected rep event subscribers");
        }
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_every_subscriber_gets_a_copy() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        assert_eq!(bus.publish(RepEvent { count: 1 }), 2);
        assert_eq!(a.try_recv(), Ok(RepEvent { count: 1 }));
        assert_eq!(b.try_recv(), Ok(RepEvent { count: 1 }));
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.publish(RepEvent { count: 3 }), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.recv(), Ok(RepEvent { count: 3 }));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut bus = EventBus::new();
        assert_eq!(bus.publish(RepEvent { count: 1 }), 0);
    }

    #[test]
    fn test_consumer_on_another_thread() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();

        let consumer = thread::spawn(move || rx.iter().map(|e| e.count).collect::<Vec<_>>());

        for count in 1..=3 {
            bus.publish(RepEvent { count });
        }
        drop(bus);

        assert_eq!(consumer.join().expect("consumer thread"), vec![1, 2, 3]);
    }
}
