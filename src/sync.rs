//! Fan-out of change notifications to dependent overlay elements
//!
//! Subscribers own the receiving end of a channel, so dropping an element
//! unsubscribes it without the publisher having to know.

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Publishes clones of a value to every live subscriber
pub struct Broadcaster<T> {
    subscribers: Vec<Sender<T>>,
}

impl<T> Default for Broadcaster<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> Broadcaster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send `value` to everyone still listening, forgetting dropped receivers
    pub fn publish(&mut self, value: T) {
        self.subscribers
            .retain(|tx| match tx.try_send(value.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    /// Drop every subscriber; their receivers observe a disconnect
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

/// Drain a receiver, keeping only the newest value
///
/// Intermediate states are irrelevant to elements that re-derive everything
/// from the latest snapshot.
pub fn latest<T>(rx: &Receiver<T>) -> Option<T> {
    rx.try_iter().last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let mut broadcaster = Broadcaster::new();
        let a = broadcaster.subscribe();
        let b = broadcaster.subscribe();

        broadcaster.publish(7);

        assert_eq!(a.try_recv(), Ok(7));
        assert_eq!(b.try_recv(), Ok(7));
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut broadcaster = Broadcaster::new();
        let kept = broadcaster.subscribe();
        drop(broadcaster.subscribe());
        assert_eq!(broadcaster.len(), 2);

        broadcaster.publish(1);
        assert_eq!(broadcaster.len(), 1);
        assert_eq!(kept.try_recv(), Ok(1));
    }

    #[test]
    fn test_clear_disconnects() {
        let mut broadcaster = Broadcaster::<u8>::new();
        let rx = broadcaster.subscribe();
        broadcaster.clear();
        assert_eq!(broadcaster.len(), 0);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_latest_keeps_newest() {
        let mut broadcaster = Broadcaster::new();
        let rx = broadcaster.subscribe();
        broadcaster.publish(1);
        broadcaster.publish(2);
        broadcaster.publish(3);
        assert_eq!(latest(&rx), Some(3));
        assert_eq!(latest(&rx), None);
    }
}
