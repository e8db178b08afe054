//! Delayed events for the UI loop.
//!
//! Each scheduled event runs as a tokio task that sleeps and then posts to an
//! unbounded channel. The loop drains the channel with `try_recv` between
//! frames. Events carry the epoch they were scheduled in; `cancel_all` bumps
//! the epoch and aborts outstanding tasks, so nothing scheduled before it is
//! ever delivered.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Scheduler<E> {
    tx: mpsc::UnboundedSender<(u64, E)>,
    rx: mpsc::UnboundedReceiver<(u64, E)>,
    epoch: u64,
    handles: Vec<JoinHandle<()>>,
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            epoch: 0,
            handles: Vec::new(),
        }
    }

    /// Deliver `event` after `delay`. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        self.handles.retain(|h| !h.is_finished());

        let tx = self.tx.clone();
        let epoch = self.epoch;
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send((epoch, event));
        }));
    }

    /// Drop every event scheduled so far, delivered or not
    pub fn cancel_all(&mut self) {
        let pending = self.pending();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.epoch += 1;
        if pending > 0 {
            tracing::debug!(pending, epoch = self.epoch, "cancelled scheduled events");
        }
    }

    /// Next due event, if any (non-blocking)
    pub fn try_recv(&mut self) -> Option<E> {
        while let Ok((epoch, event)) = self.rx.try_recv() {
            if epoch == self.epoch {
                return Some(event);
            }
        }
        None
    }

    /// Scheduled tasks that have not fired yet
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl<E: Send + 'static> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl<E> std::fmt::Debug for Scheduler<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("epoch", &self.epoch)
            .field("handles", &self.handles.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_event_arrives_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(1500), "advance");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(scheduler.try_recv(), None);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(scheduler.try_recv(), Some("advance"));
        assert_eq!(scheduler.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_fire() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(800), 1);
        scheduler.cancel_all();
        scheduler.schedule(Duration::from_millis(800), 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(scheduler.try_recv(), Some(2));
        assert_eq!(scheduler.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_already_delivered_events() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(10), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;

        scheduler.cancel_all();
        assert_eq!(scheduler.try_recv(), None);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_keep_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(300), "late");
        scheduler.schedule(Duration::from_millis(100), "early");

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(scheduler.try_recv(), Some("early"));
        assert_eq!(scheduler.try_recv(), Some("late"));
    }
}
