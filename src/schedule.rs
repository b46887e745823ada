//! Cancellable one-shot timers
//!
//! Every delayed action in the dashboard (scripted chat reply, notification
//! auto-dismiss, mascot blink, settings "saved" flash) is a [`Timer`] owned by
//! exactly one component. A timer holds at most one pending tokio task that
//! sleeps and then sends an event back to the event loop.
//!
//! - `schedule` cancels whatever was pending first (cancel-and-reschedule)
//! - `cancel` aborts the pending task
//! - dropping the owner drops the timer, which aborts the task
//!
//! Events carry a generation number. An event can already be sitting in the
//! channel when its timer is cancelled, so owners check [`Timer::fire`]
//! before acting on one.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct Timer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
    pending: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer: after `delay`, send `make(generation)` on `tx`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<E, F>(&mut self, delay: Duration, tx: &mpsc::Sender<E>, make: F) -> u64
    where
        E: Send + 'static,
        F: FnOnce(u64) -> E,
    {
        self.cancel();
        self.generation += 1;
        self.pending = true;

        let event = make(self.generation);
        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(event).await;
        }));
        self.generation
    }

    /// Abort the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if self.pending {
            // Invalidate anything already queued
            self.generation += 1;
            self.pending = false;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accept a delivered event
    ///
    /// Returns true exactly once per `schedule`, and only for the most
    /// recent generation.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending && generation == self.generation {
            self.pending = false;
            self.handle = None;
            true
        } else {
            false
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::Receiver<u64>) -> Vec<u64> {
        let mut out = Vec::new();
        while let Ok(generation) = rx.try_recv() {
            out.push(generation);
        }
        out
    }

    /// Let spawned timer tasks observe the advanced clock
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new();
        let generation = timer.schedule(Duration::from_millis(1500), &tx, |g| g);
        settle().await;

        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());

        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(drain(&mut rx), vec![generation]);
        assert!(timer.fire(generation));
        assert!(!timer.fire(generation));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_pending_task() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new();

        timer.schedule(Duration::from_secs(15), &tx, |g| g);
        settle().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        let second = timer.schedule(Duration::from_secs(15), &tx, |g| g);
        settle().await;

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty(), "first timer must not fire");

        tokio::time::advance(Duration::from_secs(6)).await;
        settle().await;
        let fired = drain(&mut rx);
        assert_eq!(fired, vec![second]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new();
        timer.schedule(Duration::from_secs(1), &tx, |g| g);
        settle().await;
        timer.cancel();

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_is_rejected() {
        let (tx, _rx) = mpsc::channel::<u64>(8);
        let mut timer = Timer::new();
        let first = timer.schedule(Duration::from_secs(1), &tx, |g| g);
        let second = timer.schedule(Duration::from_secs(1), &tx, |g| g);

        assert!(!timer.fire(first));
        assert!(timer.fire(second));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_task() {
        let (tx, mut rx) = mpsc::channel(8);
        {
            let mut timer = Timer::new();
            timer.schedule(Duration::from_secs(1), &tx, |g| g);
            settle().await;
        }
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(drain(&mut rx).is_empty());
    }
}
