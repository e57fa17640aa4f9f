//! # Rotation Timer Module
//!
//! One-shot timer driving the automatic wallpaper rotation.
//!
//! ## Timer Behavior
//! The timer fires exactly once per arming: it sleeps the configured
//! interval, sends a single tick, and is done. The command loop rearms it
//! after every successful navigation, which is what makes rotation repeat.
//! Pausing just stops it without rearming; resuming starts a fresh interval
//! from zero (time elapsed before the pause is not preserved).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One-shot rotation timer. Each [`RotationTimer::rearm`] schedules a single
/// tick on the channel handed out by [`RotationTimer::new`].
#[derive(Debug)]
pub struct RotationTimer {
    tx: mpsc::Sender<()>,
    interval: Duration,
    /// Pending sleep task, aborted on stop or rearm.
    handle: Mutex<Option<JoinHandle<()>>>,
    /// Whether rotation is currently scheduled (drives the Pause/Continue
    /// menu label). Stays true after a tick fires, since the handler rearms
    /// immediately unless the user paused.
    armed: Arc<AtomicBool>,
}

impl RotationTimer {
    /// Creates the timer and the receiving end of its tick channel.
    pub fn new(interval: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let timer = Self {
            tx,
            interval,
            handle: Mutex::new(None),
            armed: Arc::new(AtomicBool::new(false)),
        };
        (timer, rx)
    }

    /// Changes the interval used by subsequent arms. An already pending
    /// sleep keeps its old duration until the next rearm.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Schedules a single tick after the configured interval, replacing any
    /// pending one.
    pub fn rearm(&self) {
        self.abort_pending();
        self.armed.store(true, Ordering::SeqCst);

        let tx = self.tx.clone();
        let armed = self.armed.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            if armed.load(Ordering::SeqCst) {
                let _ = tx.send(()).await;
            }
        });

        if let Ok(mut guard) = self.handle.lock() {
            *guard = Some(handle);
        }
    }

    /// Stops the timer without rearming it (pause).
    pub fn stop(&self) {
        self.armed.store(false, Ordering::SeqCst);
        self.abort_pending();
    }

    /// Whether rotation is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    fn abort_pending(&self) {
        if let Ok(mut guard) = self.handle.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for RotationTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_once_after_the_interval() {
        let (timer, mut rx) = RotationTimer::new(Duration::from_millis(10));
        timer.rearm();

        let tick = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(tick.is_ok());

        // One-shot: no second tick without a rearm.
        let second = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn stop_cancels_a_pending_tick() {
        let (timer, mut rx) = RotationTimer::new(Duration::from_millis(20));
        timer.rearm();
        assert!(timer.is_armed());

        timer.stop();
        assert!(!timer.is_armed());

        let tick = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(tick.is_err());
    }

    #[tokio::test]
    async fn rearm_replaces_the_pending_tick() {
        let (timer, mut rx) = RotationTimer::new(Duration::from_millis(10));
        timer.rearm();
        timer.rearm();

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(first.is_ok());

        let second = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(second.is_err());
    }
}
