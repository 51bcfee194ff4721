//! One-shot delayed completions for panels that simulate background work.
//!
//! Every scheduled completion gets a request id from a process-wide counter,
//! so an id is never reused even after the panel that asked for it is
//! rebuilt. Panels keep at most one pending timer in a [`PendingSlot`] and
//! only accept the completion whose id is still current.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which panel a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTarget {
    ChatReply,
    Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub target: TimerTarget,
    pub id: RequestId,
}

/// Result of asking a panel to start simulated work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Started(RequestId),
    /// Blank input. Nothing happens.
    EmptyInput,
    /// A request is already pending. Nothing happens.
    Busy,
}

/// Result of delivering a completion to a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    StaleDiscarded,
}

/// Spawns sleep tasks that post [`AppEvent::Completed`] onto the app channel.
#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<AppEvent>,
    next_id: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn schedule(&self, target: TimerTarget, delay: Duration) -> PendingTimer {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let deadline = Instant::now() + delay;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(AppEvent::Completed(Completion { target, id }));
        });

        debug!(request = %id, ?target, delay_ms = delay.as_millis() as u64, "scheduled completion");

        PendingTimer {
            id,
            abort: handle.abort_handle(),
        }
    }
}

/// Handle to a scheduled completion. Dropping it aborts the timer.
#[derive(Debug)]
pub struct PendingTimer {
    id: RequestId,
    abort: AbortHandle,
}

impl PendingTimer {
    pub fn id(&self) -> RequestId {
        self.id
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Holds the single in-flight timer of a panel.
#[derive(Debug, Default)]
pub struct PendingSlot {
    current: Option<PendingTimer>,
}

impl PendingSlot {
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_id(&self) -> Option<RequestId> {
        self.current.as_ref().map(PendingTimer::id)
    }

    /// Schedule a new completion, superseding (and aborting) any previous one.
    pub fn start(&mut self, scheduler: &Scheduler, target: TimerTarget, delay: Duration) -> RequestId {
        let timer = scheduler.schedule(target, delay);
        let id = timer.id();
        self.current = Some(timer);
        id
    }

    /// Accept `id` if it is the pending request, clearing the slot.
    pub fn settle(&mut self, id: RequestId) -> Settled {
        match self.current_id() {
            Some(current) if current == id => {
                self.current = None;
                Settled::Applied
            }
            current => {
                debug!(request = %id, ?current, "discarding stale completion");
                Settled::StaleDiscarded
            }
        }
    }

    /// Abort the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (Scheduler, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Scheduler::new(tx), rx)
    }

    async fn next_completion(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Completion {
        match rx.recv().await {
            Some(AppEvent::Completed(completion)) => completion,
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_arrives_after_delay() {
        let (scheduler, mut rx) = scheduler();
        let mut slot = PendingSlot::default();

        let id = slot.start(&scheduler, TimerTarget::Analysis, Duration::from_millis(3000));
        assert!(slot.is_busy());

        let early = tokio::time::timeout(Duration::from_millis(2999), rx.recv()).await;
        assert!(early.is_err(), "completion fired before the delay elapsed");
        assert!(slot.is_busy());

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion, Completion { target: TimerTarget::Analysis, id });
        assert_eq!(slot.settle(completion.id), Settled::Applied);
        assert!(!slot.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_monotonic_across_slots() {
        let (scheduler, _rx) = scheduler();
        let mut a = PendingSlot::default();
        let mut b = PendingSlot::default();

        let first = a.start(&scheduler, TimerTarget::ChatReply, Duration::from_secs(1));
        let second = b.start(&scheduler, TimerTarget::Analysis, Duration::from_secs(1));
        let third = a.start(&scheduler, TimerTarget::ChatReply, Duration::from_secs(1));

        assert!(first < second);
        assert!(second < third);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_is_stale() {
        let (scheduler, _rx) = scheduler();
        let mut slot = PendingSlot::default();

        let old = slot.start(&scheduler, TimerTarget::Analysis, Duration::from_secs(3));
        let new = slot.start(&scheduler, TimerTarget::Analysis, Duration::from_secs(3));

        assert_eq!(slot.settle(old), Settled::StaleDiscarded);
        assert_eq!(slot.current_id(), Some(new));
        assert_eq!(slot.settle(new), Settled::Applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_slot_aborts_timer() {
        let (scheduler, mut rx) = scheduler();
        let mut slot = PendingSlot::default();
        slot.start(&scheduler, TimerTarget::ChatReply, Duration::from_millis(1500));
        drop(slot);

        let fired = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(fired.is_err(), "aborted timer still delivered a completion");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_then_late_completion_is_stale() {
        let (scheduler, _rx) = scheduler();
        let mut slot = PendingSlot::default();
        let id = slot.start(&scheduler, TimerTarget::Analysis, Duration::from_secs(3));

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert_eq!(slot.settle(id), Settled::StaleDiscarded);
    }
}
