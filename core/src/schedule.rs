use alloc::vec::Vec;
use core::time::Duration;

use crate::*;

/// Deferred work requested by the session. Hosts hand it back through `GameSession::run_task` once the delay
/// elapsed.
#[derive(Clone, Debug, PartialEq)]
pub enum ScheduledTask {
    /// Turn a mismatched pair back face down.
    RevertMismatch { game: GameId },
    /// Show the win report to the player.
    DeliverWinReport { game: GameId, report: WinReport },
}

pub trait Scheduler {
    /// Every scheduled task must be handed back exactly once.
    fn schedule(&mut self, delay: Duration, task: ScheduledTask);
}

pub trait Notifier {
    fn notify_win(&mut self, report: &WinReport);
}

impl Notifier for Vec<WinReport> {
    fn notify_win(&mut self, report: &WinReport) {
        self.push(report.clone());
    }
}

#[derive(Clone, Debug, PartialEq)]
struct QueuedTask {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
}

/// Scheduler driven by an explicit virtual clock. Tasks fire in due order, ties in scheduling order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    queue: Vec<QueuedTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Moves the clock forward and returns every task that became due.
    pub fn advance(&mut self, by: Duration) -> Vec<ScheduledTask> {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|queued| queued.due <= now);
        self.queue = pending;

        due.sort_by_key(|queued| (queued.due, queued.seq));
        due.into_iter().map(|queued| queued.task).collect()
    }

    /// Advances to the latest due time and returns all queued tasks.
    pub fn run_all(&mut self) -> Vec<ScheduledTask> {
        let Some(last_due) = self.queue.iter().map(|queued| queued.due).max() else {
            return Vec::new();
        };
        self.advance(last_due.saturating_sub(self.now))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        let due = self.now.saturating_add(delay);
        log::trace!("scheduled {:?} at {:?}", task, due);
        self.queue.push(QueuedTask {
            due,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }
}
