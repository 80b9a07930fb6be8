//! Task supervision policy.
//!
//! The telemetry publisher and the lifecycle manager can end with a fatal
//! error. The firmware re-runs a failed task while it still has restart
//! budget and resets the whole system once the budget is gone. The other
//! tasks keep running throughout, so one failure never silently stops the
//! rest.

use crate::error::Error;

/// Tasks that can exit with an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    Lifecycle,
    Telemetry,
}

/// What to do about a failed task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Run the task again after the backoff delay.
    Restart,
    /// Give up and reset the device.
    Reset,
}

/// Per-task restart budget.
pub struct RestartBudget {
    task: TaskId,
    limit: u8,
    remaining: u8,
    healthy_run_ms: u64,
}

impl RestartBudget {
    pub const fn new(task: TaskId, limit: u8, healthy_run_ms: u64) -> Self {
        Self {
            task,
            limit,
            remaining: limit,
            healthy_run_ms,
        }
    }

    /// Record a fatal exit after the task ran for `ran_for_ms`.
    ///
    /// A run of at least `healthy_run_ms` refills the budget before this
    /// failure is charged against it.
    pub fn on_failure(&mut self, error: &Error, ran_for_ms: u64) -> Verdict {
        if ran_for_ms >= self.healthy_run_ms {
            self.remaining = self.limit;
        }

        if self.remaining == 0 {
            error!(
                "{:?} failed ({:?}) with no restarts left - resetting",
                self.task, error
            );
            return Verdict::Reset;
        }

        self.remaining -= 1;
        warn!(
            "{:?} failed ({:?}) after {} ms - restarting, {} restarts left",
            self.task, error, ran_for_ms, self.remaining
        );
        Verdict::Restart
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }
}
