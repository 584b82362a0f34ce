//! Fault bookkeeping for the harness restart loop.
//!
//! Each caught fault is counted; a restart is granted while the restart
//! budget lasts, after which the harness latches `halted` and refuses work.

/// Fault and restart counters exported to callers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// Faults caught since start.
    pub faults: u32,
    /// Restarts performed since start.
    pub restarts: u32,
    /// True once the restart budget is exhausted.
    pub halted: bool,
}

impl Health {
    /// Counts a caught fault.
    pub fn record_fault(&mut self) {
        self.faults = self.faults.saturating_add(1);
    }

    /// Consumes one restart if the budget allows it, otherwise latches `halted`.
    pub fn try_restart(&mut self, max_restarts: u32) -> bool {
        if self.halted || self.restarts >= max_restarts {
            self.halted = true;
            return false;
        }
        self.restarts += 1;
        true
    }
}
