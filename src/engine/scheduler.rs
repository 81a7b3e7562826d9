use std::collections::BTreeSet;

use crate::foundation::core::FrameIndex;

/// Opaque handle for one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(pub u64);

/// "Next display refresh" primitive.
///
/// A scheduled tick fires at most once. Cancelling a handle that already fired or was already
/// cancelled is a no-op.
pub trait Scheduler {
    /// Request one tick at the next refresh.
    fn schedule_tick(&mut self) -> TickHandle;

    /// Withdraw a pending tick.
    fn cancel(&mut self, handle: TickHandle);
}

/// Manually advanced virtual display clock.
///
/// Each [`FrameClock::advance`] is one refresh: it returns every handle scheduled before the
/// call, in scheduling order, and forgets them. Ticks scheduled while handling a refresh fire on
/// the next one.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_id: u64,
    pending: BTreeSet<TickHandle>,
    frame: u64,
}

impl FrameClock {
    /// A clock at frame 0 with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes that have happened so far.
    pub fn frame(&self) -> FrameIndex {
        FrameIndex(self.frame)
    }

    /// Number of ticks waiting for the next refresh.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// `true` if `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Perform one refresh and return the handles that fire on it.
    pub fn advance(&mut self) -> Vec<TickHandle> {
        self.frame += 1;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

impl Scheduler for FrameClock {
    fn schedule_tick(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;
