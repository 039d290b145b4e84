use alloc::collections::BTreeMap;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Generation counter of a game; bumped by every start and reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Epoch(pub u32);

impl Epoch {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Look for completed rows and mark them as flashing.
    CheckRows,
    /// Remove the rows of a marked pass and award its score.
    Compact(PassId),
}

/// A state transition to run later against whatever the state is by then.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTask {
    pub epoch: Epoch,
    pub kind: TaskKind,
}

/// Delays between a placement and the two stages of a row clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearTiming {
    pub check_delay: Duration,
    pub compact_delay: Duration,
}

impl Default for ClearTiming {
    fn default() -> Self {
        Self {
            check_delay: Duration::from_millis(120),
            compact_delay: Duration::from_millis(450),
        }
    }
}

/// Deferred tasks ordered by due time, ties broken by scheduling order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickQueue {
    seq: u64,
    tasks: BTreeMap<(Duration, u64), DeferredTask>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn schedule(&mut self, due: Duration, task: DeferredTask) {
        self.tasks.insert((due, self.seq), task);
        self.seq += 1;
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|&(due, _)| due)
    }

    /// Removes the earliest task if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, DeferredTask)> {
        let entry = self.tasks.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        let (due, _) = *entry.key();
        Some((due, entry.remove()))
    }
}
