use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Position of a flow invocation within its step sequence
///
/// Invariant: `1 <= current <= total` and `current <= max_reached`.
/// The completed set holds steps explicitly marked complete; any step
/// below `current` is considered completed as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationState {
    /// The active step index (1-based)
    pub current: u32,

    /// Highest step index ever reached
    pub max_reached: u32,

    /// Total number of steps in the flow
    pub total: u32,

    /// Steps explicitly marked completed
    completed: HashSet<u32>,
}

impl NavigationState {
    /// Create navigation state entering at the given step
    pub fn new(entry_step: u32, total: u32) -> Self {
        Self {
            current: entry_step,
            max_reached: entry_step,
            total,
            completed: HashSet::new(),
        }
    }

    /// Whether the active step is the terminal (last) step
    #[inline]
    pub fn at_terminal(&self) -> bool {
        self.current == self.total
    }

    /// Whether the active step is the entry step
    #[inline]
    pub fn at_first(&self) -> bool {
        self.current == 1
    }

    /// Whether a jump target is reachable
    ///
    /// A target is reachable when it is a previously reached step or
    /// exactly the next unreached one. Whether the jump is *permitted*
    /// additionally depends on the current step's validity when moving
    /// forward; the flow shell checks that against the gate.
    #[inline]
    pub fn reachable(&self, target: u32) -> bool {
        target >= 1 && target <= self.total && target <= self.max_reached + 1
    }

    /// Move the active step, keeping `max_reached` monotonic
    pub(crate) fn move_to(&mut self, target: u32) {
        debug_assert!(target >= 1 && target <= self.total);
        self.current = target;
        if target > self.max_reached {
            self.max_reached = target;
        }
    }

    /// Explicitly mark a step as completed
    pub fn mark_completed(&mut self, step: u32) {
        self.completed.insert(step);
    }

    /// Whether a step is considered completed
    ///
    /// A step counts as completed when the flow has moved past it, or
    /// when it was explicitly marked.
    pub fn is_completed(&self, step: u32) -> bool {
        step < self.current || self.completed.contains(&step)
    }
}

/// Progress indicator data surfaced to the hosting UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    /// The active step index
    pub current: u32,

    /// Highest step index ever reached
    pub max_reached: u32,

    /// Total number of steps
    pub total: u32,
}
