use crate::DraftData;
use serde::{Deserialize, Serialize};

/// Holds the cross-step working data of a flow invocation
///
/// The store owns the draft exclusively for one flow shell. Derived
/// totals are never cached here: consumers recompute them from the
/// authoritative line items on every read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftStore {
    data: DraftData,
}

impl DraftStore {
    /// Create a store around an initial draft
    pub fn new(data: DraftData) -> Self {
        Self { data }
    }

    /// Read access to the draft
    #[inline]
    pub fn get(&self) -> &DraftData {
        &self.data
    }

    /// Clone the draft for a snapshot
    #[inline]
    pub fn snapshot(&self) -> DraftData {
        self.data.clone()
    }

    /// Shallow-merge a partial update into the draft
    ///
    /// Top-level keys of `partial` replace the corresponding keys of
    /// the draft; other keys are untouched. Merging does not infer
    /// validity — callers re-run the active step's validator afterwards.
    pub fn merge(&mut self, partial: serde_json::Value) {
        match (self.data.as_value_mut(), partial) {
            (serde_json::Value::Object(base), serde_json::Value::Object(update)) => {
                for (key, value) in update {
                    base.insert(key, value);
                }
            }
            // A non-object partial (or a non-object draft) replaces wholesale
            (slot, partial) => *slot = partial,
        }
    }
}
