//! Repository traits for the Stepflow engine
//!
//! The engine itself performs no I/O; hosting applications implement
//! these traits to persist temp-save snapshots wherever they like
//! (local storage, a backend, or nothing at all).

use async_trait::async_trait;

use super::flow_definition::FlowId;
use super::flow_shell::{DraftSnapshot, FlowInstanceId};
use crate::FlowError;

/// Repository for temp-save draft snapshots
#[async_trait]
pub trait DraftSnapshotRepository: Send + Sync {
    /// Find a snapshot by the flow instance it was taken from
    async fn find_by_id(&self, id: &FlowInstanceId) -> Result<Option<DraftSnapshot>, FlowError>;

    /// Save a snapshot, replacing any previous one for the same instance
    async fn save(&self, snapshot: &DraftSnapshot) -> Result<(), FlowError>;

    /// Delete a snapshot
    async fn delete(&self, id: &FlowInstanceId) -> Result<(), FlowError>;

    /// List all snapshots saved for a flow type
    async fn list_for_flow(&self, flow_id: &FlowId) -> Result<Vec<DraftSnapshot>, FlowError>;
}

/// Memory implementations for testing
#[cfg(feature = "testing")]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory implementation of the draft snapshot repository
    pub struct MemoryDraftSnapshotRepository {
        snapshots: Arc<RwLock<HashMap<String, DraftSnapshot>>>,
    }

    impl MemoryDraftSnapshotRepository {
        /// Create a new memory draft snapshot repository
        pub fn new() -> Self {
            Self {
                snapshots: Arc::new(RwLock::new(HashMap::new())),
            }
        }
    }

    impl Default for MemoryDraftSnapshotRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl DraftSnapshotRepository for MemoryDraftSnapshotRepository {
        async fn find_by_id(
            &self,
            id: &FlowInstanceId,
        ) -> Result<Option<DraftSnapshot>, FlowError> {
            let snapshots = self.snapshots.read().await;
            Ok(snapshots.get(&id.0).cloned())
        }

        async fn save(&self, snapshot: &DraftSnapshot) -> Result<(), FlowError> {
            let mut snapshots = self.snapshots.write().await;
            snapshots.insert(snapshot.instance_id.0.clone(), snapshot.clone());
            Ok(())
        }

        async fn delete(&self, id: &FlowInstanceId) -> Result<(), FlowError> {
            let mut snapshots = self.snapshots.write().await;
            snapshots.remove(&id.0);
            Ok(())
        }

        async fn list_for_flow(&self, flow_id: &FlowId) -> Result<Vec<DraftSnapshot>, FlowError> {
            let snapshots = self.snapshots.read().await;
            Ok(snapshots
                .values()
                .filter(|snapshot| snapshot.flow_id == *flow_id)
                .cloned()
                .collect())
        }
    }
}
