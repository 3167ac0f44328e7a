use crate::domain::flow_shell::{DraftSnapshot, FlowInstanceId};
use crate::DraftData;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Domain event trait for all events emitted by a flow shell
pub trait FlowEvent: Debug + Send + Sync {
    /// Returns the type of the event as a string
    fn event_type(&self) -> &'static str;

    /// Returns the flow instance ID this event is associated with
    fn flow_instance_id(&self) -> &FlowInstanceId;

    /// Returns the timestamp when the event occurred
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Event: the active step changed
#[derive(Debug)]
pub struct StepChanged {
    /// The unique identifier of the flow instance
    pub flow_instance_id: FlowInstanceId,

    /// The step the flow moved to
    pub new_step: u32,

    /// The timestamp when the step changed
    pub timestamp: DateTime<Utc>,
}

impl FlowEvent for StepChanged {
    fn event_type(&self) -> &'static str {
        "flow.step_changed"
    }

    fn flow_instance_id(&self) -> &FlowInstanceId {
        &self.flow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Event: the draft was saved for later resumption
#[derive(Debug)]
pub struct DraftSaved {
    /// The unique identifier of the flow instance
    pub flow_instance_id: FlowInstanceId,

    /// Snapshot of the draft at the moment of saving
    pub snapshot: DraftSnapshot,

    /// The timestamp when the draft was saved
    pub timestamp: DateTime<Utc>,
}

impl FlowEvent for DraftSaved {
    fn event_type(&self) -> &'static str {
        "flow.draft_saved"
    }

    fn flow_instance_id(&self) -> &FlowInstanceId {
        &self.flow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Event: the flow completed from its terminal step
#[derive(Debug)]
pub struct FlowCompleted {
    /// The unique identifier of the flow instance
    pub flow_instance_id: FlowInstanceId,

    /// The finalized draft collected across all steps
    pub final_draft: DraftData,

    /// The timestamp when the flow completed
    pub timestamp: DateTime<Utc>,
}

impl FlowEvent for FlowCompleted {
    fn event_type(&self) -> &'static str {
        "flow.completed"
    }

    fn flow_instance_id(&self) -> &FlowInstanceId {
        &self.flow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Event: the flow was abandoned back to its caller
#[derive(Debug)]
pub struct FlowAbandoned {
    /// The unique identifier of the flow instance
    pub flow_instance_id: FlowInstanceId,

    /// The timestamp when the flow was abandoned
    pub timestamp: DateTime<Utc>,
}

impl FlowEvent for FlowAbandoned {
    fn event_type(&self) -> &'static str {
        "flow.abandoned"
    }

    fn flow_instance_id(&self) -> &FlowInstanceId {
        &self.flow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
