//!
//! Stepflow Core - the stepped-workflow engine of the Stepflow platform
//!
//! This crate defines the generic wizard engine: flow and step
//! definitions, per-step validation gating, back/next/jump navigation,
//! the draft state store, and the flow shell that ties them together
//! and emits domain events to the hosting screen. It knows nothing
//! about any particular business flow; those live in downstream crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - flow definitions, navigation, validation, events
pub mod domain;

/// Core types
pub mod types;

/// Error types
pub mod error;

// Re-export key types
pub use error::FlowError;
pub use types::DraftData;

// Re-export main API types for easy use
pub use domain::draft::DraftStore;
pub use domain::events::{DraftSaved, FlowAbandoned, FlowCompleted, FlowEvent, StepChanged};
pub use domain::flow_definition::{FlowDefinition, FlowId, StepDefinition, StepValidator};
pub use domain::flow_shell::{DraftSnapshot, FlowInstanceId, FlowShell, FlowStatus};
pub use domain::navigation::{NavigationState, Progress};
pub use domain::repository::DraftSnapshotRepository;
pub use domain::validation::ValidationGate;
