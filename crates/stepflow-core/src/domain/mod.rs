//! Domain layer for the Stepflow engine

/// Draft state store
pub mod draft;

/// Domain events emitted by a flow shell
pub mod events;

/// Flow and step definitions (the step registry)
pub mod flow_definition;

/// The flow shell aggregate
pub mod flow_shell;

/// Navigation state and progress
pub mod navigation;

/// Repository traits
pub mod repository;

/// Step validation gate
pub mod validation;
