//! The three counter flows
//!
//! Each submodule declares one flow definition with its step
//! validators. The hosting screen drives a [`FlowShell`] built over
//! one of these definitions.
//!
//! [`FlowShell`]: stepflow_core::FlowShell

mod order;
mod returns;
mod sell;

pub use order::{finalize_order, order_flow};
pub use returns::return_flow;
pub use sell::sell_flow;
