//! Deterministic simulation harness for BB84 protocol testing.
//!
//! Seeded implementation of the core `Environment` trait plus tooling for
//! reproducible end-to-end runs:
//!
//! - [`SimEnv`]: ChaCha-backed environment, replayable from its seed
//! - [`Scenario`]: builder that runs a session and checks protocol invariants
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and real implementation,
//! and their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod scenario;
pub mod sim_env;

pub use model::{
    ModelWorld, ObservableState, Operation, OperationError, OperationResult, SmallMessage,
};
pub use scenario::{Scenario, ScenarioError, ScenarioWorld, check_invariants};
pub use sim_env::SimEnv;
