//! Reference model for model-based testing.
//!
//! The model is a deliberately naive BB84 session: index loops over parallel
//! arrays of 0/1 values, no typed bits or bases, no shared environment. It
//! serves as the oracle against which `bb84_core::Session` is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Same draw order: The model consumes its seeded stream byte for byte the
//!   way the real pipeline consumes `SimEnv`
//! - Deterministic: Same seed and operations produce the same state

pub mod operation;
mod world;

pub use operation::{Operation, OperationError, OperationResult, SmallMessage};
pub use world::{ModelWorld, ObservableState};
