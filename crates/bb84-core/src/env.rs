//! Environment abstraction for deterministic simulation.
//!
//! The `Environment` trait decouples protocol logic from the random source.
//! Every component that needs randomness takes an `&E: Environment`, so:
//!
//! - Deterministic Simulation: a seeded RNG reproduces a run exactly, which
//!   makes test failures replayable from their seed.
//!
//! - Production Runtime: an OS-entropy implementation plugs in without any
//!   change to the protocol logic.
//!
//! # Invariants
//!
//! - Determinism: Given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Isolation: Implementations must not share global state
//! - Draw granularity: each `random_bit()` / `random_basis()` consumes exactly
//!   one byte, so draw order alone determines a run

use crate::basis::{Basis, Bit};

/// Abstract source of randomness for the protocol.
///
/// Clones must share the underlying stream: a draw through one clone advances
/// every other clone.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Determinism during simulations: Given the same RNG seed, this produces
    ///   the same sequence of bytes
    /// - Unpredictability in production: Uses OS entropy
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Draws a uniform bit from one byte of entropy.
    fn random_bit(&self) -> Bit {
        let mut byte = [0u8; 1];
        self.random_bytes(&mut byte);
        Bit::from_low_bit(byte[0])
    }

    /// Draws a uniform basis from one byte of entropy.
    fn random_basis(&self) -> Basis {
        let mut byte = [0u8; 1];
        self.random_bytes(&mut byte);
        Basis::from_low_bit(byte[0])
    }

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}
