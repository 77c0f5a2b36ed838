//! Production Environment implementation using OS entropy.
//!
//! This module provides `SystemEnv`, the implementation of the `Environment`
//! trait used when no seed is given on the command line.

use bb84_core::Environment;
use rand::RngCore;

/// Production environment backed by the operating system's RNG.
///
/// # Security
///
/// Draws come from `getrandom`. If the OS source fails, the buffer is filled
/// from the thread-local `rand` generator instead and the failure is logged.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            tracing::warn!("getrandom failed, using thread rng: {}", e);
            rand::thread_rng().fill_bytes(buffer);
        });
    }
}
