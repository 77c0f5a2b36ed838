//! Interactive session state.
//!
//! Models the request/response flow of the presentation layer: the user
//! triggers a run, then sends chat messages encrypted with that run's
//! sender-side sifted key. A new run replaces the previous one entirely.

use crate::{
    cipher::{self, CipherExchange},
    config::SimulationConfig,
    env::Environment,
    error::CipherError,
    simulation::{SimulationResult, run_simulation},
};

/// Session holding the most recent simulation run.
///
/// # Type Parameters
///
/// - `E`: Environment implementation for randomness
#[derive(Debug)]
pub struct Session<E: Environment> {
    /// Environment for randomness.
    env: E,

    /// Latest run, if any.
    last: Option<SimulationResult>,

    /// Completed runs.
    runs: u64,
}

impl<E: Environment> Session<E> {
    /// Create a session with no completed run.
    pub fn new(env: E) -> Self {
        Self { env, last: None, runs: 0 }
    }

    /// Run a simulation, replacing the previous result.
    pub fn run(&mut self, config: &SimulationConfig) -> &SimulationResult {
        let result = run_simulation(config, &self.env);
        self.runs += 1;
        self.last.insert(result)
    }

    /// Encrypt and decrypt `message` with the latest sifted key.
    ///
    /// # Errors
    ///
    /// - `CipherError::NoKey` if no run has completed or its key is empty
    /// - `CipherError::InvalidDigit` if the message is not all digits
    pub fn send(&self, message: &str) -> Result<CipherExchange, CipherError> {
        let key = self.last.as_ref().map(|r| r.sifted_key().sender()).unwrap_or_default();

        match cipher::exchange(message, key) {
            Ok(exchange) => {
                tracing::debug!(key_bits = exchange.key_bits_used(), "message exchanged");
                Ok(exchange)
            },
            Err(err) => {
                if err.is_warning() {
                    tracing::warn!("{err}");
                } else {
                    tracing::debug!("message rejected: {err}");
                }
                Err(err)
            },
        }
    }

    /// Latest run, if any.
    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last.as_ref()
    }

    /// Number of completed runs.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// The session's environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}
