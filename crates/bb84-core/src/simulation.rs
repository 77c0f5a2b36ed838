//! End-to-end simulation run.
//!
//! ```text
//! Preparation ──► transmit ──► sift ──► Scoreboard::tally
//!   (bits, bases)   (QubitEvent)  (SiftedKey)
//! ```
//!
//! [`run_simulation`] is the single entry point the presentation layer calls.
//! It reads nothing but its arguments and the environment.

use serde::Serialize;

use crate::{
    basis::{Basis, Bit},
    config::SimulationConfig,
    env::Environment,
    generator::Preparation,
    measurement::{QubitEvent, transmit},
    scoring::Scoreboard,
    sifting::{SiftedKey, sift},
};

/// Per-qubit record handed to the visualization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QubitView {
    /// Basis the sender prepared in.
    pub basis: Basis,
    /// Sender's bit.
    pub bit: Bit,
    /// Whether the eavesdropper disturbed this qubit.
    pub disturbed: bool,
}

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    config: SimulationConfig,
    qubits: Vec<QubitEvent>,
    sifted_key: SiftedKey,
    scoreboard: Scoreboard,
}

impl SimulationResult {
    /// Assemble a result from an already measured qubit sequence.
    pub fn from_events(config: SimulationConfig, qubits: Vec<QubitEvent>) -> Self {
        let sifted_key = sift(&qubits);
        let scoreboard = Scoreboard::tally(&qubits);

        Self { config, qubits, sifted_key, scoreboard }
    }

    /// Configuration the run used.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Measured qubits, in transmission order.
    pub fn qubits(&self) -> &[QubitEvent] {
        &self.qubits
    }

    /// Basis-matched key material.
    pub fn sifted_key(&self) -> &SiftedKey {
        &self.sifted_key
    }

    /// Secure/attacked tally.
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Secure bit count.
    pub fn secure_bits(&self) -> usize {
        self.scoreboard.secure_bits()
    }

    /// Attacked bit count.
    pub fn attacked_bits(&self) -> usize {
        self.scoreboard.attacked_bits()
    }

    /// Visualization records, one per qubit.
    pub fn views(&self) -> impl Iterator<Item = QubitView> + '_ {
        self.qubits.iter().map(|q| QubitView {
            basis: q.sender_basis(),
            bit: q.sender_bit(),
            disturbed: q.disturbed(),
        })
    }

    /// Fraction of qubits that survived sifting.
    #[allow(clippy::cast_precision_loss)]
    pub fn sift_ratio(&self) -> f64 {
        if self.qubits.is_empty() {
            0.0
        } else {
            self.sifted_key.len() as f64 / self.qubits.len() as f64
        }
    }
}

/// Run generation, measurement, sifting and scoring for `config`.
pub fn run_simulation<E: Environment>(config: &SimulationConfig, env: &E) -> SimulationResult {
    let preparation = Preparation::generate(config.qubits(), env);
    tracing::debug!(qubits = preparation.len(), "prepared sender and receiver choices");

    let events = transmit(&preparation, config.attack(), env);
    tracing::debug!(attack = %config.attack(), "measured qubit sequence");

    let result = SimulationResult::from_events(*config, events);

    tracing::info!(
        qubits = config.qubits(),
        attack = %config.attack(),
        sifted = result.sifted_key().len(),
        secure = result.secure_bits(),
        attacked = result.attacked_bits(),
        "simulation complete"
    );

    result
}
