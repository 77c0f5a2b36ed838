//! Scenario builder for deterministic end-to-end runs.
//!
//! A scenario configures one simulation run on a seeded [`SimEnv`], queues
//! chat messages to send over the resulting key, and checks the outcome:
//!
//! ```text
//! Scenario::new()
//!     .with_seed(7)
//!     .with_qubits(30)
//!     .with_attack(AttackMode::Enabled)
//!     .send("0110")
//!     .oracle(Box::new(|world| { ... }))
//!     .run()
//! ```
//!
//! Every run is checked against the protocol invariants before any custom
//! oracle sees the world (see [`check_invariants`]).

use bb84_core::{
    AttackMode, CipherError, CipherExchange, ConfigError, DEFAULT_QUBITS, QubitRange, Session,
    SimulationConfig, SimulationResult,
};

use crate::sim_env::{DEFAULT_SEED, SimEnv};

/// Custom check run against the finished world.
pub type Oracle = Box<dyn Fn(&ScenarioWorld) -> Result<(), String>>;

/// Scenario failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// The requested configuration was rejected.
    #[error("invalid scenario configuration: {0}")]
    Config(#[from] ConfigError),

    /// A built-in protocol invariant did not hold.
    #[error("invariant {invariant} violated: {detail}")]
    InvariantViolated {
        /// Short name of the invariant.
        invariant: &'static str,
        /// What was observed.
        detail: String,
    },

    /// A custom oracle rejected the world.
    #[error("oracle {index} failed: {reason}")]
    OracleFailed {
        /// Position of the oracle in registration order.
        index: usize,
        /// Reason returned by the oracle.
        reason: String,
    },
}

/// State after a scenario has run.
#[derive(Debug)]
pub struct ScenarioWorld {
    session: Session<SimEnv>,
    result: SimulationResult,
    exchanges: Vec<(String, Result<CipherExchange, CipherError>)>,
}

impl ScenarioWorld {
    /// Result of the simulation run.
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Session the scenario ran in.
    pub fn session(&self) -> &Session<SimEnv> {
        &self.session
    }

    /// Messages sent after the run, with their outcome.
    pub fn exchanges(&self) -> &[(String, Result<CipherExchange, CipherError>)] {
        &self.exchanges
    }

    /// Seed the run was driven by.
    pub fn seed(&self) -> u64 {
        self.session.env().seed()
    }
}

/// Builder for a single deterministic run.
pub struct Scenario {
    seed: u64,
    qubits: usize,
    attack: AttackMode,
    range: QubitRange,
    messages: Vec<String>,
    oracles: Vec<Oracle>,
}

impl Scenario {
    /// Default scenario: default seed, 20 qubits, no eavesdropper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            qubits: DEFAULT_QUBITS,
            attack: AttackMode::Disabled,
            range: QubitRange::default(),
            messages: Vec::new(),
            oracles: Vec::new(),
        }
    }

    /// Seed for the environment.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of qubits to transmit.
    #[must_use]
    pub fn with_qubits(mut self, qubits: usize) -> Self {
        self.qubits = qubits;
        self
    }

    /// Eavesdropper mode.
    #[must_use]
    pub fn with_attack(mut self, attack: AttackMode) -> Self {
        self.attack = attack;
        self
    }

    /// Allowed qubit range, for runs outside the default bounds.
    #[must_use]
    pub fn with_range(mut self, range: QubitRange) -> Self {
        self.range = range;
        self
    }

    /// Queue a chat message to send after the run.
    #[must_use]
    pub fn send(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Register a custom oracle.
    #[must_use]
    pub fn oracle(mut self, oracle: Oracle) -> Self {
        self.oracles.push(oracle);
        self
    }

    /// Execute the scenario.
    ///
    /// # Errors
    ///
    /// - `ScenarioError::Config` if the qubit count or range is rejected
    /// - `ScenarioError::InvariantViolated` if a protocol invariant fails
    /// - `ScenarioError::OracleFailed` if a custom oracle rejects the world
    pub fn run(self) -> Result<ScenarioWorld, ScenarioError> {
        let config = SimulationConfig::with_range(self.qubits, self.attack, self.range)?;

        let mut session = Session::new(SimEnv::with_seed(self.seed));
        let result = session.run(&config).clone();
        check_invariants(&result)?;

        let exchanges = self
            .messages
            .into_iter()
            .map(|message| {
                let outcome = session.send(&message);
                (message, outcome)
            })
            .collect::<Vec<_>>();
        check_exchanges(&result, &exchanges)?;

        let world = ScenarioWorld { session, result, exchanges };

        for (index, oracle) in self.oracles.iter().enumerate() {
            oracle(&world).map_err(|reason| ScenarioError::OracleFailed { index, reason })?;
        }

        tracing::debug!(
            seed = self.seed,
            qubits = self.qubits,
            oracles = self.oracles.len(),
            "scenario passed"
        );

        Ok(world)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the protocol invariants of a finished run.
///
/// - Sifted indices are exactly the positions with matching bases, ascending
/// - Both sifted keys have the sifted length and match the qubits they index
/// - Matching bases reproduce the sender's bit
/// - Secure plus attacked bits equals the sifted length
/// - Without an eavesdropper nothing is attacked or disturbed
///
/// # Errors
///
/// `ScenarioError::InvariantViolated` naming the first invariant that fails.
pub fn check_invariants(result: &SimulationResult) -> Result<(), ScenarioError> {
    let qubits = result.qubits();
    let key = result.sifted_key();

    if qubits.len() != result.config().qubits() {
        return Err(violation(
            "qubit-count",
            format!("{} qubits for a {}-qubit run", qubits.len(), result.config().qubits()),
        ));
    }

    let matching: Vec<usize> =
        qubits.iter().enumerate().filter(|(_, q)| q.bases_match()).map(|(i, _)| i).collect();
    if key.indices() != matching.as_slice() {
        return Err(violation(
            "sift-indices",
            format!("sifted {:?}, bases match at {:?}", key.indices(), matching),
        ));
    }

    if key.sender().len() != key.len() || key.receiver().len() != key.len() {
        return Err(violation(
            "sift-length",
            format!(
                "{} indices, {} sender bits, {} receiver bits",
                key.len(),
                key.sender().len(),
                key.receiver().len()
            ),
        ));
    }

    for (position, &index) in key.indices().iter().enumerate() {
        let qubit = &qubits[index];
        if key.sender()[position] != qubit.sender_bit()
            || key.receiver()[position] != qubit.receiver_bit()
        {
            return Err(violation("sift-alignment", format!("key position {position}")));
        }
        if qubit.receiver_bit() != qubit.sender_bit() {
            return Err(violation("matching-measurement", format!("qubit {index}")));
        }
    }

    let board = result.scoreboard();
    if board.total() != key.len() {
        return Err(violation(
            "score-conservation",
            format!(
                "{} secure + {} attacked != {} sifted",
                board.secure_bits(),
                board.attacked_bits(),
                key.len()
            ),
        ));
    }

    if !result.config().attack().is_enabled()
        && (board.attacked_bits() != 0 || qubits.iter().any(|q| q.disturbed()))
    {
        return Err(violation(
            "no-attack",
            format!("{} attacked bits without an eavesdropper", board.attacked_bits()),
        ));
    }

    Ok(())
}

fn check_exchanges(
    result: &SimulationResult,
    exchanges: &[(String, Result<CipherExchange, CipherError>)],
) -> Result<(), ScenarioError> {
    let key_len = result.sifted_key().len();

    for (message, outcome) in exchanges {
        match outcome {
            Ok(exchange) => {
                let expected = message.len().min(key_len);
                if exchange.key_bits_used() != expected || !exchange.round_trips() {
                    return Err(violation(
                        "cipher-round-trip",
                        format!("{message:?} gave {exchange:?} with {key_len} key bits"),
                    ));
                }
            },
            Err(CipherError::NoKey) if key_len == 0 => {},
            Err(CipherError::InvalidDigit { .. }) if !is_digits(message) => {},
            Err(err) => {
                return Err(violation("cipher-outcome", format!("{message:?} rejected: {err}")));
            },
        }
    }

    Ok(())
}

fn is_digits(message: &str) -> bool {
    message.chars().all(|c| c.is_ascii_digit())
}

fn violation(invariant: &'static str, detail: String) -> ScenarioError {
    ScenarioError::InvariantViolated { invariant, detail }
}
