//! Simulation configuration.
//!
//! Qubit counts are validated here, before a run starts. The default range
//! mirrors the interactive slider the simulator was designed around
//! (10 to 50 qubits, 20 by default).

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::ConfigError;

/// Smallest qubit count accepted by the default range.
pub const DEFAULT_MIN_QUBITS: usize = 10;

/// Largest qubit count accepted by the default range.
pub const DEFAULT_MAX_QUBITS: usize = 50;

/// Qubit count used when none is given.
pub const DEFAULT_QUBITS: usize = 20;

/// Whether an eavesdropper intercepts the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AttackMode {
    /// Clean channel.
    #[default]
    Disabled,
    /// Eavesdropper measures every qubit in a random basis.
    Enabled,
}

impl AttackMode {
    /// Check if the eavesdropper is active.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for AttackMode {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl FromStr for AttackMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "on" => Ok(Self::Enabled),
            "no" | "n" | "false" | "off" => Ok(Self::Disabled),
            _ => Err(ConfigError::InvalidAttackMode { value: s.to_string() }),
        }
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "Yes"),
            Self::Disabled => write!(f, "No"),
        }
    }
}

/// Inclusive range of accepted qubit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QubitRange {
    min: usize,
    max: usize,
}

impl QubitRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` if `min` is zero or exceeds `max`.
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest accepted count.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Largest accepted count.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Check whether `qubits` falls inside the range.
    pub fn contains(&self, qubits: usize) -> bool {
        (self.min..=self.max).contains(&qubits)
    }

    fn check(&self, qubits: usize) -> Result<usize, ConfigError> {
        if self.contains(qubits) {
            Ok(qubits)
        } else {
            Err(ConfigError::QubitCountOutOfRange {
                requested: qubits,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for QubitRange {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_QUBITS, max: DEFAULT_MAX_QUBITS }
    }
}

/// Validated configuration for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    qubits: usize,
    attack: AttackMode,
    #[serde(skip)]
    range: QubitRange,
}

impl SimulationConfig {
    /// Create a configuration checked against the default range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::QubitCountOutOfRange` for counts outside
    /// 10..=50.
    pub fn new(qubits: usize, attack: AttackMode) -> Result<Self, ConfigError> {
        Self::with_range(qubits, attack, QubitRange::default())
    }

    /// Create a configuration checked against a custom range.
    pub fn with_range(
        qubits: usize,
        attack: AttackMode,
        range: QubitRange,
    ) -> Result<Self, ConfigError> {
        let qubits = range.check(qubits)?;
        Ok(Self { qubits, attack, range })
    }

    /// Number of qubits to transmit.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Eavesdropper setting.
    pub fn attack(&self) -> AttackMode {
        self.attack
    }

    /// Range this configuration was validated against.
    pub fn range(&self) -> QubitRange {
        self.range
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { qubits: DEFAULT_QUBITS, attack: AttackMode::Disabled, range: QubitRange::default() }
    }
}
