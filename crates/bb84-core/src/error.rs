//! Error types for configuration and the chat cipher.

use thiserror::Error;

/// Rejected simulation configuration.
///
/// Raised at the boundary, before any qubit is generated. A run either
/// completes fully or is never started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Qubit count outside the allowed range.
    #[error("qubit count {requested} outside allowed range {min}..={max}")]
    QubitCountOutOfRange {
        /// Requested qubit count.
        requested: usize,
        /// Smallest allowed count.
        min: usize,
        /// Largest allowed count.
        max: usize,
    },

    /// The range itself is unusable (empty, or admits zero qubits).
    #[error("invalid qubit range {min}..={max}")]
    InvalidRange {
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// Attack flag could not be parsed.
    #[error("invalid attack mode {value:?}, expected Yes or No")]
    InvalidAttackMode {
        /// The rejected input.
        value: String,
    },
}

/// Errors from the chat cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Sifted key is empty (or no simulation has run yet).
    #[error("no secure key established, run a simulation first")]
    NoKey,

    /// Message contains a character that is not a decimal digit.
    #[error("invalid digit {found:?} at position {position}")]
    InvalidDigit {
        /// Character index within the message.
        position: usize,
        /// The offending character.
        found: char,
    },
}

impl CipherError {
    /// Returns true if this is the user-visible empty-key warning.
    ///
    /// Warnings are reported to the user as-is. Everything else is an input
    /// rejection the caller should surface as invalid input.
    pub fn is_warning(&self) -> bool {
        match self {
            Self::NoKey => true,
            Self::InvalidDigit { .. } => false,
        }
    }
}
