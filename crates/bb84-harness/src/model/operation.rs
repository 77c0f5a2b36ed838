//! Operations for model-based testing.
//!
//! Operations represent everything a user can do in a session. They are
//! generated randomly by proptest and applied to both the model and the real
//! implementation.

use arbitrary::Arbitrary;

/// Operations that can be applied to a session.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Run a new simulation, replacing the previous one.
    Run {
        /// Requested qubit count (may fall outside the allowed range).
        qubits: u8,
        /// Whether the eavesdropper is active.
        attack: bool,
    },

    /// Send a chat message over the latest key.
    Send {
        /// Message content.
        message: SmallMessage,
    },
}

/// Small message content for testing.
///
/// Expands deterministically to a digit string, optionally with a single
/// non-digit character spliced in.
#[derive(Debug, Clone, Arbitrary)]
pub struct SmallMessage {
    /// Message seed (expanded to digits).
    pub seed: u8,
    /// Length hint (0-3 maps to empty/short/medium/long).
    pub size_class: u8,
    /// Position hint for a non-digit character, if any.
    pub poison: Option<u8>,
}

impl SmallMessage {
    /// Expand to the message text.
    pub fn to_text(&self) -> String {
        let len = match self.size_class % 4 {
            0 => 0,
            1 => 4,
            2 => 16,
            _ => 64,
        };

        let mut text: String = (0..len)
            .map(|i: u8| char::from(b'0' + self.seed.wrapping_add(i.wrapping_mul(7)) % 10))
            .collect();

        if let Some(hint) = self.poison {
            let at = usize::from(hint) % (text.len() + 1);
            text.insert(at, 'x');
        }

        text
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Qubit count outside the allowed range.
    InvalidQubitCount,

    /// No key available for the cipher.
    NoKey,

    /// Message contained a non-digit.
    InvalidDigit {
        /// Character index of the first non-digit.
        position: usize,
    },
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationResult::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}
