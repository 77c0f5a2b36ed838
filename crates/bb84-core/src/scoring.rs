//! Security scoring.
//!
//! Counts sifted positions flagged as disturbed. Flags at positions discarded
//! by sifting never contribute.

use serde::Serialize;

use crate::measurement::QubitEvent;

/// Secure vs. attacked bit tally for a sifted key.
///
/// # Invariants
///
/// - `secure_bits + attacked_bits` equals the sifted key length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    secure_bits: usize,
    attacked_bits: usize,
}

impl Scoreboard {
    /// Tally basis-matched qubits by disturbance flag.
    pub fn tally(events: &[QubitEvent]) -> Self {
        events.iter().filter(|e| e.bases_match()).fold(Self::default(), |mut board, event| {
            if event.disturbed() {
                board.attacked_bits += 1;
            } else {
                board.secure_bits += 1;
            }
            board
        })
    }

    /// Sifted bits with no recorded disturbance.
    pub fn secure_bits(&self) -> usize {
        self.secure_bits
    }

    /// Sifted bits the eavesdropper disturbed.
    pub fn attacked_bits(&self) -> usize {
        self.attacked_bits
    }

    /// Total sifted bits scored.
    pub fn total(&self) -> usize {
        self.secure_bits + self.attacked_bits
    }

    /// Fraction of attacked bits (0.0 when nothing was sifted).
    #[allow(clippy::cast_precision_loss)]
    pub fn attack_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.attacked_bits as f64 / total as f64,
        }
    }
}
