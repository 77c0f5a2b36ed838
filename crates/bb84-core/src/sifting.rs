//! Key sifting (basis reconciliation).
//!
//! Keeps only the positions where sender and receiver used the same basis.
//! Both sides of the key are read from the same filtered positions, so they
//! are index-aligned by construction.

use serde::Serialize;

use crate::{basis::Bit, measurement::QubitEvent};

/// Basis-matched key material for both parties.
///
/// # Invariants
///
/// - `indices`, `sender` and `receiver` have identical length
/// - `indices` is strictly ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiftedKey {
    indices: Vec<usize>,
    sender: Vec<Bit>,
    receiver: Vec<Bit>,
}

impl SiftedKey {
    /// Number of retained bits.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no position matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Original qubit indices of the retained positions.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Sender-side key.
    pub fn sender(&self) -> &[Bit] {
        &self.sender
    }

    /// Receiver-side key.
    pub fn receiver(&self) -> &[Bit] {
        &self.receiver
    }

    /// Positions where the two sides disagree.
    pub fn mismatches(&self) -> usize {
        self.sender.iter().zip(&self.receiver).filter(|(s, r)| s != r).count()
    }

    /// Fraction of disagreeing bits (0.0 for an empty key).
    #[allow(clippy::cast_precision_loss)]
    pub fn error_rate(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.mismatches() as f64 / self.len() as f64 }
    }
}

/// Retain basis-matched positions, in ascending index order.
pub fn sift(events: &[QubitEvent]) -> SiftedKey {
    let mut key = SiftedKey::default();

    for (index, event) in events.iter().enumerate().filter(|(_, e)| e.bases_match()) {
        key.indices.push(index);
        key.sender.push(event.sender_bit());
        key.receiver.push(event.receiver_bit());
    }

    key
}
