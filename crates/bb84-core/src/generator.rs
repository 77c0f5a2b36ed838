//! Random bit and basis generation.
//!
//! Produces the independent choices both parties make before any qubit is
//! sent: the sender's bits and bases, and the receiver's bases.
//!
//! # Draw order
//!
//! All sender bits, then all sender bases, then all receiver bases. Each draw
//! consumes one byte from the environment. Seeded runs depend on this order.

use crate::{
    basis::{Basis, Bit},
    env::Environment,
};

/// Random choices made by both parties for one run.
///
/// The three sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preparation {
    sender_bits: Vec<Bit>,
    sender_bases: Vec<Basis>,
    receiver_bases: Vec<Basis>,
}

impl Preparation {
    /// Draw `qubits` sender bits, sender bases and receiver bases.
    pub fn generate<E: Environment>(qubits: usize, env: &E) -> Self {
        let sender_bits = (0..qubits).map(|_| env.random_bit()).collect();
        let sender_bases = (0..qubits).map(|_| env.random_basis()).collect();
        let receiver_bases = (0..qubits).map(|_| env.random_basis()).collect();

        Self { sender_bits, sender_bases, receiver_bases }
    }

    /// Build a preparation from explicit choices.
    ///
    /// Returns `None` if the sequences differ in length.
    pub fn from_parts(
        sender_bits: Vec<Bit>,
        sender_bases: Vec<Basis>,
        receiver_bases: Vec<Basis>,
    ) -> Option<Self> {
        let n = sender_bits.len();
        if sender_bases.len() != n || receiver_bases.len() != n {
            return None;
        }
        Some(Self { sender_bits, sender_bases, receiver_bases })
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.sender_bits.len()
    }

    /// Check if no qubits were prepared.
    pub fn is_empty(&self) -> bool {
        self.sender_bits.is_empty()
    }

    /// Sender's raw bits.
    pub fn sender_bits(&self) -> &[Bit] {
        &self.sender_bits
    }

    /// Sender's preparation bases.
    pub fn sender_bases(&self) -> &[Basis] {
        &self.sender_bases
    }

    /// Receiver's measurement bases.
    pub fn receiver_bases(&self) -> &[Basis] {
        &self.receiver_bases
    }

    /// Iterate `(sender bit, sender basis, receiver basis)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Bit, Basis, Basis)> + '_ {
        self.sender_bits
            .iter()
            .zip(&self.sender_bases)
            .zip(&self.receiver_bases)
            .map(|((&bit, &sender), &receiver)| (bit, sender, receiver))
    }
}
