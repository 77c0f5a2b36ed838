//! Measurement simulation.
//!
//! Classical model of a BB84 measurement:
//!
//! - Matching bases: the receiver reads the sender's bit exactly.
//! - Mismatched bases: the receiver reads a uniform random bit.
//! - Eavesdropper: measures in a random basis and marks the qubit disturbed
//!   when that basis differs from the sender's.
//!
//! Disturbance is recorded but never flips the receiver's bit. The scorer
//! reports it as a separate counter, so the sifted keys always agree.
//!
//! # Draw order (per qubit)
//!
//! Eavesdropper basis (attack only), then the receiver's random bit (basis
//! mismatch only).

use serde::Serialize;

use crate::{
    basis::{Basis, Bit},
    config::AttackMode,
    env::Environment,
    generator::Preparation,
};

/// One transmitted qubit and everything observed about it.
///
/// Immutable once measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QubitEvent {
    sender_bit: Bit,
    sender_basis: Basis,
    receiver_basis: Basis,
    receiver_bit: Bit,
    #[serde(skip_serializing_if = "Option::is_none")]
    eavesdropper_basis: Option<Basis>,
    disturbed: bool,
}

impl QubitEvent {
    /// Send one qubit through the channel and measure it.
    pub fn measure<E: Environment>(
        sender_bit: Bit,
        sender_basis: Basis,
        receiver_basis: Basis,
        attack: AttackMode,
        env: &E,
    ) -> Self {
        let eavesdropper_basis = attack.is_enabled().then(|| env.random_basis());
        let disturbed = eavesdropper_basis.is_some_and(|eve| eve != sender_basis);

        let receiver_bit =
            if receiver_basis == sender_basis { sender_bit } else { env.random_bit() };

        Self {
            sender_bit,
            sender_basis,
            receiver_basis,
            receiver_bit,
            eavesdropper_basis,
            disturbed,
        }
    }

    /// Sender's encoded bit.
    pub fn sender_bit(&self) -> Bit {
        self.sender_bit
    }

    /// Basis the sender prepared in.
    pub fn sender_basis(&self) -> Basis {
        self.sender_basis
    }

    /// Basis the receiver measured in.
    pub fn receiver_basis(&self) -> Basis {
        self.receiver_basis
    }

    /// Bit the receiver observed.
    pub fn receiver_bit(&self) -> Bit {
        self.receiver_bit
    }

    /// Basis the eavesdropper measured in, if attacking.
    pub fn eavesdropper_basis(&self) -> Option<Basis> {
        self.eavesdropper_basis
    }

    /// Whether the eavesdropper disturbed this qubit.
    pub fn disturbed(&self) -> bool {
        self.disturbed
    }

    /// Whether sender and receiver used the same basis.
    pub fn bases_match(&self) -> bool {
        self.sender_basis == self.receiver_basis
    }
}

/// Transmit every prepared qubit, in index order.
pub fn transmit<E: Environment>(
    preparation: &Preparation,
    attack: AttackMode,
    env: &E,
) -> Vec<QubitEvent> {
    preparation
        .iter()
        .map(|(bit, sender, receiver)| QubitEvent::measure(bit, sender, receiver, attack, env))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptEnv, SeededEnv};

    #[test]
    fn matching_basis_reproduces_bit_without_draws() {
        let env = ScriptEnv::new(vec![]);
        for bit in [Bit::Zero, Bit::One] {
            for basis in Basis::ALL {
                let event = QubitEvent::measure(bit, basis, basis, AttackMode::Disabled, &env);
                assert_eq!(event.receiver_bit(), bit);
                assert!(!event.disturbed());
                assert!(event.bases_match());
                assert_eq!(event.eavesdropper_basis(), None);
            }
        }
    }

    #[test]
    fn mismatched_basis_draws_receiver_bit() {
        let env = ScriptEnv::new(vec![0, 1]);
        let cases =
            [(Bit::One, Basis::Rectilinear, Bit::Zero), (Bit::Zero, Basis::Diagonal, Bit::One)];

        for (sent, basis, drawn) in cases {
            let event =
                QubitEvent::measure(sent, basis, basis.conjugate(), AttackMode::Disabled, &env);
            assert!(!event.bases_match());
            assert_eq!(event.receiver_bit(), drawn);
        }
        assert_eq!(env.remaining(), 0);
    }

    #[test]
    fn eavesdropper_in_wrong_basis_disturbs() {
        // eve picks x against a + qubit
        let env = ScriptEnv::new(vec![1]);
        let event = QubitEvent::measure(
            Bit::One,
            Basis::Rectilinear,
            Basis::Rectilinear,
            AttackMode::Enabled,
            &env,
        );

        assert_eq!(event.eavesdropper_basis(), Some(Basis::Rectilinear.conjugate()));
        assert!(event.disturbed());
        // disturbance is tracked, not applied
        assert_eq!(event.receiver_bit(), Bit::One);
    }

    #[test]
    fn eavesdropper_in_right_basis_is_silent() {
        let env = ScriptEnv::new(vec![0]);
        let event = QubitEvent::measure(
            Bit::Zero,
            Basis::Rectilinear,
            Basis::Rectilinear,
            AttackMode::Enabled,
            &env,
        );

        assert_eq!(event.eavesdropper_basis(), Some(Basis::Rectilinear));
        assert!(!event.disturbed());
    }

    #[test]
    fn eavesdropper_draw_precedes_receiver_draw() {
        // eve: + (matches sender), receiver bit: 1
        let env = ScriptEnv::new(vec![2, 3]);
        let event = QubitEvent::measure(
            Bit::Zero,
            Basis::Rectilinear,
            Basis::Diagonal,
            AttackMode::Enabled,
            &env,
        );

        assert_eq!(event.eavesdropper_basis(), Some(Basis::Rectilinear));
        assert!(!event.disturbed());
        assert_eq!(event.receiver_bit(), Bit::One);
    }

    #[test]
    fn transmit_preserves_order_and_length() {
        let env = SeededEnv::new(5);
        let prep = Preparation::generate(30, &env);
        let events = transmit(&prep, AttackMode::Enabled, &env);

        assert_eq!(events.len(), prep.len());
        for (event, (bit, sender, receiver)) in events.iter().zip(prep.iter()) {
            assert_eq!(event.sender_bit(), bit);
            assert_eq!(event.sender_basis(), sender);
            assert_eq!(event.receiver_basis(), receiver);
            assert!(event.eavesdropper_basis().is_some());
        }
    }

    #[test]
    fn no_disturbance_without_attack() {
        let env = SeededEnv::new(6);
        let prep = Preparation::generate(50, &env);
        let events = transmit(&prep, AttackMode::Disabled, &env);
        assert!(events.iter().all(|e| !e.disturbed() && e.eavesdropper_basis().is_none()));
    }
}
