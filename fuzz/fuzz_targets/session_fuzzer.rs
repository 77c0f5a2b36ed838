//! Fuzz target for session operation sequences
//!
//! Replays arbitrary run/send sequences against both the real session and the
//! reference model, seeded identically.
//!
//! # Invariants
//!
//! - Model and session return the same result for every operation
//! - Model and session expose the same observable state after every operation
//! - NEVER panic on out-of-range qubit counts or malformed messages

#![no_main]

use arbitrary::Arbitrary;
use bb84_core::{AttackMode, CipherError, Session, SimulationConfig};
use bb84_harness::{ModelWorld, Operation, OperationError, OperationResult, SimEnv};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct SessionInput {
    seed: u64,
    ops: Vec<Operation>,
}

fn apply(session: &mut Session<SimEnv>, op: &Operation) -> OperationResult {
    match op {
        Operation::Run { qubits, attack } => {
            match SimulationConfig::new(usize::from(*qubits), AttackMode::from(*attack)) {
                Ok(config) => {
                    session.run(&config);
                    OperationResult::Ok
                },
                Err(_) => OperationResult::Error(OperationError::InvalidQubitCount),
            }
        },
        Operation::Send { message } => match session.send(&message.to_text()) {
            Ok(_) => OperationResult::Ok,
            Err(CipherError::NoKey) => OperationResult::Error(OperationError::NoKey),
            Err(CipherError::InvalidDigit { position, .. }) => {
                OperationResult::Error(OperationError::InvalidDigit { position })
            },
        },
    }
}

fuzz_target!(|input: SessionInput| {
    let mut model = ModelWorld::new(input.seed);
    let mut session = Session::new(SimEnv::with_seed(input.seed));

    for op in input.ops.iter().take(64) {
        let expected = model.apply(op);
        let actual = apply(&mut session, op);
        assert_eq!(expected, actual, "divergence on {op:?}");

        let state = model.observable_state();
        assert_eq!(state.runs, session.runs());
        if let Some(result) = session.last_result() {
            assert_eq!(state.sifted_indices, result.sifted_key().indices());
            assert_eq!(state.secure, result.secure_bits());
            assert_eq!(state.attacked, result.attacked_bits());
        }
    }
});
