//! Model world - the reference session.
//!
//! Keeps a run as plain parallel arrays of 0/1 values and recomputes sifting,
//! scoring and the cipher directly from them. It draws from its own ChaCha
//! stream in the same order as the real pipeline, so a model and a `SimEnv`
//! built from the same seed must agree on every observable value.

use bb84_core::config::{DEFAULT_MAX_QUBITS, DEFAULT_MIN_QUBITS};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::operation::{Operation, OperationError, OperationResult};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservableState {
    /// Completed runs.
    pub runs: u64,
    /// Sender bits of the latest run.
    pub sender_bits: Vec<u8>,
    /// Receiver bits of the latest run.
    pub receiver_bits: Vec<u8>,
    /// Qubit indices kept by sifting.
    pub sifted_indices: Vec<usize>,
    /// Sender-side sifted key.
    pub key: Vec<u8>,
    /// Sifted bits the eavesdropper left untouched.
    pub secure: usize,
    /// Sifted bits the eavesdropper disturbed.
    pub attacked: usize,
    /// Latest successful (encrypted, decrypted) pair.
    pub last_exchange: Option<(String, String)>,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    rng: ChaCha8Rng,
    sender_bits: Vec<u8>,
    sender_bases: Vec<u8>,
    receiver_bases: Vec<u8>,
    receiver_bits: Vec<u8>,
    disturbed: Vec<bool>,
    runs: u64,
    last_exchange: Option<(String, String)>,
}

impl ModelWorld {
    /// Create a model drawing from the stream of `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sender_bits: Vec::new(),
            sender_bases: Vec::new(),
            receiver_bases: Vec::new(),
            receiver_bits: Vec::new(),
            disturbed: Vec::new(),
            runs: 0,
            last_exchange: None,
        }
    }

    /// Apply an operation and return the result.
    ///
    /// The result should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Run { qubits, attack } => self.apply_run(usize::from(*qubits), *attack),
            Operation::Send { message } => self.apply_send(&message.to_text()),
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let sifted_indices = self.sifted_indices();
        let key = sifted_indices.iter().map(|&i| self.sender_bits[i]).collect();
        let attacked = sifted_indices.iter().filter(|&&i| self.disturbed[i]).count();

        ObservableState {
            runs: self.runs,
            sender_bits: self.sender_bits.clone(),
            receiver_bits: self.receiver_bits.clone(),
            secure: sifted_indices.len() - attacked,
            attacked,
            sifted_indices,
            key,
            last_exchange: self.last_exchange.clone(),
        }
    }

    fn apply_run(&mut self, qubits: usize, attack: bool) -> OperationResult {
        if !(DEFAULT_MIN_QUBITS..=DEFAULT_MAX_QUBITS).contains(&qubits) {
            return OperationResult::Error(OperationError::InvalidQubitCount);
        }

        self.sender_bits = (0..qubits).map(|_| self.draw()).collect();
        self.sender_bases = (0..qubits).map(|_| self.draw()).collect();
        self.receiver_bases = (0..qubits).map(|_| self.draw()).collect();
        self.receiver_bits.clear();
        self.disturbed.clear();

        for i in 0..qubits {
            let disturbed = attack && self.draw() != self.sender_bases[i];
            let bit = if self.sender_bases[i] == self.receiver_bases[i] {
                self.sender_bits[i]
            } else {
                self.draw()
            };
            self.disturbed.push(disturbed);
            self.receiver_bits.push(bit);
        }

        self.runs += 1;
        OperationResult::Ok
    }

    fn apply_send(&mut self, message: &str) -> OperationResult {
        let key: Vec<u8> = self.sifted_indices().iter().map(|&i| self.sender_bits[i]).collect();
        if key.is_empty() {
            return OperationResult::Error(OperationError::NoKey);
        }

        if let Some(position) = message.chars().position(|c| !c.is_ascii_digit()) {
            return OperationResult::Error(OperationError::InvalidDigit { position });
        }

        let xor = |text: &str| -> String {
            text.bytes().zip(&key).map(|(c, k)| char::from(b'0' + ((c - b'0') ^ k))).collect()
        };
        let encrypted = xor(message);
        let decrypted = xor(&encrypted);

        self.last_exchange = Some((encrypted, decrypted));
        OperationResult::Ok
    }

    fn sifted_indices(&self) -> Vec<usize> {
        (0..self.sender_bases.len())
            .filter(|&i| self.sender_bases[i] == self.receiver_bases[i])
            .collect()
    }

    fn draw(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.rng.fill_bytes(&mut byte);
        byte[0] & 1
    }
}
