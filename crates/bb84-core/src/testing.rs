//! Test environments shared by the unit tests.

use std::sync::{Arc, Mutex};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::env::Environment;

/// Seeded ChaCha environment.
#[derive(Clone)]
pub struct SeededEnv(Arc<Mutex<ChaCha8Rng>>);

impl SeededEnv {
    pub fn new(seed: u64) -> Self {
        Self(Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))))
    }
}

impl Environment for SeededEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.0.lock().unwrap().fill_bytes(buffer);
    }
}

/// Environment replaying a fixed byte script.
///
/// Panics when the script runs out, which makes unexpected draws visible.
#[derive(Clone)]
pub struct ScriptEnv(Arc<Mutex<std::vec::IntoIter<u8>>>);

impl ScriptEnv {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(Mutex::new(bytes.into_iter())))
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Environment for ScriptEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        let mut script = self.0.lock().unwrap();
        for byte in buffer {
            *byte = script.next().expect("script exhausted");
        }
    }
}
