//! BB84 key distribution simulation.
//!
//! Sans-IO core of the simulator. Two parties agree on a shared key by
//! exchanging qubits in randomly chosen bases; an optional eavesdropper
//! measures in its own random basis and leaves a disturbance mark when it
//! guesses wrong.
//!
//! This is a classical probabilistic model of measurement outcomes, not a
//! physics engine: there are no amplitudes, only the observable statistics.
//!
//! ## Architecture
//!
//! ```text
//! bb84-core
//!   ├─ Environment        (injectable random source)
//!   ├─ Preparation        (sender bits/bases, receiver bases)
//!   ├─ QubitEvent         (measurement + eavesdropper disturbance)
//!   ├─ SiftedKey          (basis reconciliation)
//!   ├─ Scoreboard         (secure vs. attacked bits)
//!   ├─ cipher             (digit-stream XOR over the sifted key)
//!   └─ Session            (latest run + on-demand chat)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use bb84_core::{AttackMode, SimulationConfig, run_simulation};
//!
//! let config = SimulationConfig::new(20, AttackMode::Enabled)?;
//! let result = run_simulation(&config, &env);
//! assert_eq!(result.secure_bits() + result.attacked_bits(), result.sifted_key().len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod basis;
pub mod cipher;
pub mod config;
pub mod env;
pub mod error;
pub mod generator;
pub mod measurement;
pub mod scoring;
pub mod session;
pub mod sifting;
pub mod simulation;

#[cfg(test)]
mod testing;

pub use basis::{Basis, Bit};
pub use cipher::{CipherExchange, decrypt, encrypt, exchange};
pub use config::{AttackMode, DEFAULT_QUBITS, QubitRange, SimulationConfig};
pub use env::Environment;
pub use error::{CipherError, ConfigError};
pub use generator::Preparation;
pub use measurement::{QubitEvent, transmit};
pub use scoring::Scoreboard;
pub use session::Session;
pub use sifting::{SiftedKey, sift};
pub use simulation::{QubitView, SimulationResult, run_simulation};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
