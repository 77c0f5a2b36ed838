//! BB84 command-line simulator.
//!
//! Wires the sans-IO core to the outside world:
//! - OS entropy, or a seeded `SimEnv` for reproducible runs
//! - Command-line flags parsed with clap
//! - Text or JSON reports written to any `io::Write`
//!
//! ## Architecture
//!
//! ```text
//! bb84-cli
//!   ├─ Args               (flags)
//!   ├─ SystemEnv          (OS entropy Environment impl)
//!   ├─ Session            (run + chat, from bb84-core)
//!   └─ Report             (text / JSON rendering)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod report;
mod system_env;

use std::io::Write;

use bb84_core::{AttackMode, DEFAULT_QUBITS, Environment, Session, SimulationConfig};
use bb84_harness::SimEnv;
use clap::{Parser, ValueEnum};
pub use error::CliError;
pub use report::{Chat, NO_KEY_WARNING, Report};
pub use system_env::SystemEnv;

/// BB84 quantum key distribution simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "bb84")]
#[command(about = "Simulate BB84 key distribution with an optional eavesdropper")]
#[command(version)]
pub struct Args {
    /// Number of qubits to transmit (10-50)
    #[arg(short, long, default_value_t = DEFAULT_QUBITS)]
    pub qubits: usize,

    /// Eavesdropper on the channel (yes or no)
    #[arg(short, long, default_value = "no", value_parser = clap::value_parser!(AttackMode))]
    pub attack: AttackMode,

    /// Digits to send over the established key
    #[arg(short, long)]
    pub message: Option<String>,

    /// Seed for a reproducible run (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable report.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Run one simulation as described by `args` and write the report to `out`.
///
/// # Errors
///
/// - `CliError::Config` if the qubit count is rejected
/// - `CliError::Message` if the chat message is not a digit string (the
///   report is still written first)
/// - `CliError::Io` / `CliError::Json` if writing the report fails
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let config = SimulationConfig::new(args.qubits, args.attack)?;

    match args.seed {
        Some(seed) => execute(SimEnv::with_seed(seed), &config, args, out),
        None => execute(SystemEnv::new(), &config, args, out),
    }
}

fn execute<E: Environment, W: Write>(
    env: E,
    config: &SimulationConfig,
    args: &Args,
    out: &mut W,
) -> Result<(), CliError> {
    let mut session = Session::new(env);
    let result = session.run(config).clone();

    let outcome = args.message.as_deref().map(|message| (message, session.send(message)));
    let chat = outcome.as_ref().map(|(message, sent)| Chat::from_outcome(message, sent));

    let report = Report::new(&result).with_seed(args.seed).with_chat(chat);
    match args.format {
        Format::Text => report.write_text(out)?,
        Format::Json => report.write_json(out)?,
    }

    match outcome {
        Some((_, Err(err))) if !err.is_warning() => Err(err.into()),
        _ => Ok(()),
    }
}
