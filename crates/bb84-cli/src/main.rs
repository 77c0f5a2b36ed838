//! BB84 simulator binary.
//!
//! # Usage
//!
//! ```bash
//! # One run with OS entropy
//! bb84 --qubits 30 --attack yes --message 0110
//!
//! # Reproducible run as JSON
//! bb84 --seed 42 --format json
//! ```

use std::{
    io::{self, Write},
    process::ExitCode,
};

use bb84_cli::Args;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::debug!(qubits = args.qubits, attack = %args.attack, seed = ?args.seed, "bb84 starting");

    let mut stdout = io::stdout().lock();
    match bb84_cli::run(&args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "run failed");
            drop(stdout);
            if let Err(write_err) = writeln!(io::stderr(), "error: {err}") {
                tracing::debug!(?write_err, "failed to report error");
            }
            ExitCode::from(err.exit_code())
        },
    }
}
