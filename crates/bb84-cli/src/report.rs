//! Report rendering.
//!
//! A [`Report`] is built from one simulation run and the optional chat
//! exchange that followed it, then written either as a human-readable text
//! report or as JSON.

use std::io::{self, Write};

use bb84_core::{Bit, CipherError, CipherExchange, QubitView, SimulationResult};
use serde::Serialize;

use crate::error::CliError;

/// Warning shown when a message is sent without key material.
pub const NO_KEY_WARNING: &str = "No secure key established! Run simulation first.";

const QUBITS_PER_ROW: usize = 10;

/// Outcome of the chat step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Chat {
    /// Message encrypted and decrypted.
    Exchanged {
        /// Message as entered.
        message: String,
        /// Ciphertext digits.
        encrypted: String,
        /// Ciphertext decrypted with the same key.
        decrypted: String,
    },

    /// No key material was available.
    Warning {
        /// Message as entered.
        message: String,
        /// User-facing warning.
        warning: String,
    },

    /// Message was not a digit string.
    Rejected {
        /// Message as entered.
        message: String,
        /// Rejection reason.
        error: String,
    },
}

impl Chat {
    /// Describe a cipher outcome for `message`.
    pub fn from_outcome(message: &str, outcome: &Result<CipherExchange, CipherError>) -> Self {
        let message = message.to_string();
        match outcome {
            Ok(exchange) => Self::Exchanged {
                message,
                encrypted: exchange.encrypted().to_string(),
                decrypted: exchange.decrypted().to_string(),
            },
            Err(err) if err.is_warning() => {
                Self::Warning { message, warning: NO_KEY_WARNING.to_string() }
            },
            Err(err) => Self::Rejected { message, error: err.to_string() },
        }
    }
}

/// Everything printed for one invocation.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    secure_bits: usize,
    attacked_bits: usize,
    result: &'a SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat: Option<Chat>,
}

impl<'a> Report<'a> {
    /// Report for `result` without seed or chat.
    pub fn new(result: &'a SimulationResult) -> Self {
        Self {
            seed: None,
            secure_bits: result.secure_bits(),
            attacked_bits: result.attacked_bits(),
            result,
            chat: None,
        }
    }

    /// Record the seed the run was driven by.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Attach the chat outcome.
    #[must_use]
    pub fn with_chat(mut self, chat: Option<Chat>) -> Self {
        self.chat = chat;
        self
    }

    /// Chat outcome, if a message was sent.
    pub fn chat(&self) -> Option<&Chat> {
        self.chat.as_ref()
    }

    /// Write the human-readable report.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let config = self.result.config();
        writeln!(
            out,
            "BB84 simulation: {} qubits, eavesdropper: {}",
            config.qubits(),
            config.attack()
        )?;
        if let Some(seed) = self.seed {
            writeln!(out, "Seed: {seed}")?;
        }

        writeln!(out)?;
        writeln!(out, "Scoreboard")?;
        writeln!(out, "  Secure bits kept:    {}", self.secure_bits)?;
        writeln!(out, "  Bits lost to attack: {}", self.attacked_bits)?;

        writeln!(out)?;
        writeln!(out, "Qubits (basis/bit, ! = disturbed)")?;
        let cells: Vec<String> = self.result.views().map(cell).collect();
        for row in cells.chunks(QUBITS_PER_ROW) {
            writeln!(out, "  {}", row.join(" ").trim_end())?;
        }

        let key = self.result.sifted_key();
        writeln!(out)?;
        writeln!(out, "Sifted key ({} of {} qubits)", key.len(), config.qubits())?;
        writeln!(out, "  Indices:  {}", indices(key.indices()))?;
        writeln!(out, "  Sender:   {}", bits(key.sender()))?;
        writeln!(out, "  Receiver: {}", bits(key.receiver()))?;

        if let Some(chat) = &self.chat {
            writeln!(out)?;
            writeln!(out, "Secret chat")?;
            match chat {
                Chat::Exchanged { message, encrypted, decrypted } => {
                    writeln!(out, "  Message:   {message}")?;
                    writeln!(out, "  Encrypted: {encrypted}")?;
                    writeln!(out, "  Decrypted: {decrypted}")?;
                },
                Chat::Warning { warning, .. } => writeln!(out, "  Warning: {warning}")?,
                Chat::Rejected { error, .. } => writeln!(out, "  Rejected: {error}")?,
            }
        }

        Ok(())
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// - `CliError::Json` if serialization fails
    /// - `CliError::Io` if writing the trailing newline fails
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn cell(view: QubitView) -> String {
    let marker = if view.disturbed { '!' } else { ' ' };
    format!("{}/{}{}", view.basis.symbol(), view.bit, marker)
}

fn indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "(none)".to_string();
    }
    indices.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn bits(bits: &[Bit]) -> String {
    if bits.is_empty() {
        return "(none)".to_string();
    }
    bits.iter().map(|b| b.as_char()).collect()
}
