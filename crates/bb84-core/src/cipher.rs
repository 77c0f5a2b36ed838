//! Chat cipher over the sifted key.
//!
//! A one-bit-per-digit stream XOR: each decimal digit of the message is XORed
//! with one sender-side key bit. Because key bits are 0 or 1, only the low bit
//! of a digit changes (`5 ^ 1 = 4`, `9 ^ 1 = 8`), so every output character is
//! still a single decimal digit and the operation is its own inverse.
//!
//! # Truncation
//!
//! Message and key are cut to the shorter of the two. Neither is ever read
//! past its end; the unused tail of the longer one is dropped silently.
//!
//! # Validation
//!
//! - Empty key: [`CipherError::NoKey`], checked first
//! - Any non-digit character anywhere in the message:
//!   [`CipherError::InvalidDigit`], even past the truncation point

use serde::Serialize;

use crate::{basis::Bit, error::CipherError};

/// Result of encrypting a message and immediately decrypting it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CipherExchange {
    plaintext: String,
    encrypted: String,
    decrypted: String,
}

impl CipherExchange {
    /// Plaintext actually covered by key material.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Ciphertext digits.
    pub fn encrypted(&self) -> &str {
        &self.encrypted
    }

    /// Ciphertext decrypted with the same key.
    pub fn decrypted(&self) -> &str {
        &self.decrypted
    }

    /// Number of key bits consumed.
    pub fn key_bits_used(&self) -> usize {
        self.encrypted.len()
    }

    /// Whether decryption reproduced the plaintext.
    pub fn round_trips(&self) -> bool {
        self.plaintext == self.decrypted
    }
}

/// Encrypt a digit string with the key.
pub fn encrypt(message: &str, key: &[Bit]) -> Result<String, CipherError> {
    apply_keystream(message, key)
}

/// Decrypt a digit string with the key.
pub fn decrypt(ciphertext: &str, key: &[Bit]) -> Result<String, CipherError> {
    apply_keystream(ciphertext, key)
}

/// Encrypt `message`, then decrypt the ciphertext with the same key.
pub fn exchange(message: &str, key: &[Bit]) -> Result<CipherExchange, CipherError> {
    let encrypted = encrypt(message, key)?;
    let decrypted = decrypt(&encrypted, key)?;
    let plaintext = message.chars().take(encrypted.len()).collect();

    Ok(CipherExchange { plaintext, encrypted, decrypted })
}

fn apply_keystream(input: &str, key: &[Bit]) -> Result<String, CipherError> {
    if key.is_empty() {
        return Err(CipherError::NoKey);
    }

    let digits = parse_digits(input)?;

    Ok(digits
        .iter()
        .zip(key)
        .map(|(&digit, bit)| char::from(b'0' + (digit ^ bit.as_u8())))
        .collect())
}

fn parse_digits(input: &str) -> Result<Vec<u8>, CipherError> {
    input
        .chars()
        .enumerate()
        .map(|(position, found)| {
            found
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(CipherError::InvalidDigit { position, found })
        })
        .collect()
}
