//! Fuzz target for the chat cipher
//!
//! Arbitrary text against arbitrary keys, including non-digit and non-ASCII
//! input and empty keys.
//!
//! # Invariants
//!
//! - Empty key ALWAYS yields `NoKey`, whatever the message
//! - Any non-digit in the message yields `InvalidDigit` at its first position
//! - Otherwise output is exactly `min(len message, len key)` ASCII digits
//! - Decrypting the ciphertext restores the truncated plaintext
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use bb84_core::{decrypt, encrypt, Bit, CipherError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct CipherInput {
    message: String,
    key: Vec<bool>,
}

fuzz_target!(|input: CipherInput| {
    let key: Vec<Bit> = input.key.iter().copied().map(Bit::from).collect();
    let encrypted = encrypt(&input.message, &key);

    if key.is_empty() {
        assert_eq!(encrypted, Err(CipherError::NoKey));
        return;
    }

    if let Some(position) = input.message.chars().position(|c| !c.is_ascii_digit()) {
        match encrypted {
            Err(CipherError::InvalidDigit { position: reported, .. }) => {
                assert_eq!(reported, position);
            },
            other => panic!("non-digit at {position} accepted: {other:?}"),
        }
        return;
    }

    let encrypted = encrypted.expect("digit message with key must encrypt");
    let expected_len = input.message.len().min(key.len());
    assert_eq!(encrypted.len(), expected_len);
    assert!(encrypted.bytes().all(|b| b.is_ascii_digit()));

    let decrypted = decrypt(&encrypted, &key).expect("ciphertext is digits");
    assert_eq!(decrypted, input.message[..expected_len]);
});
