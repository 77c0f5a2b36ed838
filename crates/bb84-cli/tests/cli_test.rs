//! End-to-end tests for the command-line front end.
//!
//! Every run here is seeded, so reports are reproducible byte for byte.

use bb84_cli::{Args, CliError, NO_KEY_WARNING, run};
use bb84_core::{CipherError, ConfigError};
use clap::Parser;
use proptest::prelude::*;

fn parse(flags: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("bb84").chain(flags.iter().copied()))
        .expect("valid flags")
}

fn run_text(flags: &[&str]) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(&parse(flags), &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 report"))
}

fn run_json(flags: &[&str]) -> serde_json::Value {
    let mut flags = flags.to_vec();
    flags.extend(["--format", "json"]);

    let mut out = Vec::new();
    run(&parse(&flags), &mut out).expect("run succeeds");
    serde_json::from_slice(&out).expect("valid json")
}

#[test]
fn seeded_text_report_is_reproducible() {
    let flags = ["--seed", "42", "--qubits", "30", "--attack", "yes", "--message", "0101"];
    let first = run_text(&flags).expect("run succeeds");
    let second = run_text(&flags).expect("run succeeds");

    assert_eq!(first, second);
    assert!(first.starts_with("BB84 simulation: 30 qubits, eavesdropper: Yes\nSeed: 42\n"));
    assert!(first.contains("Secret chat"));
}

#[test]
fn json_report_is_consistent() {
    let value = run_json(&["--seed", "7", "--qubits", "50", "--attack", "yes"]);

    let qubits = value["result"]["qubits"].as_array().expect("qubit array");
    let sifted = value["result"]["sifted_key"]["indices"].as_array().expect("indices");
    let secure = value["secure_bits"].as_u64().expect("secure bits");
    let attacked = value["attacked_bits"].as_u64().expect("attacked bits");

    assert_eq!(qubits.len(), 50);
    assert_eq!(secure + attacked, sifted.len() as u64);
    assert!(qubits.iter().all(|q| q.get("eavesdropper_basis").is_some()));
    assert!(value.get("chat").is_none());
}

#[test]
fn json_without_attack_has_no_eavesdropper() {
    let value = run_json(&["--seed", "8"]);

    assert_eq!(value["attacked_bits"], 0);
    let qubits = value["result"]["qubits"].as_array().expect("qubit array");
    assert!(qubits.iter().all(|q| q.get("eavesdropper_basis").is_none()));
    assert!(qubits.iter().all(|q| q["disturbed"] == false));
}

#[test]
fn chat_round_trips_through_report() {
    let value = run_json(&["--seed", "11", "--qubits", "50", "--message", "0123456789"]);

    let chat = &value["chat"];
    assert_eq!(chat["status"], "exchanged");

    let encrypted = chat["encrypted"].as_str().expect("encrypted");
    let decrypted = chat["decrypted"].as_str().expect("decrypted");
    assert_eq!(encrypted.len(), decrypted.len());
    assert!("0123456789".starts_with(decrypted));
}

#[test]
fn out_of_range_qubits_rejected() {
    for qubits in ["9", "51", "0"] {
        let err = run_text(&["--qubits", qubits]).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::QubitCountOutOfRange { .. })));
        assert_eq!(err.exit_code(), 2);
    }
}

#[test]
fn invalid_attack_flag_rejected() {
    let err = Args::try_parse_from(["bb84", "--attack", "maybe"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(err.to_string().contains(r#"invalid attack mode "maybe""#));

    for accepted in ["yes", "Yes", "NO", "n"] {
        assert!(Args::try_parse_from(["bb84", "--attack", accepted]).is_ok());
    }
}

#[test]
fn invalid_message_rejected_after_report() {
    let mut out = Vec::new();
    let args = parse(&["--seed", "3", "--qubits", "50", "--message", "12x4"]);
    let err = run(&args, &mut out).unwrap_err();

    assert!(matches!(
        err,
        CliError::Message(CipherError::InvalidDigit { position: 2, found: 'x' })
    ));
    let text = String::from_utf8(out).expect("utf-8 report");
    assert!(text.contains("Rejected: invalid digit 'x' at position 2"));
}

#[test]
fn empty_message_exchanges_nothing() {
    let flags = ["--seed", "5", "--qubits", "20", "--message", ""];
    let text = run_text(&flags).expect("run succeeds");
    assert!(!text.contains("Sifted key (0 of"));
    assert!(text.contains("  Message:   \n"));
    assert!(text.contains("  Encrypted: \n"));
    assert!(text.contains("  Decrypted: \n"));
    assert!(!text.contains(NO_KEY_WARNING));
}

#[test]
fn reports_end_with_newline() {
    let text = run_text(&["--seed", "4", "--message", "12"]).expect("run succeeds");
    assert!(text.ends_with('\n'));

    let mut out = Vec::new();
    run(&parse(&["--seed", "4", "--format", "json"]), &mut out).expect("run succeeds");
    assert_eq!(out.last(), Some(&b'\n'));

    let mut out = Vec::new();
    let err = run(&parse(&["--seed", "4", "--message", "1?"]), &mut out).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(out.last(), Some(&b'\n'));
}

proptest! {
    #[test]
    fn prop_any_seed_reports_consistent_scoreboard(seed in any::<u64>(), attack in any::<bool>()) {
        let attack = if attack { "yes" } else { "no" };
        let seed = seed.to_string();
        let value = run_json(&["--seed", &seed, "--attack", attack]);

        let sifted = value["result"]["sifted_key"]["indices"].as_array().map_or(0, Vec::len);
        let total = value["secure_bits"].as_u64().unwrap_or(0)
            + value["attacked_bits"].as_u64().unwrap_or(0);
        prop_assert_eq!(total, sifted as u64);
    }
}
