use std::process::{Command, Output};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn texthash(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_texthash"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TEXTHASH_CLIPBOARD")
        .output()
        .expect("run texthash")
}

#[test]
fn osc52_copy_keeps_json_stdout_clean() {
    let output = texthash(&["--clipboard", "osc52", "--format", "json", "hash", "hello", "--copy"]);
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(payload["hash"], HELLO_SHA256);
    assert_eq!(payload["copied"], true);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\x1b]52;c;"));
}

#[test]
fn algorithm_flag_takes_display_names() {
    let output = texthash(&["hash", "hello", "-a", "SHA-256"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), HELLO_SHA256);

    let output = texthash(&["hash", "hello", "-a", "whirlpool"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn verify_exit_codes() {
    let output = texthash(&["verify", "hello", "--expected", HELLO_SHA256]);
    assert_eq!(output.status.code(), Some(0));

    let mut corrupted = HELLO_SHA256.to_string();
    corrupted.pop();
    corrupted.push('g');
    let output = texthash(&["verify", "hello", "--expected", &corrupted]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("MISMATCH"));

    let output = texthash(&["--max-input", "2", "verify", "hello", "--expected", HELLO_SHA256]);
    assert_eq!(output.status.code(), Some(2));
}
