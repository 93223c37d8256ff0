//! Runs the node binary through startup network selection.
//!
//! Run with:
//!   cargo test -p delorean-node --test startup

use std::path::PathBuf;
use std::process::{Command, Output};

struct DataDir(PathBuf);

impl DataDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("delorean_startup_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Self(dir)
    }
}

impl Drop for DataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn run_node(data_dir: &DataDir, flags: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_delorean-node"))
        .arg("--datadir")
        .arg(&data_dir.0)
        .arg("--print-params")
        .args(flags)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn delorean-node")
}

fn printed_params(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("params JSON on stdout")
}

#[test]
fn no_flags_selects_main() {
    let dir = DataDir::new("main");
    let params = printed_params(&run_node(&dir, &[]));
    assert_eq!(params["network"], "main");
    assert_eq!(params["default_port"], 20005);
    assert_eq!(params["message_start"], "9c85192f");
    assert!(dir.0.is_dir());
}

#[test]
fn testnet_flag_selects_test() {
    let dir = DataDir::new("test");
    let params = printed_params(&run_node(&dir, &["--testnet"]));
    assert_eq!(params["network"], "test");
    assert_eq!(params["rpc_port"], 20012);
    assert!(dir.0.join("testnet").is_dir());
}

#[test]
fn regtest_flag_selects_regtest() {
    let dir = DataDir::new("regtest");
    let params = printed_params(&run_node(&dir, &["--regtest"]));
    assert_eq!(params["network"], "regtest");
    assert_eq!(params["require_rpc_password"], false);
    assert_eq!(
        params["genesis_hash"],
        "ee49bd39ff3183e373d488b94fc3f22201c0357b312aa6447612bffba388a06e"
    );
}

#[test]
fn both_flags_abort_startup() {
    let dir = DataDir::new("both");
    let output = run_node(&dir, &["--testnet", "--regtest"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid combination of --regtest and --testnet"), "{stderr}");
    assert!(output.stdout.is_empty());
    assert!(!dir.0.exists());
}
