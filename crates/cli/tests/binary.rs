use std::process::{Command, Output};

fn beamhash_verify(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_beamhash-verify"))
        .args(args)
        .env_remove("BEAMHASH_LOG_LEVEL")
        .env_remove("BEAMHASH_LOG_FORMAT")
        .env_remove("BEAMHASH_LOG_TIMESTAMPS")
        .output()
        .expect("spawn beamhash-verify")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn help_and_version_exit_cleanly() {
    let help = beamhash_verify(&["help"]);
    assert!(help.status.success());
    assert!(stdout(&help).starts_with("Usage:"));

    let version = beamhash_verify(&["version"]);
    assert!(version.status.success());
    assert_eq!(
        stdout(&version),
        format!("beamhash-verify {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn invalid_solution_is_a_verdict_not_a_failure() {
    let header = "00".repeat(32);
    let solution = "00".repeat(104);
    let output = beamhash_verify(&[
        "verify",
        "--header",
        &header,
        "--nonce",
        "0000000000000000",
        "--solution",
        &solution,
        "--net-diff",
        "0",
        "--share-diff",
        "0",
        "--rounds",
        "3",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0 invalid");
}

#[test]
fn shape_errors_exit_with_status_one() {
    let header = "00".repeat(32);
    let output = beamhash_verify(&[
        "verify",
        "--header",
        &header,
        "--nonce",
        "00",
        "--solution",
        "00",
        "--net-diff",
        "0",
        "--share-diff",
        "0",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nonce"));
}

#[test]
fn bad_environment_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_beamhash-verify"))
        .arg("help")
        .env("BEAMHASH_LOG_FORMAT", "xml")
        .output()
        .expect("spawn beamhash-verify");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("BEAMHASH_LOG_FORMAT"));
}

#[test]
fn target_reached_json() {
    let output = beamhash_verify(&["target-reached", "--solution", "00", "--diff", "0", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["reached"], true);
}

#[test]
fn known_solution_is_a_block() {
    let header = "00".repeat(32);
    let solution = concat!(
        "1551ce1ca3e29487a8e1342770483e74ac90b0887c3d372e1396",
        "2c5f72e0329d3434db1fc79f308f4dc279c60aa9538d6379d9ef",
        "21d426f42440c4cecda70642073e7fe1f664742f45fc0fd9f1e9",
        "34363ede79bd23e27a192ef54a876c3379679dbbb19a133d24f0",
    );
    let run = |rounds: &str, net_diff: &str| {
        beamhash_verify(&[
            "verify",
            "--header",
            &header,
            "--nonce",
            "0000000000000000",
            "--solution",
            solution,
            "--net-diff",
            net_diff,
            "--share-diff",
            "1",
            "--rounds",
            rounds,
        ])
    };

    let block = run("0", "1");
    assert!(block.status.success());
    assert_eq!(stdout(&block), "3 valid-block");
    assert_eq!(stdout(&run("0", "0xe7ffffff")), "2 valid-share");
    assert_eq!(stdout(&run("3", "1")), "0 invalid");
}
