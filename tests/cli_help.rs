use assert_cmd::Command;

fn normalize_output(output: &[u8]) -> String {
    String::from_utf8_lossy(output).replace("\r\n", "\n")
}

#[test]
fn cli_help_prints_expected_banner() {
    let assert = Command::cargo_bin("goinit")
        .expect("binary")
        .arg("--help")
        .assert()
        .success();

    let stdout = normalize_output(&assert.get_output().stdout);
    assert!(stdout.contains("Create a Go module inside your GOPATH workspace"));
    assert!(stdout.contains("--no-git"));
    assert!(stdout.contains("--no-editor"));
}

#[test]
fn completions_flag_prints_bash_script() {
    let assert = Command::cargo_bin("goinit")
        .expect("binary")
        .args(["--completions", "bash"])
        .assert()
        .success();

    let stdout = normalize_output(&assert.get_output().stdout);
    assert!(stdout.contains("goinit"));
    assert!(stdout.contains("complete"));
}
