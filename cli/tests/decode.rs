use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const EXAMPLE_LINE: &str = "x MCkxEDAOBgNVBAMMB0V4YW1wbGUxFTATBgNVBAoMDEV4YW1wbGUgQ29ycA== y Gis=";

fn fixture_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn revdec() -> Command {
    Command::cargo_bin("revdec").unwrap()
}

#[test]
fn test_decode_file_text() {
    revdec()
        .args(["decode", &fixture_path("entries.txt")])
        .assert()
        .success()
        .stdout(
            "issuer: /CN=Example/O=Example Corp serial: 1a2b\n\
             Couldn't decode entry: X base64data\n\
             issuer: /C=US/O=Org/OU=Unit/E=ca@example.com/1.2.3.4=x/CN=A\u{fffd}B serial: 00e5f1a2b3c4d5e6f708\n",
        );
}

#[test]
fn test_decode_stdin() {
    revdec()
        .arg("decode")
        .write_stdin(format!("{EXAMPLE_LINE}\r\n"))
        .assert()
        .success()
        .stdout("issuer: /CN=Example/O=Example Corp serial: 1a2b\n");
}

#[test]
fn test_decode_all_lines_fail_still_succeeds() {
    revdec()
        .arg("decode")
        .write_stdin("garbage\nmore garbage\n")
        .assert()
        .success()
        .stdout(
            "Couldn't decode entry: garbage\n\
             Couldn't decode entry: more garbage\n",
        );
}

#[test]
fn test_decode_empty_input() {
    revdec()
        .arg("decode")
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_decode_json() {
    revdec()
        .args(["decode", "-o", "json"])
        .write_stdin(format!("{EXAMPLE_LINE}\nbad\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "decoded""#))
        .stdout(predicate::str::contains(
            r#""issuer": "/CN=Example/O=Example Corp""#,
        ))
        .stdout(predicate::str::contains(r#""serial": "1a2b""#))
        .stdout(predicate::str::contains(r#""status": "failed""#))
        .stdout(predicate::str::contains("malformed line"));
}

#[test]
fn test_decode_yaml() {
    let output = revdec()
        .args(["decode", "--output", "yaml"])
        .write_stdin(EXAMPLE_LINE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_yml::Value = serde_yml::from_str(&stdout).unwrap();

    let report = &value[0];
    assert_eq!(Some("decoded"), report["status"].as_str());
    assert_eq!(Some(EXAMPLE_LINE), report["line"].as_str());
    assert_eq!(Some("/CN=Example/O=Example Corp"), report["issuer"].as_str());
    assert_eq!(Some("1a2b"), report["serial"].as_str());
}

#[test]
fn test_decode_logs_failures_to_stderr() {
    revdec()
        .arg("decode")
        .env_remove("RUST_LOG")
        .write_stdin("garbage\n")
        .assert()
        .success()
        .stdout("Couldn't decode entry: garbage\n")
        .stderr(predicate::str::contains("malformed line"));
}

#[test]
fn test_decode_verbose_logs_summary() {
    revdec()
        .args(["-v", "decode"])
        .env_remove("RUST_LOG")
        .write_stdin(EXAMPLE_LINE)
        .assert()
        .success()
        .stderr(predicate::str::contains("decoded 1 of 1 entries"));
}

#[test]
fn test_decode_missing_file() {
    revdec()
        .args(["decode", &fixture_path("does-not-exist.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn test_decode_invalid_utf8() {
    revdec()
        .arg("decode")
        .write_stdin(vec![0x78, 0x20, 0xff, 0xfe])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Utf8"));
}

#[test]
fn test_key_file_text() {
    revdec()
        .args(["key", &fixture_path("keys.txt")])
        .assert()
        .success()
        .stdout(
            "issuer: /CN=Example/O=Example Corp serial: 1a2b\n\
             subject: /CN=Example/O=Example Corp pubKeyHash: AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=\n\
             Couldn't decode key: bm9wZQ==\n",
        );
}

#[test]
fn test_key_json() {
    revdec()
        .args(["key", &fixture_path("keys.txt"), "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "subject_public_key""#))
        .stdout(predicate::str::contains(r#""pub_key_hash": "#));
}
