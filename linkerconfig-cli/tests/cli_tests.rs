use assert_cmd::Command;
use predicates::prelude::*;

const SPHAL_JSON: &str = r#"[
    {
        "name": "sphal",
        "isolated": true,
        "search_paths": [{"path": "/vendor/lib64"}]
    }
]"#;

#[test]
fn test_help_command() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("namespace configuration generator"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_flag() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linkerconfig"));
}

#[test]
fn test_version_command() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("/data/asan"));
}

#[test]
fn test_invalid_command() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_render_without_input() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_render_from_stdin() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .args(["render", "--input", "-"])
        .write_stdin(SPHAL_JSON)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "namespace.sphal.isolated = true\nnamespace.sphal.search.paths = /vendor/lib64\n",
        ));
}

#[test]
fn test_render_links_and_asan() {
    let json = r#"[
        {
            "name": "default",
            "search_paths": [{"path": "/system/lib64", "asan": "with_data_asan"}],
            "links": [
                {"target": "default_link_a", "shared_libs": ["libc.so"]},
                {"target": "system", "allow_all_shared_libs": true}
            ]
        }
    ]"#;

    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .args(["render", "-i", "-"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "namespace.default.asan.search.paths = /data/asan/system/lib64\n\
             namespace.default.asan.search.paths += /system/lib64\n",
        ))
        .stdout(predicate::str::contains(
            "namespace.default.links = default_link_a,system\n",
        ))
        .stdout(predicate::str::contains(
            "namespace.default.link.system.allow_all_shared_libs = true\n",
        ));
}

#[test]
fn test_render_to_output_file() {
    let output = std::env::temp_dir().join(format!("linkerconfig-test-{}.txt", std::process::id()));

    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .args(["render", "--input", "-", "--output"])
        .arg(&output)
        .write_stdin(SPHAL_JSON)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    let _ = std::fs::remove_file(&output);
    assert!(written.starts_with("namespace.sphal.isolated = true\n"));
}

#[test]
fn test_render_missing_file() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .args(["render", "--input", "/nonexistent/namespaces.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_render_rejects_duplicate_namespaces() {
    Command::new(env!("CARGO_BIN_EXE_linkerconfig"))
        .args(["render", "--input", "-"])
        .write_stdin(r#"[{"name": "default"}, {"name": "default"}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate namespace 'default'"));
}
