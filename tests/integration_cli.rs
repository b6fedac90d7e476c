//! CLIの統合テスト
//!
//! 設定エラーでは一切の処理前に終了コード2で止まることを、実バイナリで確認する。

mod common;

use assert_cmd::Command;
use common::test_fixtures::ConfigFixture;
use predicates::prelude::*;

fn repomirror() -> Command {
    let mut cmd = Command::cargo_bin("repomirror").expect("binary built");
    cmd.env_remove("REPOMIRROR_CONFIG").arg("--no-color");
    cmd
}

fn config_yaml(root: &std::path::Path, repo_path: &str, mirrors: &str) -> String {
    format!(
        "root: {}\nprojects:\n  - name: libs\n    repos:\n      - libfoo: {}\nmirrors:{}\n",
        root.display(),
        repo_path,
        mirrors
    )
}

#[test]
fn test_nonexistent_repository_path_exits_with_config_error() {
    let fixture = ConfigFixture::with_repos(&[]);
    let config = fixture.write_config(&config_yaml(fixture.root(), "missing", " []"), 0o600);

    repomirror()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Mirroring").not())
        .stderr(predicate::str::contains("repository path"));
}

#[cfg(unix)]
#[test]
fn test_group_readable_config_is_rejected() {
    let fixture = ConfigFixture::with_repos(&["libfoo"]);
    let config = fixture.write_config(&config_yaml(fixture.root(), "libfoo", " []"), 0o644);

    repomirror()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Mirroring").not());
}

#[test]
fn test_missing_section_exits_with_config_error() {
    let fixture = ConfigFixture::with_repos(&["libfoo"]);
    let yaml = format!("root: {}\nmirrors: []\n", fixture.root().display());
    let config = fixture.write_config(&yaml, 0o600);

    repomirror()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("projects"));
}

#[test]
fn test_missing_config_file_exits_with_config_error() {
    let fixture = ConfigFixture::with_repos(&[]);

    repomirror()
        .arg("--config")
        .arg(fixture.root().join("nope.yml"))
        .assert()
        .code(2);
}

#[test]
fn test_valid_config_without_mirrors_succeeds() {
    let fixture = ConfigFixture::with_repos(&["libfoo"]);
    let config = fixture.write_config(&config_yaml(fixture.root(), "libfoo", " []"), 0o600);

    repomirror()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Mirroring completed"));
}

#[test]
fn test_unsupported_provider_only_is_skipped() {
    let fixture = ConfigFixture::with_repos(&["libfoo"]);
    let mirrors = "\n  - name: gitlab\n    token: glpat\n    organization: acme";
    let config = fixture.write_config(&config_yaml(fixture.root(), "libfoo", mirrors), 0o600);

    repomirror()
        .arg("--verbose")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Mirroring 1 repositories to 0 providers"))
        .stdout(predicate::str::contains("Skipped (unsupported provider): 1"));
}
