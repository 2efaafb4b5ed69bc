//! CLI tests for the `people` binary.

mod common;

use tempfile::TempDir;

use people_core::{SecretName, SecretsProvider, StoreCredentials};
use people_file::FileSecretsProvider;

use common::{file_url, run_cli};

#[test]
fn test_version_flag() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("people "));
}

#[test]
fn test_serve_requires_store() {
    let output = run_cli(&["serve"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--store"));
}

#[test]
fn test_serve_network_store_without_secrets_fails() {
    let output = run_cli(&[
        "serve",
        "--listen",
        "127.0.0.1:0",
        "--store",
        "https://docs.example.invalid",
    ]);
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_add_secret_versions() {
    let temp_dir = TempDir::new().unwrap();
    let secrets_url = file_url(temp_dir.path());
    let creds_path = temp_dir.path().join("creds.json");
    std::fs::write(&creds_path, r#"{"projectId": "p", "accessToken": "t"}"#).unwrap();

    for expected in ["version 1", "version 2"] {
        let output = run_cli(&[
            "add-secret",
            "--secrets",
            &secrets_url,
            "--name",
            "people-store-credentials",
            creds_path.to_str().unwrap(),
        ]);
        assert!(
            output.status.success(),
            "add-secret failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(String::from_utf8_lossy(&output.stdout).contains(expected));
    }

    let provider = FileSecretsProvider::new(temp_dir.path());
    let payload = provider
        .latest(&SecretName::new("people-store-credentials").unwrap())
        .await
        .unwrap();
    let credentials = StoreCredentials::from_secret(payload.as_bytes()).unwrap();
    assert_eq!(credentials.project_id(), "p");
}

#[test]
fn test_add_secret_rejects_network_url() {
    let output = run_cli(&[
        "add-secret",
        "--secrets",
        "https://secrets.example.com",
        "--name",
        "x",
        "-",
    ]);
    assert!(!output.status.success());
}
