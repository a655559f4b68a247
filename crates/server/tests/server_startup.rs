use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::sleep;

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16, base_folder: &Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[storage]
base_folder = "{}"
"#,
        port,
        base_folder.display()
    )
}

/// Spawn the server and return a handle
fn spawn_server(config_path: &Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_tapedeck-server"))
        .env("TAPEDECK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_server_starts_and_creates_output_folder() {
    let port = get_available_port();
    let temp_dir = TempDir::new().unwrap();
    let base_folder = temp_dir.path().join("downloads");

    // Write temp config file
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(minimal_config(port, &base_folder).as_bytes())
        .unwrap();
    config_file.flush().unwrap();

    // Start server
    let mut server = spawn_server(config_file.path());

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );
    assert!(base_folder.is_dir());

    // Test health endpoint
    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let json: serde_json::Value =
        serde_json::from_str(&response.text().await.unwrap()).expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    // Cleanup
    server.kill().await.ok();
}

#[tokio::test]
async fn test_server_rejects_invalid_config() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(b"[crawl]\nmax_concurrent_tracks = 0\n")
        .unwrap();
    config_file.flush().unwrap();

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_tapedeck-server"))
        .env("TAPEDECK_CONFIG", config_file.path())
        .env("RUST_LOG", "error")
        .status()
        .await
        .expect("Failed to run server");

    assert_eq!(status.code(), Some(1));
}
