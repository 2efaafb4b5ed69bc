#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use people_core::{DocumentStore, Schema, SchemaGeneration};
use people_file::FileDocumentStore;
use people_server::api::{self, AppState};

/// A running API backed by a temp-dir file store.
pub struct TestApp {
    pub base: String,
    pub client: reqwest::Client,
    pub store: Arc<dyn DocumentStore>,
    shutdown: Option<oneshot::Sender<()>>,
    _dir: Option<TempDir>,
}

impl TestApp {
    pub async fn spawn(generation: SchemaGeneration) -> Self {
        let dir = TempDir::new().unwrap();
        let store: Arc<dyn DocumentStore> =
            Arc::new(FileDocumentStore::new(dir.path(), "persons").unwrap());
        Self::start(store, generation, Some(dir)).await
    }

    pub async fn spawn_with_store(
        store: Arc<dyn DocumentStore>,
        generation: SchemaGeneration,
    ) -> Self {
        Self::start(store, generation, None).await
    }

    async fn start(
        store: Arc<dyn DocumentStore>,
        generation: SchemaGeneration,
        dir: Option<TempDir>,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let state = AppState::new(store.clone(), Schema::new(generation));
        tokio::spawn(async move {
            api::serve(listener, state, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            store,
            shutdown: Some(tx),
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    /// POST a JSON body with a JSON content type.
    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// PUT a JSON body with a JSON content type.
    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_people"));
    cmd.args(args);
    cmd.env_remove("PEOPLE_SECRETS");
    cmd.env_remove("PEOPLE_STORE");
    cmd.output().expect("Failed to execute CLI")
}

/// Convert a directory into a file:// URL string.
pub fn file_url(path: &Path) -> String {
    url::Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}
