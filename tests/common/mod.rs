//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::net::TcpListener;

use rfm_choice_service::config::ServiceConfig;
use rfm_choice_service::http::{AppState, HttpServer};
use rfm_choice_service::lifecycle::{startup, Shutdown};

/// Customer dataset used by most tests.
#[allow(dead_code)]
pub const DATASET: &str = "\
Customer_ID,Segment,Pred_Repurchase_Count,Recency
42,High,3.5,10
7,Medium,1.25,40
3,Low,0.5,200
11,,,90
12,Platinum,2,5
bad-id,High,9,1
";

/// A running service on an ephemeral port, backed by a temp data directory.
pub struct TestService {
    pub base_url: String,
    pub client: reqwest::Client,
    pub dir: TempDir,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestService {
    /// Start with the default dataset.
    pub async fn start() -> Self {
        Self::start_with_dataset(DATASET).await
    }

    /// Start with the given `df_ui.csv` content.
    pub async fn start_with_dataset(dataset: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("df_ui.csv"), dataset).unwrap();

        let config = test_config(&dir);
        let state = startup::prepare_state(&config.data).unwrap();
        Self::spawn(config, state, dir).await
    }

    /// Start a server around a prebuilt state.
    pub async fn spawn(config: ServiceConfig, state: AppState, dir: TempDir) -> Self {
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        let server = HttpServer::new(config, state);
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        Self {
            base_url: format!("http://{}", addr),
            client,
            dir,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn choice_log_path(&self) -> PathBuf {
        self.dir.path().join("choice_log.csv")
    }

    pub fn choice_log(&self) -> String {
        fs::read_to_string(self.choice_log_path()).unwrap()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("service unreachable")
    }

    pub async fn post_choice(&self, customer_id: i64, option: &str) -> reqwest::Response {
        self.client
            .post(self.url("/choice"))
            .json(&serde_json::json!({
                "customer_id": customer_id,
                "selected_option": option,
            }))
            .send()
            .await
            .expect("service unreachable")
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Default config pointed at `dir`, listening on an ephemeral local port.
pub fn test_config(dir: &TempDir) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.data.root = dir.path().to_path_buf();
    config
}
