//! Startup and degraded-state behavior.

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::fs;

use rfm_choice_service::choices::ChoiceLog;
use rfm_choice_service::dataset::DatasetError;
use rfm_choice_service::http::AppState;
use rfm_choice_service::lifecycle::startup::{self, StartupError};

mod common;
use common::{test_config, TestService};

#[test]
fn test_dataset_without_id_column_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("df_ui.csv"), "CustomerNumber,Segment\n1,High\n").unwrap();

    let err = startup::prepare_state(&test_config(&dir).data).unwrap_err();
    assert!(matches!(err, StartupError::Dataset(DatasetError::MissingIdColumn(_))));
}

#[test]
fn test_config_file_drives_data_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("api")).unwrap();
    fs::write(dir.path().join("api").join("customers.csv"), "Customer ID,Segment\n5,Medium\n").unwrap();

    let config_path = dir.path().join("service.toml");
    fs::write(
        &config_path,
        "[data]\nroot = \"api\"\ncustomers_file = \"customers.csv\"\nchoice_log_file = \"choices.csv\"\n",
    )
    .unwrap();

    let config = startup::load_config(Some(&config_path)).unwrap();
    let state = startup::prepare_state(&config.data).unwrap();

    assert!(state.customers.unwrap().get(5).is_some());
    assert!(dir.path().join("api").join("choices.csv").exists());
}

#[test]
fn test_invalid_config_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("service.toml");
    fs::write(&config_path, "[listener]\nbind_address = \"nowhere\"\n").unwrap();

    let err = startup::load_config(Some(&config_path)).unwrap_err();
    assert!(matches!(err, StartupError::Config(_)));
}

#[tokio::test]
async fn test_server_without_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let state = AppState::without_dataset(ChoiceLog::new(config.data.choice_log_path()));
    let service = TestService::spawn(config, state, dir).await;

    assert_eq!(service.get("/health").await.status(), StatusCode::OK);

    let res = service.get("/customer/42").await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "detail": "customer dataset not loaded" })
    );

    let res = service.post_choice(42, "Gift").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(!service.choice_log_path().exists());

    let res = service.get("/choice/latest/42").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "detail": "No choices yet" }));
}
