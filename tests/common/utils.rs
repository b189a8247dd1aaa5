#![allow(dead_code)]

use httpmock::MockServer;
use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::net::TcpListener;

use score_gateway::run;
use score_gateway::config::settings::ApplicationSettings;
use score_gateway::config::store::StoreSettings;
use score_gateway::services::AirtableClient;
use score_gateway::telemetry::{get_subscriber, init_subscriber};

pub const BASE_ID: &str = "appTestBase";
pub const TABLE_ID: &str = "tblScores";
pub const VIEW_ID: &str = "viwLeaderboard";
pub const API_KEY: &str = "test-api-key";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub address: String,
    /// Stands in for the Airtable API.
    pub store: MockServer
}

impl TestApp {
    pub fn table_path(&self) -> String {
        format!("/{}/{}", BASE_ID, TABLE_ID)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_view(Some(VIEW_ID)).await
}

pub async fn spawn_app_with_view(view_id: Option<&str>) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let store = MockServer::start_async().await;

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let application = ApplicationSettings {
        port,
        host: "127.0.0.1".to_string(),
        log_level: "info".to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };
    let store_settings = StoreSettings {
        api_url: store.base_url(),
        base_id: BASE_ID.to_string(),
        table_id: TABLE_ID.to_string(),
        api_key: SecretString::new(API_KEY.into()),
        view_id: view_id.map(str::to_string),
        timeout_secs: 5,
    };
    let store_client = AirtableClient::new(&store_settings)
        .expect("Failed to build Airtable client");

    let server = run(listener, application, store_client)
        .expect("Failed to bind address");
    // Launch the server as a background task
    // tokio::spawn returns a handle to the spawned future,
    // but we have no use for it here, hence the non-binding let
    let _ = tokio::spawn(server);
    TestApp {
        address,
        store
    }
}
