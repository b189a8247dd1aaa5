use std::net::TcpListener;

use score_gateway::run;
use score_gateway::config::settings::get_config;
use score_gateway::services::AirtableClient;
use score_gateway::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "score-gateway".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store_client = match AirtableClient::new(&config.store) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create Airtable client: {}", e);
            std::process::exit(1);
        }
    };
    if config.store.view_id.is_none() {
        tracing::warn!("No Airtable view configured, leaderboard reads will fail");
    }
    tracing::info!("Forwarding scores to {}", store_client.table_url());

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        config.application,
        store_client
    )?.await
}
