use std::env;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::SecretString;

use crate::config::store::StoreSettings;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub store: StoreSettings
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // The hosting platform exposes the Airtable bindings as flat env vars
    if let Ok(base_id) = env::var("AIRTABLE_BASE_ID") {
        settings.store.base_id = base_id;
    }
    if let Ok(table_id) = env::var("AIRTABLE_TABLE_ID") {
        settings.store.table_id = table_id;
    }
    if let Ok(api_key) = env::var("AIRTABLE_API_KEY") {
        settings.store.api_key = SecretString::new(api_key.into_boxed_str());
    }
    if let Ok(view_id) = env::var("AIRTABLE_VIEW_ID") {
        settings.store.view_id = Some(view_id);
    }

    let missing = settings.store.missing_fields();
    if !missing.is_empty() {
        return Err(ConfigError::Message(format!(
            "Missing store configuration: {}",
            missing.join(", ")
        )));
    }

    Ok(settings)
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
