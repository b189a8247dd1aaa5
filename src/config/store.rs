use serde::Deserialize;
use secrecy::SecretString;

fn default_api_url() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Connection details for the Airtable table that holds the scores.
#[derive(Deserialize, Debug, Clone)]
pub struct StoreSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub base_id: String,
    pub table_id: String,
    pub api_key: SecretString,
    // Only needed by the leaderboard read
    #[serde(default)]
    pub view_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StoreSettings {
    /// `{api_url}/{base_id}/{table_id}`
    pub fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.base_id,
            self.table_id
        )
    }

    /// Names of the required identifiers that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        use secrecy::ExposeSecret;

        let mut missing = Vec::new();
        if self.base_id.trim().is_empty() {
            missing.push("base_id");
        }
        if self.table_id.trim().is_empty() {
            missing.push("table_id");
        }
        if self.api_key.expose_secret().trim().is_empty() {
            missing.push("api_key");
        }
        missing
    }
}
