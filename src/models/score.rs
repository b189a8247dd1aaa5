use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// Airtable column names.
pub const USERNAME_FIELD: &str = "Username";
pub const SCORE_FIELD: &str = "Score";
pub const USER_ID_FIELD: &str = "User ID";

/// A validated and normalised submission, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub user_id: Uuid,
    pub username: String,
    pub score: u64,
}

/// Column layout of a score row as Airtable expects it.
#[derive(Debug, Serialize)]
pub struct ScoreFields<'a> {
    #[serde(rename = "Username")]
    pub username: &'a str,
    #[serde(rename = "Score")]
    pub score: u64,
    #[serde(rename = "User ID")]
    pub user_id: String,
}

impl<'a> From<&'a ScoreRecord> for ScoreFields<'a> {
    fn from(record: &'a ScoreRecord) -> Self {
        Self {
            username: &record.username,
            score: record.score,
            user_id: record.user_id.hyphenated().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PerformUpsert {
    #[serde(rename = "fieldsToMergeOn")]
    pub fields_to_merge_on: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UpsertRecord<'a> {
    pub fields: ScoreFields<'a>,
}

/// `PATCH` body that updates the row for a user or creates it.
#[derive(Debug, Serialize)]
pub struct UpsertRequest<'a> {
    #[serde(rename = "performUpsert")]
    pub perform_upsert: PerformUpsert,
    pub records: Vec<UpsertRecord<'a>>,
}

impl<'a> UpsertRequest<'a> {
    pub fn merge_on_user_id(record: &'a ScoreRecord) -> Self {
        Self {
            perform_upsert: PerformUpsert {
                fields_to_merge_on: vec![USER_ID_FIELD],
            },
            records: vec![UpsertRecord {
                fields: ScoreFields::from(record),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a list-records response.
#[derive(Debug, Deserialize)]
pub struct AirtableRecords {
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

/// A row of the public leaderboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub username: String,
    // Kept as a JSON number so integers are not rendered as floats
    pub score: Number,
}

impl TryFrom<&AirtableRecord> for LeaderboardEntry {
    type Error = String;

    fn try_from(record: &AirtableRecord) -> Result<Self, Self::Error> {
        let username = match record.fields.get(USERNAME_FIELD) {
            Some(Value::String(username)) => username.clone(),
            _ => return Err(format!("record {} has no string '{}'", record.id, USERNAME_FIELD)),
        };
        let score = match record.fields.get(SCORE_FIELD) {
            Some(Value::Number(score)) => score.clone(),
            _ => return Err(format!("record {} has no numeric '{}'", record.id, SCORE_FIELD)),
        };
        Ok(Self { username, score })
    }
}
