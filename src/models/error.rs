use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error as ThisError;

use crate::models::common::ErrorResponse;

/// A submission the client got wrong. The message is returned verbatim.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body is not valid JSON")]
    InvalidJson,

    #[error("JSON data is not an object")]
    NotAnObject,

    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    #[error("User ID is not a string")]
    UserIdNotString,

    #[error("User ID is not a valid UUID")]
    InvalidUserId,

    #[error("Score is not a number")]
    ScoreNotNumber,

    #[error("Score is negative")]
    NegativeScore,

    #[error("Username is not a string")]
    UsernameNotString,

    #[error("Username is empty")]
    EmptyUsername,
}

/// Failures talking to the Airtable REST API.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Request to Airtable failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Airtable returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid record data in Airtable: {0}")]
    Decode(String),

    #[error("No Airtable view is configured")]
    MissingView,

    #[error("Invalid Airtable URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Which gateway operation a store failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitScore,
    FetchLeaderboard,
}

impl Operation {
    fn failure_message(&self) -> &'static str {
        match self {
            Operation::SubmitScore => "Failed to save score",
            Operation::FetchLeaderboard => "Failed to fetch leaderboard",
        }
    }
}

#[derive(Debug, ThisError)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}: {source}", .operation.failure_message())]
    Store {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

impl GatewayError {
    pub fn store(operation: Operation, source: StoreError) -> Self {
        GatewayError::Store { operation, source }
    }

    /// What the caller gets to see. Store internals stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::Validation(e) => e.to_string(),
            GatewayError::Store { operation, .. } => operation.failure_message().to_string(),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let GatewayError::Store { source, .. } = self {
            tracing::error!(error = %source, "{}", self.client_message());
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.client_message(),
        })
    }
}
