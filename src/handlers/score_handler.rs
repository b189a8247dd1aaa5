use actix_web::{web, HttpResponse};

use crate::models::error::{GatewayError, Operation};
use crate::services::AirtableClient;
use crate::utils::validation::{parse_submission_body, validate_submission};

#[tracing::instrument(
    name = "Submit score",
    skip(body, store),
    fields(user_id = tracing::field::Empty)
)]
pub async fn submit_score(
    body: web::Bytes,
    store: web::Data<AirtableClient>,
) -> Result<HttpResponse, GatewayError> {
    let submission = parse_submission_body(&body)?;
    let record = validate_submission(&submission).map_err(|e| {
        tracing::info!("Rejected score submission: {}", e);
        e
    })?;
    tracing::Span::current().record("user_id", tracing::field::display(record.user_id));

    let saved = store
        .upsert_score(&record)
        .await
        .map_err(|e| GatewayError::store(Operation::SubmitScore, e))?;

    tracing::info!("Saved score {} for {}", record.score, record.user_id);
    Ok(HttpResponse::Ok().json(saved))
}

#[tracing::instrument(name = "Get leaderboard", skip(store))]
pub async fn get_leaderboard(
    store: web::Data<AirtableClient>,
) -> Result<HttpResponse, GatewayError> {
    let leaderboard = store
        .fetch_leaderboard()
        .await
        .map_err(|e| GatewayError::store(Operation::FetchLeaderboard, e))?;

    Ok(HttpResponse::Ok().json(leaderboard))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type("text/plain; charset=utf-8")
        .body("Method not allowed")
}
