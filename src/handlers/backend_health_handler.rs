use actix_web::HttpResponse;

use crate::models::common::HealthResponse;

pub async fn backend_health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::up())
}
