use actix_web::web;

use crate::handlers::score_handler::{get_leaderboard, method_not_allowed, submit_score};

/// The gateway dispatches on method alone, whatever the path.
pub fn score_resource() -> actix_web::Resource {
    web::resource("/{tail:.*}")
        .route(web::post().to(submit_score))
        .route(web::get().to(get_leaderboard))
        .default_service(web::to(method_not_allowed))
}
