use actix_web::web;

pub mod backend_health;
pub mod scores;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);
    // Catch-all, must stay last
    cfg.service(scores::score_resource());
}
