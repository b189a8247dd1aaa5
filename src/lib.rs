use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod utils;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::config::settings::ApplicationSettings;
use crate::services::AirtableClient;

pub fn run(
    listener: TcpListener,
    application: ApplicationSettings,
    store_client: AirtableClient
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let store_client = web::Data::new(store_client);
    let allowed_origins = application.allowed_origins;

    let server = HttpServer::new( move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(store_client.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
