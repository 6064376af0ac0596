mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::services::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        std::io::Error::from(e)
    })?;

    log::info!("🚀 Starting User Service...");

    // One store client for the whole process, shared by every worker
    let store = database::connect(&settings).await.map_err(|e| {
        log::error!("❌ Failed to initialize store: {}", e);
        std::io::Error::from(e)
    })?;

    let service_data = web::Data::new(UserService::new(store));
    let allowed_origins = settings.cors_allowed_origins.clone();
    let bind_address = settings.bind_address();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        cors = if allowed_origins.is_empty() {
            cors.allow_any_origin()
        } else {
            allowed_origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin))
        };

        App::new()
            .app_data(service_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind(bind_address.as_str())?
    .run()
    .await
}
