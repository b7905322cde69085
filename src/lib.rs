use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod converter;
pub mod error;
pub mod files;
pub mod generator;
pub mod invoice;
pub mod routes;
pub mod state;
pub mod storage;

pub use crate::error::AppError;
pub use crate::state::AppState;

use crate::config::ServerConfig;
use crate::routes::{ApiDoc, OPENAPI_PATH};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }
}

/// Open CORS: any origin, method and header, with credentials.
/// Only suitable for a trusted local deployment.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState::from_config(&config);
    if let Err(e) = app_state.store.ensure_dirs() {
        log::error!(
            "Failed to create storage directories under {}: {}",
            app_state.store.root().display(),
            e
        );
        return Err(e);
    }
    let app_state = web::Data::new(app_state);

    let prometheus = PrometheusMetricsBuilder::new("invoice_docgen_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("failed to create Prometheus metrics middleware: {}", e)))?;

    log::info!(
        "Storage at {}, converter '{}'",
        config.storage_dir.display(),
        config.converter_bin
    );
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors())
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
