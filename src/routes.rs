use actix_web::{error, web, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::files::models::{MessageResponse, WelcomeResponse};
use crate::invoice::models::{GenerateInvoiceResponse, Invoice, InvoiceRequest, Product};
use crate::{files, invoice, ErrorResponse};

pub const SWAGGER_UI_PATH: &str = "/swagger-ui/";
pub const OPENAPI_PATH: &str = "/api-doc/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::invoice::handlers::generate_invoice,
        crate::files::handlers::download_document,
        crate::files::handlers::download_pdf,
        crate::files::handlers::list_documents,
        crate::files::handlers::list_pdfs,
        crate::files::handlers::list_templates,
        crate::files::handlers::delete_documents,
        crate::files::handlers::delete_pdfs,
    ),
    components(
        schemas(
            Product,
            Invoice,
            InvoiceRequest,
            GenerateInvoiceResponse,
            MessageResponse,
            WelcomeResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Invoice", description = "Invoice document generation."),
        (name = "Files", description = "Template, document and PDF listing, download and cleanup.")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    tag = "Files",
    responses((status = 200, description = "Welcome message with documentation links", body = WelcomeResponse))
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(WelcomeResponse {
        message: "Welcome to the invoice document generator".to_string(),
        docs: SWAGGER_UI_PATH.to_string(),
        openapi: OPENAPI_PATH.to_string(),
    })
}

/// Malformed JSON bodies get the same error shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::debug!("Rejected request body: {}", message);
        let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        error::InternalError::from_response(err, response).into()
    })
}

/// Register every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource("/").route(web::get().to(index)))
        .configure(invoice::handlers::config)
        .configure(files::handlers::config);
}
