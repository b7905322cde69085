use actix_web::{web, HttpResponse};
use log::{error, info};
use sanitize_filename::Options;

use crate::error::AppError;
use crate::generator::{Generator, InvoiceDocumentGenerator, InvoiceJob};
use crate::invoice::models::{GenerateInvoiceResponse, InvoiceRequest};
use crate::storage::Directory;
use crate::AppState;

/// Longest base name that still fits a 255-byte file name once `.docx` is added.
const MAX_BASE_NAME_LEN: usize = 255 - ".docx".len();

/// Base name shared by the generated `.docx` and `.pdf`.
///
/// An over-long `filename` is shortened first so the invoice id survives.
pub fn document_base_name(filename: &str, invoice_id: &str) -> String {
    let clean = |part: &str| {
        sanitize_filename::sanitize_with_options(
            part,
            Options {
                truncate: false,
                ..Options::default()
            },
        )
    };
    let invoice_id = clean(invoice_id);
    let filename = clean(filename);

    let fixed = "invoice__[][]".len() + invoice_id.len();
    let filename = truncate_to(&filename, MAX_BASE_NAME_LEN.saturating_sub(fixed));
    let name = format!("invoice__[{}][{}]", filename, invoice_id);
    truncate_to(&name, MAX_BASE_NAME_LEN).to_string()
}

/// Longest prefix of `value` within `max` bytes, cut on a char boundary.
fn truncate_to(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[utoipa::path(
    post,
    path = "/generate/invoice/{filename}",
    tag = "Invoice",
    params(
        ("filename" = String, Path, description = "Name embedded in the generated file names")
    ),
    request_body = InvoiceRequest,
    responses(
        (status = 200, description = "Document and PDF generated", body = GenerateInvoiceResponse),
        (status = 400, description = "Invalid file or template name", body = crate::ErrorResponse),
        (status = 404, description = "Template not found", body = crate::ErrorResponse),
        (status = 422, description = "Template cannot be filled", body = crate::ErrorResponse),
        (status = 500, description = "Conversion or storage failure", body = crate::ErrorResponse)
    )
)]
pub async fn generate_invoice(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<InvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let filename = path.into_inner();
    let InvoiceRequest { invoice, template } = body.into_inner();
    info!(
        "Executing generate_invoice for '{}' (invoice {}, {} product(s))",
        filename,
        invoice.id,
        invoice.products.len()
    );

    state.store.clear(Directory::Documents).await?;
    state.store.clear(Directory::Pdfs).await?;

    let base_name = document_base_name(&filename, &invoice.id);
    let job = InvoiceJob {
        filename: format!("{}.docx", base_name),
        invoice,
        template,
    };
    let generator = InvoiceDocumentGenerator::new(state.store.clone());
    let document = web::block(move || generator.generate(job)).await??;
    info!(
        "Generated {} from template {}",
        document.filename, document.template
    );

    let pdf_dir = state.store.dir(Directory::Pdfs);
    let pdf_path = match state.converter.convert(&document.path, &pdf_dir).await {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to convert {} to PDF: {}", document.filename, e);
            return Err(e.into());
        }
    };
    info!("Converted {} to {}", document.filename, pdf_path.display());

    let pdf_name = format!("{}.pdf", base_name);
    Ok(HttpResponse::Ok().json(GenerateInvoiceResponse {
        message: "Invoice generated successfully".to_string(),
        docx: state.download_url(Directory::Documents, &document.filename),
        pdf: state.download_url(Directory::Pdfs, &pdf_name),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/generate/invoice/{filename}").route(web::post().to(generate_invoice)),
    );
}
