use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use log::{debug, info};

use crate::error::AppError;
use crate::files::models::MessageResponse;
use crate::storage::{Directory, FileStore, StorageError};
use crate::AppState;

/// Open a stored file as an attachment download.
async fn serve_file(
    store: &FileStore,
    directory: Directory,
    filename: &str,
) -> Result<NamedFile, AppError> {
    let path = store.existing_path(directory, filename).await?;
    debug!("Serving {}", path.display());

    let file = NamedFile::open_async(&path).await.map_err(StorageError::from)?;
    Ok(file
        .set_content_type(mime_guess::from_path(&path).first_or_octet_stream())
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        }))
}

async fn list_directory(state: &AppState, directory: Directory) -> Result<HttpResponse, AppError> {
    let names = state.store.list(directory).await?;
    debug!("{} entries in {}", names.len(), directory.as_str());
    Ok(HttpResponse::Ok().json(names))
}

async fn clear_directory(
    state: &AppState,
    directory: Directory,
    message: &str,
) -> Result<HttpResponse, AppError> {
    let removed = state.store.clear(directory).await?;
    info!("Deleted {} file(s) from {}", removed, directory.as_str());
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/download/documents/{filename}",
    tag = "Files",
    params(("filename" = String, Path, description = "Document file name")),
    responses(
        (status = 200, description = "Document bytes as a .docx attachment"),
        (status = 400, description = "Invalid file name", body = crate::ErrorResponse),
        (status = 404, description = "Document not found", body = crate::ErrorResponse)
    )
)]
pub async fn download_document(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<NamedFile, AppError> {
    let filename = path.into_inner();
    info!("Executing download_document for {}", filename);
    serve_file(&state.store, Directory::Documents, &filename).await
}

#[utoipa::path(
    get,
    path = "/download/pdfs/{filename}",
    tag = "Files",
    params(("filename" = String, Path, description = "PDF file name")),
    responses(
        (status = 200, description = "PDF bytes as an attachment"),
        (status = 400, description = "Invalid file name", body = crate::ErrorResponse),
        (status = 404, description = "PDF not found", body = crate::ErrorResponse)
    )
)]
pub async fn download_pdf(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<NamedFile, AppError> {
    let filename = path.into_inner();
    info!("Executing download_pdf for {}", filename);
    serve_file(&state.store, Directory::Pdfs, &filename).await
}

#[utoipa::path(
    get,
    path = "/list/documents",
    tag = "Files",
    responses((status = 200, description = "Generated documents", body = Vec<String>))
)]
pub async fn list_documents(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    list_directory(&state, Directory::Documents).await
}

#[utoipa::path(
    get,
    path = "/list/pdfs",
    tag = "Files",
    responses((status = 200, description = "Generated PDFs", body = Vec<String>))
)]
pub async fn list_pdfs(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    list_directory(&state, Directory::Pdfs).await
}

#[utoipa::path(
    get,
    path = "/list/templates",
    tag = "Files",
    responses((status = 200, description = "Available templates", body = Vec<String>))
)]
pub async fn list_templates(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    list_directory(&state, Directory::Templates).await
}

#[utoipa::path(
    get,
    path = "/delete/documents",
    tag = "Files",
    responses((status = 200, description = "All documents deleted", body = MessageResponse))
)]
pub async fn delete_documents(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    clear_directory(&state, Directory::Documents, "All documents deleted successfully").await
}

#[utoipa::path(
    get,
    path = "/delete/pdfs",
    tag = "Files",
    responses((status = 200, description = "All PDFs deleted", body = MessageResponse))
)]
pub async fn delete_pdfs(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    clear_directory(&state, Directory::Pdfs, "All pdfs deleted successfully").await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/download/documents/{filename}").route(web::get().to(download_document)),
    )
    .service(web::resource("/download/pdfs/{filename}").route(web::get().to(download_pdf)))
    .service(web::resource("/list/documents").route(web::get().to(list_documents)))
    .service(web::resource("/list/pdfs").route(web::get().to(list_pdfs)))
    .service(web::resource("/list/templates").route(web::get().to(list_templates)))
    .service(web::resource("/delete/documents").route(web::get().to(delete_documents)))
    .service(web::resource("/delete/pdfs").route(web::get().to(delete_pdfs)));
}
