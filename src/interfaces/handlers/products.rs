use actix_multipart::{form::tempfile::TempFile, form::MultipartForm, MultipartError};
use actix_web::{delete, error::PayloadError, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::{
    entities::product::ProductUpload,
    errors::AppError,
    infrastructure::storage::StagedFile,
    use_cases::catalog::UploadBatch,
    AppState,
};

#[get("/products")]
pub async fn list_products(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.list_products().await {
        Ok(products) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "products": products
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> impl Responder {
    match state.catalog.get_product(&id).await {
        Ok(product) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "product": product
        })),
        Err(e) => e.to_http_response(),
    }
}

#[post("/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    payload: Result<MultipartForm<ProductUpload>, actix_web::Error>,
) -> impl Responder {
    // Extractor errors (oversize file, malformed body) are mapped here so
    // the caller sees the upload taxonomy instead of a bare 400.
    let form = match payload {
        Ok(form) => form.into_inner(),
        Err(e) => return map_multipart_error(&e).to_http_response(),
    };

    let input = form.fields();
    let uploads = stage_uploads(&form);

    // `form` owns the temp files; it must outlive the store calls below.
    match state.catalog.create_product(input, uploads).await {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "productId": id,
            "message": "Product created successfully"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: Result<MultipartForm<ProductUpload>, actix_web::Error>,
) -> impl Responder {
    let form = match payload {
        Ok(form) => form.into_inner(),
        Err(e) => return map_multipart_error(&e).to_http_response(),
    };

    let input = form.fields();
    let uploads = stage_uploads(&form);

    match state.catalog.update_product(&id, input, uploads).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Product updated successfully"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> impl Responder {
    match state.catalog.delete_product(&id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Product deleted successfully"
        })),
        Err(e) => e.to_http_response(),
    }
}

fn stage_uploads(form: &ProductUpload) -> UploadBatch {
    UploadBatch {
        banner: form.banner.as_ref().map(staged),
        main_video: form.main_video.as_ref().map(staged),
        gallery: form.gallery.iter().map(staged).collect(),
    }
}

fn staged(file: &TempFile) -> StagedFile {
    StagedFile {
        temp_path: file.file.path().to_path_buf(),
        file_name: file
            .file_name
            .clone()
            .unwrap_or_else(|| "upload".to_string()),
        content_type: file
            .content_type
            .as_ref()
            .map(|m| m.essence_str().to_string()),
        size: file.size,
    }
}

fn map_multipart_error(err: &actix_web::Error) -> AppError {
    if let Some(multipart) = err.as_error::<MultipartError>() {
        if let MultipartError::Payload(PayloadError::Overflow) = multipart {
            return AppError::FileTooLarge("File exceeds the 100 MiB limit".into());
        }

        let msg = multipart.to_string();
        if msg.to_lowercase().contains("size limit") || msg.to_lowercase().contains("overflow") {
            return AppError::FileTooLarge("File exceeds the 100 MiB limit".into());
        }
        return AppError::UploadRejected(msg);
    }

    AppError::UploadRejected("Malformed multipart payload".into())
}
