use actix_web::{http::StatusCode, HttpResponse};

pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": error,
        "details": details
    }))
}

/// Default service: anything that matches no route gets a JSON 404.
pub async fn not_found() -> HttpResponse {
    json_error(StatusCode::NOT_FOUND, "Not found", "The requested resource does not exist")
}
