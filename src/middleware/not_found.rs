use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use crate::utils::helpers::service_name;

/// Fallback for requests that match no registered route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "success": false,
        "message": "Route does not exist",
        "httpStatusCode": StatusCode::NOT_FOUND.as_u16(),
        "error": "NOT_FOUND_ERROR",
        "service": service_name(),
    }))
}
