use crate::middleware::not_found::not_found;
use crate::post::post_index::post_routes;
use crate::utils::error::json_error_handler;
use crate::utils::helpers::service_name;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

#[get("/")]
async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the posts API",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

/// Every route the service exposes, plus the JSON and unknown-route fallbacks.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.service(welcome);
    cfg.configure(post_routes);
    cfg.default_service(web::to(not_found));
}
