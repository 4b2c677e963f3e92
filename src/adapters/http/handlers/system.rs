use actix_web::{HttpResponse, http::header::ContentType};

use crate::infrastructure::metrics;

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// GET /metrics in the Prometheus text format
pub async fn metrics_handler() -> HttpResponse {
  HttpResponse::Ok()
    .content_type(ContentType::plaintext())
    .body(metrics::gather())
}
