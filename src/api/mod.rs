pub mod auth;
pub mod business;
pub mod individual;
pub mod products;
pub mod superadmin;

use actix_web::{get, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::error::ApiError;

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Garments API is running",
    }))
}

/// Presence check for a non-empty string field in a JSON body.
pub(crate) fn require_str<'a>(data: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    match data.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ApiError::bad_request(
            &format!("{field} is required"),
            "Missing required field",
        )),
    }
}

/// Presence check for fields of any type (measurement dimensions are
/// numbers, not strings).
pub(crate) fn require_fields(data: &Value, fields: &[&str]) -> Result<(), ApiError> {
    for field in fields {
        if data.get(field).map_or(true, Value::is_null) {
            return Err(ApiError::bad_request(
                &format!("{field} is required"),
                "Missing required field",
            ));
        }
    }
    Ok(())
}
