// src/api/individual.rs
//
// Same surface as the business routes, mounted under /individual and gated
// on the individual role.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::api::business::{
    dashboard_summary, measurement_create, measurement_delete, measurement_list,
    measurement_update, order_create, order_list,
};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    dashboard_summary(&state, user.id).await
}

#[get("/measurements")]
pub async fn get_measurements(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    measurement_list(&state, user.id).await
}

#[post("/measurements")]
pub async fn create_measurement(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    measurement_create(&state, user.id, body.into_inner()).await
}

#[put("/measurements/{measurement_id}")]
pub async fn update_measurement(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    measurement_update(&state, user.id, path.into_inner(), body.into_inner()).await
}

#[delete("/measurements/{measurement_id}")]
pub async fn delete_measurement(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    measurement_delete(&state, user.id, path.into_inner()).await
}

#[get("/orders")]
pub async fn get_orders(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    order_list(&state, user.id).await
}

#[post("/orders")]
pub async fn create_order(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    order_create(&state, user.id, body.into_inner()).await
}
