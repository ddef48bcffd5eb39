// src/api/business.rs
//
// Business-role routes. The handler cores are shared with the individual
// scope, which exposes the same surface under /individual.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::Row;

use crate::api::require_fields;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{MeasurementInput, OrderItemSnapshot};
use crate::{db, field_map, AppState};

pub(crate) const MEASUREMENT_REQUIRED: &[&str] = &[
    "name",
    "gender",
    "chest",
    "waist",
    "seat",
    "shirtLength",
    "armLength",
    "neck",
    "hip",
    "poloShirtLength",
    "shoulderWidth",
    "wrist",
    "biceps",
];

/// Required-field check on the camelCase body, then rename through the
/// field mapper and deserialize into the storage-shaped payload.
pub(crate) fn parse_measurement(data: Value) -> Result<MeasurementInput, ApiError> {
    require_fields(&data, MEASUREMENT_REQUIRED)?;
    serde_json::from_value(field_map::measurement_to_backend(data))
        .map_err(|e| ApiError::bad_request("Invalid measurement payload", &e.to_string()))
}

pub(crate) async fn dashboard_summary(
    state: &AppState,
    user_id: i32,
) -> Result<HttpResponse, ApiError> {
    let measurements: i64 =
        sqlx::query("SELECT COUNT(*) AS count FROM measurements WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&state.pool)
            .await?
            .get("count");

    let orders: i64 = sqlx::query("SELECT COUNT(*) AS count FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?
        .get("count");

    let total_revenue: f64 = sqlx::query(
        "SELECT COALESCE(SUM(total_amount), 0)::float8 AS total FROM orders WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&state.pool)
    .await?
    .get("total");

    let recent = sqlx::query(
        r#"SELECT o.id, oi.product_name, oi.quantity, o.status,
                  o.total_amount AS amount, o.created_at
           FROM orders o
           JOIN order_items oi ON o.id = oi.order_id
           WHERE o.user_id = $1
           ORDER BY o.created_at DESC
           LIMIT 5"#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let recent_orders: Vec<Value> = recent
        .iter()
        .map(|r| {
            json!({
                "id": r.get::<i32, _>("id"),
                "product_name": r.get::<String, _>("product_name"),
                "quantity": r.get::<i32, _>("quantity"),
                "status": r.get::<String, _>("status"),
                "amount": r.get::<f64, _>("amount"),
                "created_at": r.get::<Option<DateTime<Utc>>, _>("created_at"),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "measurements": measurements,
            "orders": orders,
            "totalRevenue": total_revenue,
            "recentOrders": recent_orders,
        }
    })))
}

pub(crate) async fn measurement_list(
    state: &AppState,
    user_id: i32,
) -> Result<HttpResponse, ApiError> {
    let measurements = db::measurements::list_measurements_by_user(&state.pool, user_id).await?;
    let data = field_map::measurement_to_frontend(serde_json::to_value(measurements)?);

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": data})))
}

pub(crate) async fn measurement_create(
    state: &AppState,
    user_id: i32,
    body: Value,
) -> Result<HttpResponse, ApiError> {
    let input = parse_measurement(body)?;
    let id = db::measurements::create_measurement(&state.pool, user_id, &input).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Measurement added successfully",
        "data": {"id": id},
    })))
}

pub(crate) async fn measurement_update(
    state: &AppState,
    user_id: i32,
    measurement_id: i32,
    body: Value,
) -> Result<HttpResponse, ApiError> {
    let input = parse_measurement(body)?;
    if db::measurements::update_measurement(&state.pool, measurement_id, user_id, &input).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Measurement updated successfully",
        })))
    } else {
        Err(ApiError::not_found(
            "Measurement not found or access denied",
            "Invalid measurement ID",
        ))
    }
}

pub(crate) async fn measurement_delete(
    state: &AppState,
    user_id: i32,
    measurement_id: i32,
) -> Result<HttpResponse, ApiError> {
    if db::measurements::delete_measurement(&state.pool, measurement_id, user_id).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Measurement deleted successfully",
        })))
    } else {
        Err(ApiError::not_found(
            "Measurement not found or access denied",
            "Invalid measurement ID",
        ))
    }
}

pub(crate) async fn order_list(state: &AppState, user_id: i32) -> Result<HttpResponse, ApiError> {
    let orders = db::orders::list_orders_by_user(&state.pool, user_id).await?;
    let data = field_map::order_to_frontend(serde_json::to_value(orders)?);

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": data})))
}

/// Snapshots name and price from the products table at order time;
/// client-supplied prices are ignored.
pub(crate) async fn order_create(
    state: &AppState,
    user_id: i32,
    data: Value,
) -> Result<HttpResponse, ApiError> {
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty());
    let delivery_address = data
        .get("deliveryAddress")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let (Some(items), Some(delivery_address)) = (items, delivery_address) else {
        return Err(ApiError::bad_request(
            "Items and delivery address are required",
            "Missing required fields",
        ));
    };

    let mut snapshots = Vec::with_capacity(items.len());
    for item in items {
        let product_id = item.get("productId").and_then(Value::as_i64);
        let quantity = item
            .get("quantity")
            .and_then(Value::as_i64)
            .and_then(|q| i32::try_from(q).ok());
        let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
            return Err(ApiError::bad_request(
                "Product ID and quantity are required for each item",
                "Missing required fields",
            ));
        };
        if quantity < 1 {
            return Err(ApiError::bad_request(
                "Quantity must be at least 1",
                "Invalid quantity",
            ));
        }

        // An id outside the i32 range cannot match any row; it must not
        // wrap around onto an existing one.
        let Ok(id) = i32::try_from(product_id) else {
            return Err(ApiError::not_found(
                &format!("Product not found: {product_id}"),
                "Invalid product ID",
            ));
        };
        let product = db::products::get_product_by_id(&state.pool, id).await?;
        let Some(product) = product else {
            return Err(ApiError::not_found(
                &format!("Product not found: {product_id}"),
                "Invalid product ID",
            ));
        };

        snapshots.push(OrderItemSnapshot {
            product_id: product.id,
            product_name: product.name,
            quantity,
            price: product.selling_price,
            size: item
                .get("size")
                .and_then(Value::as_str)
                .unwrap_or("N/A")
                .to_string(),
        });
    }

    let measurement_id = data
        .get("measurementId")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok());

    let (order_id, total_amount) =
        db::orders::create_order(&state.pool, user_id, &snapshots, delivery_address, measurement_id)
            .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Order placed successfully",
        "data": {
            "orderId": order_id,
            "totalAmount": total_amount,
            "status": "pending",
        }
    })))
}

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
