// src/api/superadmin.rs

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::Row;

use crate::api::require_str;
use crate::error::ApiError;
use crate::models::{ProductInput, STATUS_APPROVED, STATUS_BLOCKED, ORDER_STATUSES};
use crate::{db, field_map, AppState};

async fn count(state: &AppState, query: &str) -> Result<i64, ApiError> {
    Ok(sqlx::query(query)
        .fetch_one(&state.pool)
        .await?
        .get("count"))
}

#[get("/dashboard")]
pub async fn dashboard(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let business_count = count(
        &state,
        "SELECT COUNT(*) AS count FROM users WHERE user_type = 'business'",
    )
    .await?;
    let individual_count = count(
        &state,
        "SELECT COUNT(*) AS count FROM users WHERE user_type = 'individual'",
    )
    .await?;
    let products_count = count(
        &state,
        "SELECT COUNT(*) AS count FROM products WHERE status = 'active'",
    )
    .await?;
    let orders_count = count(&state, "SELECT COUNT(*) AS count FROM orders").await?;
    let pending_approvals = count(
        &state,
        "SELECT COUNT(*) AS count FROM users WHERE status = 'pending'",
    )
    .await?;

    let revenue: f64 =
        sqlx::query("SELECT COALESCE(SUM(total_amount), 0)::float8 AS total FROM orders")
            .fetch_one(&state.pool)
            .await?
            .get("total");

    let recent = sqlx::query(
        r#"SELECT o.id,
                  CASE
                      WHEN bp.contact_person_name IS NOT NULL THEN bp.contact_person_name
                      WHEN ip.name IS NOT NULL THEN ip.name
                      ELSE 'Unknown User'
                  END AS user_name,
                  u.user_type, o.total_amount, o.status, o.created_at
           FROM orders o
           JOIN users u ON o.user_id = u.id
           LEFT JOIN business_profiles bp ON u.id = bp.user_id
           LEFT JOIN individual_profiles ip ON u.id = ip.user_id
           ORDER BY o.created_at DESC
           LIMIT 5"#,
    )
    .fetch_all(&state.pool)
    .await?;

    let recent_orders: Vec<Value> = recent
        .iter()
        .map(|r| {
            json!({
                "id": r.get::<i32, _>("id"),
                "user_name": r.get::<String, _>("user_name"),
                "user_type": r.get::<String, _>("user_type"),
                "total_amount": r.get::<f64, _>("total_amount"),
                "status": r.get::<String, _>("status"),
                "created_at": r.get::<Option<DateTime<Utc>>, _>("created_at"),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "totalBusinessUsers": business_count,
            "totalIndividualUsers": individual_count,
            "totalProducts": products_count,
            "totalOrders": orders_count,
            "pendingApprovals": pending_approvals,
            "revenue": revenue,
            "recentOrders": recent_orders,
        }
    })))
}

/// Merges the camelCase-mapped profile into the base user entry when a
/// profile row exists.
fn merge_profile(entry: &mut Value, profile: Value) {
    if let (Value::Object(base), Value::Object(extra)) = (entry, profile) {
        base.extend(extra);
    }
}

#[get("/users/business")]
pub async fn get_business_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = db::users::list_business_users(&state.pool).await?;

    let mut mapped = Vec::with_capacity(users.len());
    for user in users {
        let mut entry = json!({
            "id": user.id,
            "email": user.email,
            "status": user.status,
            "createdAt": user.created_at,
        });

        if user.legal_entity_name.is_some() {
            let profile = json!({
                "legal_entity_name": user.legal_entity_name,
                "contact_person_name": user.contact_person_name,
                "contact_number": user.contact_number,
                "gst_number": user.gst_number,
                "pan_number": user.pan_number,
                "address": user.address,
                "logo": user.logo,
            });
            merge_profile(&mut entry, field_map::business_profile_to_frontend(profile));
        }

        mapped.push(entry);
    }

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": mapped})))
}

#[get("/users/individual")]
pub async fn get_individual_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = db::users::list_individual_users(&state.pool).await?;

    let mut mapped = Vec::with_capacity(users.len());
    for user in users {
        let mut entry = json!({
            "id": user.id,
            "email": user.email,
            "status": user.status,
            "createdAt": user.created_at,
        });

        if user.name.is_some() {
            let profile = json!({
                "name": user.name,
                "contact_number": user.contact_number,
                "address": user.address,
            });
            merge_profile(&mut entry, field_map::individual_profile_to_frontend(profile));
        }

        mapped.push(entry);
    }

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": mapped})))
}

async fn set_user_status(
    state: &AppState,
    user_id: i32,
    status: &str,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    if db::users::update_user_status(&state.pool, user_id, status).await? {
        Ok(HttpResponse::Ok().json(json!({"success": true, "message": message})))
    } else {
        Err(ApiError::not_found("User not found", "Invalid user ID"))
    }
}

#[put("/users/{user_id}/approve")]
pub async fn approve_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    set_user_status(&state, path.into_inner(), STATUS_APPROVED, "User approved successfully").await
}

#[put("/users/{user_id}/block")]
pub async fn block_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    set_user_status(&state, path.into_inner(), STATUS_BLOCKED, "User blocked successfully").await
}

#[put("/users/{user_id}/unblock")]
pub async fn unblock_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    set_user_status(&state, path.into_inner(), STATUS_APPROVED, "User unblocked successfully")
        .await
}

/// Admin listing keeps storage field names; only the customer-facing
/// catalog goes through the field mapper.
#[get("/products")]
pub async fn get_all_products(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = db::products::list_all_products(&state.pool).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": products})))
}

#[post("/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let name = require_str(&data, "name")?.to_string();
    let description = require_str(&data, "description")?.to_string();
    let price = data.get("price").and_then(Value::as_f64).ok_or_else(|| {
        ApiError::bad_request("price is required", "Missing required field")
    })?;
    let selling_price = data
        .get("sellingPrice")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            ApiError::bad_request("sellingPrice is required", "Missing required field")
        })?;

    let input = ProductInput {
        name: Some(name),
        description: Some(description),
        price: Some(price),
        selling_price: Some(selling_price),
        images: Some(
            data.get("images")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        ),
        available_sizes: Some(
            data.get("availableSizes")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        ),
        specifications: Some(
            data.get("specifications").cloned().unwrap_or_else(|| json!({})),
        ),
    };

    let product_id = db::products::create_product(&state.pool, &input).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Product added successfully",
        "data": {"productId": product_id},
    })))
}

#[put("/products/{product_id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let input = ProductInput {
        name: data.get("name").and_then(Value::as_str).map(String::from),
        description: data
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        price: data.get("price").and_then(Value::as_f64),
        selling_price: data.get("sellingPrice").and_then(Value::as_f64),
        images: data
            .get("images")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        available_sizes: data
            .get("availableSizes")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        specifications: data.get("specifications").cloned(),
    };

    if db::products::update_product(&state.pool, path.into_inner(), &input).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Product updated successfully",
        })))
    } else {
        Err(ApiError::not_found("Product not found", "Invalid product ID"))
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    if db::products::delete_product(&state.pool, path.into_inner()).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Product deleted successfully",
        })))
    } else {
        Err(ApiError::not_found("Product not found", "Invalid product ID"))
    }
}

#[get("/orders")]
pub async fn get_all_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let orders = db::orders::list_all_orders(&state.pool).await?;
    let data = field_map::order_to_frontend(serde_json::to_value(orders)?);

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": data})))
}

#[put("/orders/{order_id}/status")]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let status = body.get("status").and_then(Value::as_str).ok_or_else(|| {
        ApiError::bad_request("Status is required", "Missing status field")
    })?;

    if !ORDER_STATUSES.contains(&status) {
        return Err(ApiError::bad_request(
            "Invalid status",
            &format!("Status must be one of: {}", ORDER_STATUSES.join(", ")),
        ));
    }

    if db::orders::update_order_status(&state.pool, path.into_inner(), status).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Order status updated successfully",
        })))
    } else {
        Err(ApiError::not_found("Order not found", "Invalid order ID"))
    }
}
