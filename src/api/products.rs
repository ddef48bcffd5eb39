// src/api/products.rs
//
// Public catalog plus the authenticated cart (business and individual
// roles share it).

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::{db, field_map, AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses((status = 200, description = "Paginated active products")),
    tag = "products"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, ApiError> {
    let search = query.search.as_deref().unwrap_or("");
    let sort = query.sort.as_deref().unwrap_or("date_desc");
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(12).max(1);

    let (products, total) = db::products::list_products(&state.pool, search, sort, page, limit).await?;
    let total_pages = (total + limit - 1) / limit;

    let products = field_map::product_to_frontend(serde_json::to_value(products)?);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "products": products,
            "totalPages": total_pages,
            "currentPage": page,
            "totalProducts": total,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail"),
        (status = 404, description = "Unknown product")
    ),
    tag = "products"
)]
#[get("/products/{product_id}")]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let product = db::products::get_product_by_id(&state.pool, path.into_inner()).await?;

    let Some(product) = product else {
        return Err(ApiError::not_found("Product not found", "Invalid product ID"));
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": field_map::product_to_frontend(serde_json::to_value(product)?),
    })))
}

#[get("")]
pub async fn get_cart(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    let lines = db::cart::list_cart(&state.pool, user.id).await?;

    let items: Vec<Value> = lines
        .into_iter()
        .map(|line| {
            json!({
                "id": line.id,
                "productId": line.product_id,
                "productName": line.product_name,
                "quantity": line.quantity,
                "price": line.price,
                "size": line.size,
                "image": line.image,
                "createdAt": line.created_at,
                "updatedAt": line.updated_at,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({"success": true, "data": items})))
}

#[post("")]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let product_id = data.get("productId").and_then(Value::as_i64);
    let quantity = data
        .get("quantity")
        .and_then(Value::as_i64)
        .and_then(|q| i32::try_from(q).ok());
    let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
        return Err(ApiError::bad_request(
            "Product ID and quantity are required",
            "Missing required fields",
        ));
    };
    if quantity < 1 {
        return Err(ApiError::bad_request(
            "Quantity must be at least 1",
            "Invalid quantity",
        ));
    }

    // Oversized ids must read as unknown, not wrap onto an existing row.
    let product_id = i32::try_from(product_id)
        .map_err(|_| ApiError::not_found("Product not found", "Invalid product ID"))?;
    if db::products::get_product_by_id(&state.pool, product_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Product not found", "Invalid product ID"));
    }

    let size = data.get("size").and_then(Value::as_str).unwrap_or("N/A");
    let cart_item_id =
        db::cart::add_to_cart(&state.pool, user.id, product_id, quantity, size).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Item added to cart",
        "data": {"cartItemId": cart_item_id},
    })))
}

#[put("/{cart_item_id}")]
pub async fn update_cart_item(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let quantity = body
        .get("quantity")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            ApiError::bad_request("Quantity is required", "Missing required field")
        })?;
    let quantity = i32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| {
            ApiError::bad_request("Quantity must be at least 1", "Invalid quantity")
        })?;

    if db::cart::update_cart_item(&state.pool, user.id, path.into_inner(), quantity).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Cart item updated",
        })))
    } else {
        Err(ApiError::not_found("Cart item not found", "Invalid cart item ID"))
    }
}

#[delete("/{cart_item_id}")]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    if db::cart::remove_cart_item(&state.pool, user.id, path.into_inner()).await? {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Item removed from cart",
        })))
    } else {
        Err(ApiError::not_found("Cart item not found", "Invalid cart item ID"))
    }
}

#[delete("")]
pub async fn clear_cart(
    state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    db::cart::clear_cart(&state.pool, user.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Cart cleared",
    })))
}
