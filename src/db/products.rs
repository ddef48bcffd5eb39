// src/db/products.rs
//
// images / available_sizes / specifications live as JSON-encoded text
// columns and are parsed on read; unparseable or NULL values degrade to
// empty collections instead of failing the whole listing.

use serde_json::{json, Value};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::{Product, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, description, price, selling_price, images, \
     available_sizes, specifications, status, rating, review_count, created_at, updated_at";

fn parse_string_list(raw: Option<String>) -> Vec<String> {
    raw.as_deref()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

fn parse_object(raw: Option<String>) -> Value {
    raw.as_deref()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_else(|| json!({}))
}

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        selling_price: row.get("selling_price"),
        images: parse_string_list(row.get("images")),
        available_sizes: parse_string_list(row.get("available_sizes")),
        specifications: parse_object(row.get("specifications")),
        status: row.get("status"),
        rating: row.get("rating"),
        review_count: row.get("review_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn encode_list(list: Option<&[String]>) -> String {
    serde_json::to_string(list.unwrap_or(&[])).unwrap_or_else(|_| "[]".to_string())
}

fn encode_object(value: Option<&Value>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "{}".to_string())
}

pub async fn create_product(pool: &PgPool, input: &ProductInput) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"INSERT INTO products
               (name, description, price, selling_price, images, available_sizes, specifications)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id"#,
    )
    .bind(input.name.as_deref().unwrap_or_default())
    .bind(input.description.as_deref())
    .bind(input.price.unwrap_or_default())
    .bind(input.selling_price.unwrap_or_default())
    .bind(encode_list(input.images.as_deref()))
    .bind(encode_list(input.available_sizes.as_deref()))
    .bind(encode_object(input.specifications.as_ref()))
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Search, sort and pagination all run in the query; returns the page plus
/// the total matching count.
pub async fn list_products(
    pool: &PgPool,
    search: &str,
    sort: &str,
    page: i64,
    limit: i64,
) -> Result<(Vec<Product>, i64), sqlx::Error> {
    // Whitelisted (field, direction) pairs only; anything else falls back
    // to newest-first.
    let order_by = match sort {
        "name_asc" => "name ASC",
        "name_desc" => "name DESC",
        "price_asc" => "selling_price ASC",
        "price_desc" => "selling_price DESC",
        "date_asc" => "created_at ASC",
        _ => "created_at DESC",
    };

    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1) * limit;

    let filter = r#"status = 'active'
          AND ($1 = ''
               OR name ILIKE '%' || $1 || '%'
               OR description ILIKE '%' || $1 || '%')"#;

    let total: i64 = sqlx::query(&format!("SELECT COUNT(*) AS count FROM products WHERE {filter}"))
        .bind(search)
        .fetch_one(pool)
        .await?
        .get("count");

    let rows = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE {filter} ORDER BY {order_by} LIMIT $2 OFFSET $3"
    ))
    .bind(search)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows.iter().map(product_from_row).collect(), total))
}

pub async fn get_product_by_id(
    pool: &PgPool,
    product_id: i32,
) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(product_from_row))
}

/// Admin listing: capped, unordered. Bounded response size over completeness.
pub async fn list_all_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products LIMIT 100"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(product_from_row).collect())
}

/// Partial update: absent fields keep their stored value.
pub async fn update_product(
    pool: &PgPool,
    product_id: i32,
    input: &ProductInput,
) -> Result<bool, sqlx::Error> {
    let images = input
        .images
        .as_deref()
        .map(|l| encode_list(Some(l)));
    let available_sizes = input
        .available_sizes
        .as_deref()
        .map(|l| encode_list(Some(l)));
    let specifications = input
        .specifications
        .as_ref()
        .map(|v| encode_object(Some(v)));

    let result = sqlx::query(
        r#"UPDATE products SET
               name = COALESCE($2, name),
               description = COALESCE($3, description),
               price = COALESCE($4, price),
               selling_price = COALESCE($5, selling_price),
               images = COALESCE($6, images),
               available_sizes = COALESCE($7, available_sizes),
               specifications = COALESCE($8, specifications),
               updated_at = NOW()
           WHERE id = $1"#,
    )
    .bind(product_id)
    .bind(input.name.as_deref())
    .bind(input.description.as_deref())
    .bind(input.price)
    .bind(input.selling_price)
    .bind(images)
    .bind(available_sizes)
    .bind(specifications)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_product(pool: &PgPool, product_id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
