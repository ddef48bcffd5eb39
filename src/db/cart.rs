// src/db/cart.rs

use sqlx::{PgPool, Row};

use crate::models::CartLine;

pub async fn list_cart(pool: &PgPool, user_id: i32) -> Result<Vec<CartLine>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT ci.id, ci.product_id, ci.quantity, ci.size, ci.created_at, ci.updated_at,
                  p.name AS product_name, p.selling_price AS price, p.images
           FROM cart_items ci
           JOIN products p ON ci.product_id = p.id
           WHERE ci.user_id = $1
           ORDER BY ci.created_at DESC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| {
            let images: Option<String> = r.get("images");
            let image = images
                .as_deref()
                .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
                .and_then(|list| list.into_iter().next());

            CartLine {
                id: r.get("id"),
                product_id: r.get("product_id"),
                product_name: r.get("product_name"),
                quantity: r.get("quantity"),
                price: r.get("price"),
                size: r.get("size"),
                image,
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            }
        })
        .collect())
}

/// Adding the same (product, size) again accumulates quantity instead of
/// creating a second row.
pub async fn add_to_cart(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    size: &str,
) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"INSERT INTO cart_items (user_id, product_id, quantity, size)
           VALUES ($1, $2, $3, $4)
           ON CONFLICT (user_id, product_id, size)
           DO UPDATE SET
               quantity = cart_items.quantity + EXCLUDED.quantity,
               updated_at = NOW()
           RETURNING id"#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(size)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

pub async fn update_cart_item(
    pool: &PgPool,
    user_id: i32,
    cart_item_id: i32,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE cart_items SET quantity = $1, updated_at = NOW()
           WHERE id = $2 AND user_id = $3"#,
    )
    .bind(quantity)
    .bind(cart_item_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn remove_cart_item(
    pool: &PgPool,
    user_id: i32,
    cart_item_id: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(cart_item_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn clear_cart(pool: &PgPool, user_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
