// src/db/orders.rs

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::{AdminOrder, Order, OrderItem, OrderItemSnapshot};

fn order_item_from_row(row: &PgRow) -> OrderItem {
    OrderItem {
        id: row.get("id"),
        order_id: row.get("order_id"),
        product_id: row.get("product_id"),
        product_name: row.get("product_name"),
        quantity: row.get("quantity"),
        price: row.get("price"),
        size: row.get("size"),
    }
}

async fn fetch_order_items(pool: &PgPool, order_id: i32) -> Result<Vec<OrderItem>, sqlx::Error> {
    let rows = sqlx::query("SELECT * FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(order_item_from_row).collect())
}

/// Inserts the order row and its item snapshots in one transaction; the
/// total is the sum of quantity x snapshotted price, fixed at creation.
pub async fn create_order(
    pool: &PgPool,
    user_id: i32,
    items: &[OrderItemSnapshot],
    delivery_address: &str,
    measurement_id: Option<i32>,
) -> Result<(i32, f64), sqlx::Error> {
    let total_amount: f64 = items
        .iter()
        .map(|item| item.quantity as f64 * item.price)
        .sum();

    let mut tx = pool.begin().await?;

    let order_id: i32 = sqlx::query(
        r#"INSERT INTO orders (user_id, total_amount, delivery_address, measurement_id)
           VALUES ($1, $2, $3, $4)
           RETURNING id"#,
    )
    .bind(user_id)
    .bind(total_amount)
    .bind(delivery_address)
    .bind(measurement_id)
    .fetch_one(&mut *tx)
    .await?
    .get("id");

    for item in items {
        sqlx::query(
            r#"INSERT INTO order_items (order_id, product_id, product_name, quantity, price, size)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.price)
        .bind(&item.size)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((order_id, total_amount))
}

pub async fn list_orders_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Order>, sqlx::Error> {
    let rows = sqlx::query("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let id: i32 = row.get("id");
        orders.push(Order {
            id,
            user_id: row.get("user_id"),
            total_amount: row.get("total_amount"),
            delivery_address: row.get("delivery_address"),
            measurement_id: row.get("measurement_id"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            items: fetch_order_items(pool, id).await?,
        });
    }

    Ok(orders)
}

pub async fn list_all_orders(pool: &PgPool) -> Result<Vec<AdminOrder>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT o.*,
                  CASE
                      WHEN bp.contact_person_name IS NOT NULL THEN bp.contact_person_name
                      WHEN ip.name IS NOT NULL THEN ip.name
                      ELSE 'Unknown User'
                  END AS user_name,
                  u.email AS user_email,
                  u.user_type
           FROM orders o
           JOIN users u ON o.user_id = u.id
           LEFT JOIN business_profiles bp ON u.id = bp.user_id
           LEFT JOIN individual_profiles ip ON u.id = ip.user_id
           ORDER BY o.created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let id: i32 = row.get("id");
        orders.push(AdminOrder {
            id,
            user_id: row.get("user_id"),
            user_name: row.get("user_name"),
            user_email: row.get("user_email"),
            user_type: row.get("user_type"),
            total_amount: row.get("total_amount"),
            delivery_address: row.get("delivery_address"),
            measurement_id: row.get("measurement_id"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            items: fetch_order_items(pool, id).await?,
        });
    }

    Ok(orders)
}

/// No transition table: any status from the fixed set may follow any other.
pub async fn update_order_status(
    pool: &PgPool,
    order_id: i32,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status)
        .bind(order_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
