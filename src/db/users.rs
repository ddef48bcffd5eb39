// src/db/users.rs

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

use crate::models::{BusinessProfile, BusinessUserRow, IndividualProfile, IndividualUserRow, User};

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        user_type: row.get("user_type"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

/// Takes a connection rather than the pool so signup can insert the user
/// and its profile inside one transaction.
pub async fn create_user(
    conn: &mut PgConnection,
    email: &str,
    password_hash: &str,
    user_type: &str,
    status: &str,
) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"INSERT INTO users (email, password_hash, user_type, status)
           VALUES ($1, $2, $3, $4)
           RETURNING id"#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(user_type)
    .bind(status)
    .fetch_one(conn)
    .await?;

    Ok(row.get("id"))
}

pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT id, email, password_hash, user_type, status, created_at
           FROM users
           WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(user_from_row))
}

pub async fn get_user_by_id(pool: &PgPool, user_id: i32) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT id, email, password_hash, user_type, status, created_at
           FROM users
           WHERE id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(user_from_row))
}

pub async fn update_user_status(
    pool: &PgPool,
    user_id: i32,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn create_business_profile(
    conn: &mut PgConnection,
    user_id: i32,
    legal_entity_name: &str,
    gst_number: &str,
    pan_number: &str,
    address: &str,
    contact_person_name: &str,
    contact_number: &str,
    logo: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO business_profiles
               (user_id, legal_entity_name, gst_number, pan_number, address,
                contact_person_name, contact_number, logo)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
    )
    .bind(user_id)
    .bind(legal_entity_name)
    .bind(gst_number)
    .bind(pan_number)
    .bind(address)
    .bind(contact_person_name)
    .bind(contact_number)
    .bind(logo)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn create_individual_profile(
    conn: &mut PgConnection,
    user_id: i32,
    name: &str,
    contact_number: &str,
    address: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO individual_profiles (user_id, name, contact_number, address)
           VALUES ($1, $2, $3, $4)"#,
    )
    .bind(user_id)
    .bind(name)
    .bind(contact_number)
    .bind(address)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn get_business_profile(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<BusinessProfile>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT user_id, legal_entity_name, gst_number, pan_number, address,
                  contact_person_name, contact_number, logo
           FROM business_profiles
           WHERE user_id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| BusinessProfile {
        user_id: r.get("user_id"),
        legal_entity_name: r.get("legal_entity_name"),
        gst_number: r.get("gst_number"),
        pan_number: r.get("pan_number"),
        address: r.get("address"),
        contact_person_name: r.get("contact_person_name"),
        contact_number: r.get("contact_number"),
        logo: r.get("logo"),
    }))
}

pub async fn get_individual_profile(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<IndividualProfile>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT user_id, name, contact_number, address
           FROM individual_profiles
           WHERE user_id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| IndividualProfile {
        user_id: r.get("user_id"),
        name: r.get("name"),
        contact_number: r.get("contact_number"),
        address: r.get("address"),
    }))
}

pub async fn list_business_users(pool: &PgPool) -> Result<Vec<BusinessUserRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT u.id, u.email, u.status, u.created_at,
                  bp.legal_entity_name, bp.contact_person_name, bp.contact_number,
                  bp.gst_number, bp.pan_number, bp.address, bp.logo
           FROM users u
           LEFT JOIN business_profiles bp ON u.id = bp.user_id
           WHERE u.user_type = 'business'
           ORDER BY u.created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| BusinessUserRow {
            id: r.get("id"),
            email: r.get("email"),
            status: r.get("status"),
            created_at: r.get("created_at"),
            legal_entity_name: r.get("legal_entity_name"),
            contact_person_name: r.get("contact_person_name"),
            contact_number: r.get("contact_number"),
            gst_number: r.get("gst_number"),
            pan_number: r.get("pan_number"),
            address: r.get("address"),
            logo: r.get("logo"),
        })
        .collect())
}

pub async fn list_individual_users(pool: &PgPool) -> Result<Vec<IndividualUserRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT u.id, u.email, u.status, u.created_at,
                  ip.name, ip.contact_number, ip.address
           FROM users u
           LEFT JOIN individual_profiles ip ON u.id = ip.user_id
           WHERE u.user_type = 'individual'
           ORDER BY u.created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| IndividualUserRow {
            id: r.get("id"),
            email: r.get("email"),
            status: r.get("status"),
            created_at: r.get("created_at"),
            name: r.get("name"),
            contact_number: r.get("contact_number"),
            address: r.get("address"),
        })
        .collect())
}
