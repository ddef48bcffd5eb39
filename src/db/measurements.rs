// src/db/measurements.rs
//
// Every statement is scoped by user_id in the WHERE clause; ownership is
// enforced by the filter, not by a separate check.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::{Measurement, MeasurementInput};

fn measurement_from_row(row: &PgRow) -> Measurement {
    Measurement {
        id: row.get("id"),
        user_id: row.get("user_id"),
        customer_id: row.get("customer_id"),
        name: row.get("name"),
        gender: row.get("gender"),
        notes: row.get("notes"),
        chest: row.get("chest"),
        waist: row.get("waist"),
        seat: row.get("seat"),
        shirt_length: row.get("shirt_length"),
        arm_length: row.get("arm_length"),
        neck: row.get("neck"),
        hip: row.get("hip"),
        polo_shirt_length: row.get("polo_shirt_length"),
        shoulder_width: row.get("shoulder_width"),
        wrist: row.get("wrist"),
        biceps: row.get("biceps"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn create_measurement(
    pool: &PgPool,
    user_id: i32,
    input: &MeasurementInput,
) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"INSERT INTO measurements
               (user_id, customer_id, name, gender, notes, chest, waist, seat,
                shirt_length, arm_length, neck, hip, polo_shirt_length,
                shoulder_width, wrist, biceps)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
           RETURNING id"#,
    )
    .bind(user_id)
    .bind(input.customer_id.as_deref())
    .bind(&input.name)
    .bind(&input.gender)
    .bind(input.notes.as_deref())
    .bind(input.chest)
    .bind(input.waist)
    .bind(input.seat)
    .bind(input.shirt_length)
    .bind(input.arm_length)
    .bind(input.neck)
    .bind(input.hip)
    .bind(input.polo_shirt_length)
    .bind(input.shoulder_width)
    .bind(input.wrist)
    .bind(input.biceps)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

pub async fn list_measurements_by_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<Measurement>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT * FROM measurements WHERE user_id = $1 ORDER BY created_at DESC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(measurement_from_row).collect())
}

/// Full replace of the record, like create. Returns false when the id does
/// not exist or belongs to someone else.
pub async fn update_measurement(
    pool: &PgPool,
    measurement_id: i32,
    user_id: i32,
    input: &MeasurementInput,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE measurements SET
               customer_id = $3, name = $4, gender = $5, notes = $6,
               chest = $7, waist = $8, seat = $9, shirt_length = $10,
               arm_length = $11, neck = $12, hip = $13, polo_shirt_length = $14,
               shoulder_width = $15, wrist = $16, biceps = $17, updated_at = NOW()
           WHERE id = $1 AND user_id = $2"#,
    )
    .bind(measurement_id)
    .bind(user_id)
    .bind(input.customer_id.as_deref())
    .bind(&input.name)
    .bind(&input.gender)
    .bind(input.notes.as_deref())
    .bind(input.chest)
    .bind(input.waist)
    .bind(input.seat)
    .bind(input.shirt_length)
    .bind(input.arm_length)
    .bind(input.neck)
    .bind(input.hip)
    .bind(input.polo_shirt_length)
    .bind(input.shoulder_width)
    .bind(input.wrist)
    .bind(input.biceps)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_measurement(
    pool: &PgPool,
    measurement_id: i32,
    user_id: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM measurements WHERE id = $1 AND user_id = $2")
        .bind(measurement_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
