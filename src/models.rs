// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const USER_TYPE_INDIVIDUAL: &str = "individual";
pub const USER_TYPE_BUSINESS: &str = "business";
pub const USER_TYPE_SUPERADMIN: &str = "superadmin";

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_BLOCKED: &str = "blocked";

pub const ORDER_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "in_progress",
    "ready",
    "delivered",
    "cancelled",
];

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_type: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct BusinessProfile {
    pub user_id: i32,
    pub legal_entity_name: String,
    pub gst_number: String,
    pub pan_number: String,
    pub address: String,
    pub contact_person_name: String,
    pub contact_number: String,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IndividualProfile {
    pub user_id: i32,
    pub name: String,
    pub contact_number: String,
    pub address: String,
}

/// users row joined with its business profile for the admin listing.
#[derive(Debug, Serialize)]
pub struct BusinessUserRow {
    pub id: i32,
    pub email: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub legal_entity_name: Option<String>,
    pub contact_person_name: Option<String>,
    pub contact_number: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IndividualUserRow {
    pub id: i32,
    pub email: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub selling_price: f64,
    pub images: Vec<String>,
    pub available_sizes: Vec<String>,
    pub specifications: serde_json::Value,
    pub status: String,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for product create/update; `None` leaves the column untouched
/// on update.
#[derive(Debug, Default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub selling_price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub available_sizes: Option<Vec<String>>,
    pub specifications: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct Measurement {
    pub id: i32,
    pub user_id: i32,
    pub customer_id: Option<String>,
    pub name: String,
    pub gender: String,
    pub notes: Option<String>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub seat: Option<f64>,
    pub shirt_length: Option<f64>,
    pub arm_length: Option<f64>,
    pub neck: Option<f64>,
    pub hip: Option<f64>,
    pub polo_shirt_length: Option<f64>,
    pub shoulder_width: Option<f64>,
    pub wrist: Option<f64>,
    pub biceps: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Measurement write payload, in storage (snake_case) field names.
/// Request bodies arrive camelCase and go through the field mapper first.
#[derive(Debug, Deserialize)]
pub struct MeasurementInput {
    pub customer_id: Option<String>,
    pub name: String,
    pub gender: String,
    pub notes: Option<String>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub seat: Option<f64>,
    pub shirt_length: Option<f64>,
    pub arm_length: Option<f64>,
    pub neck: Option<f64>,
    pub hip: Option<f64>,
    pub polo_shirt_length: Option<f64>,
    pub shoulder_width: Option<f64>,
    pub wrist: Option<f64>,
    pub biceps: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: f64,
    pub delivery_address: String,
    pub measurement_id: Option<i32>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub size: String,
}

/// Order joined with the buyer's identity for the admin listing.
#[derive(Debug, Serialize)]
pub struct AdminOrder {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_type: String,
    pub total_amount: f64,
    pub delivery_address: String,
    pub measurement_id: Option<i32>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

/// Price/name snapshot taken from the products table at order time.
#[derive(Debug)]
pub struct OrderItemSnapshot {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub size: String,
}

/// cart_items row joined with live product name, price and first image.
#[derive(Debug)]
pub struct CartLine {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub size: String,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
