// src/field_map.rs
//
// Dictionary-driven renaming between API (camelCase) and storage
// (snake_case) field names. One canonical frontend->backend table per
// entity; the reverse direction is the exact inverse of the same table.
// Keys without an entry pass through unchanged.

use serde_json::{Map, Value};

pub type FieldTable = &'static [(&'static str, &'static str)];

pub const MEASUREMENT_FIELDS: FieldTable = &[
    ("customerId", "customer_id"),
    ("name", "name"),
    ("gender", "gender"),
    ("notes", "notes"),
    ("chest", "chest"),
    ("waist", "waist"),
    ("seat", "seat"),
    ("shirtLength", "shirt_length"),
    ("armLength", "arm_length"),
    ("neck", "neck"),
    ("hip", "hip"),
    ("poloShirtLength", "polo_shirt_length"),
    ("shoulderWidth", "shoulder_width"),
    ("wrist", "wrist"),
    ("biceps", "biceps"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

pub const BUSINESS_PROFILE_FIELDS: FieldTable = &[
    ("legalEntityName", "legal_entity_name"),
    ("gst", "gst_number"),
    ("pan", "pan_number"),
    ("address", "address"),
    ("contactPersonName", "contact_person_name"),
    ("contactNumber", "contact_number"),
    ("email", "email"),
    ("password", "password"),
    ("logo", "logo"),
];

pub const INDIVIDUAL_PROFILE_FIELDS: FieldTable = &[
    ("name", "name"),
    ("email", "email"),
    ("contactNumber", "contact_number"),
    ("address", "address"),
    ("password", "password"),
];

pub const PRODUCT_FIELDS: FieldTable = &[
    ("name", "name"),
    ("description", "description"),
    ("price", "price"),
    ("sellingPrice", "selling_price"),
    ("images", "images"),
    ("availableSizes", "available_sizes"),
    ("specifications", "specifications"),
    ("status", "status"),
    ("rating", "rating"),
    ("reviewCount", "review_count"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

pub const ORDER_FIELDS: FieldTable = &[
    ("items", "items"),
    ("deliveryAddress", "delivery_address"),
    ("measurementId", "measurement_id"),
    ("totalAmount", "total_amount"),
    ("status", "status"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

pub const ORDER_ITEM_FIELDS: FieldTable = &[
    ("productId", "product_id"),
    ("productName", "product_name"),
    ("quantity", "quantity"),
    ("price", "price"),
    ("size", "size"),
];

/// Rename the keys of an object, or of every object in an array
/// (recursively), via `rename`. Unmapped keys keep their name; scalars
/// pass through untouched.
pub fn map_fields<F>(value: Value, rename: &F) -> Value
where
    F: Fn(&str) -> Option<&'static str>,
{
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| map_fields(v, rename)).collect())
        }
        Value::Object(fields) => {
            let mut mapped = Map::with_capacity(fields.len());
            for (key, val) in fields {
                match rename(&key) {
                    Some(new_key) => mapped.insert(new_key.to_string(), val),
                    None => mapped.insert(key, val),
                };
            }
            Value::Object(mapped)
        }
        other => other,
    }
}

pub fn to_backend(value: Value, table: FieldTable) -> Value {
    map_fields(value, &|key| {
        table.iter().find(|(f, _)| *f == key).map(|(_, b)| *b)
    })
}

pub fn to_frontend(value: Value, table: FieldTable) -> Value {
    map_fields(value, &|key| {
        table.iter().find(|(_, b)| *b == key).map(|(f, _)| *f)
    })
}

pub fn measurement_to_frontend(value: Value) -> Value {
    to_frontend(value, MEASUREMENT_FIELDS)
}

pub fn measurement_to_backend(value: Value) -> Value {
    to_backend(value, MEASUREMENT_FIELDS)
}

pub fn product_to_frontend(value: Value) -> Value {
    to_frontend(value, PRODUCT_FIELDS)
}

pub fn business_profile_to_frontend(value: Value) -> Value {
    to_frontend(value, BUSINESS_PROFILE_FIELDS)
}

pub fn individual_profile_to_frontend(value: Value) -> Value {
    to_frontend(value, INDIVIDUAL_PROFILE_FIELDS)
}

/// Orders carry a nested `items` list with its own table.
pub fn order_to_frontend(value: Value) -> Value {
    if let Value::Array(orders) = value {
        return Value::Array(orders.into_iter().map(order_to_frontend).collect());
    }
    let mut mapped = to_frontend(value, ORDER_FIELDS);
    if let Some(items) = mapped.get_mut("items") {
        *items = to_frontend(items.take(), ORDER_ITEM_FIELDS);
    }
    mapped
}

pub fn order_to_backend(value: Value) -> Value {
    if let Value::Array(orders) = value {
        return Value::Array(orders.into_iter().map(order_to_backend).collect());
    }
    let mut mapped = to_backend(value, ORDER_FIELDS);
    if let Some(items) = mapped.get_mut("items") {
        *items = to_backend(items.take(), ORDER_ITEM_FIELDS);
    }
    mapped
}
