// src/api/auth.rs

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::api::require_str;
use crate::auth::issue_token;
use crate::error::ApiError;
use crate::models::{
    STATUS_APPROVED, STATUS_PENDING, USER_TYPE_BUSINESS, USER_TYPE_INDIVIDUAL,
    USER_TYPE_SUPERADMIN,
};
use crate::validators::{validate_email, validate_gst, validate_pan, validate_phone};
use crate::{db, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn credentials(payload: &LoginRequest) -> Result<(&str, &str), ApiError> {
    match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::bad_request(
            "Email and password are required",
            "Missing credentials",
        )),
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials", "Email or password is incorrect")
}

#[utoipa::path(
    post,
    path = "/api/auth/superadmin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
#[post("/auth/superadmin/login")]
pub async fn superadmin_login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = credentials(&payload)?;

    let user = db::users::get_user_by_email(&state.pool, email).await?;
    let Some(user) = user else {
        return Err(invalid_credentials());
    };
    if user.user_type != USER_TYPE_SUPERADMIN {
        return Err(invalid_credentials());
    }

    // Superadmin is implicitly always approved; no status gate here.
    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = issue_token(&user, &state.config)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "email": user.email,
                "name": "Super Administrator",
                "type": user.user_type,
            }
        }
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/business/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account pending approval")
    ),
    tag = "auth"
)]
#[post("/auth/business/login")]
pub async fn business_login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = credentials(&payload)?;

    let user = db::users::get_user_by_email(&state.pool, email).await?;
    let Some(user) = user else {
        return Err(invalid_credentials());
    };
    if user.user_type != USER_TYPE_BUSINESS {
        return Err(invalid_credentials());
    }

    if user.status != STATUS_APPROVED {
        return Err(ApiError::forbidden(
            "Account not approved",
            "Your account is pending approval from administrator",
        ));
    }

    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let profile = db::users::get_business_profile(&state.pool, user.id).await?;
    let token = issue_token(&user, &state.config)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "email": user.email,
                "companyName": profile.as_ref().map(|p| p.legal_entity_name.clone()).unwrap_or_default(),
                "contactPersonName": profile.as_ref().map(|p| p.contact_person_name.clone()).unwrap_or_default(),
                "type": user.user_type,
                "status": user.status,
            }
        }
    })))
}

#[post("/auth/business/signup")]
pub async fn business_signup(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let legal_entity_name = require_str(&data, "legalEntityName")?;
    let gst = require_str(&data, "gst")?;
    let pan = require_str(&data, "pan")?;
    let address = require_str(&data, "address")?;
    let contact_person_name = require_str(&data, "contactPersonName")?;
    let contact_number = require_str(&data, "contactNumber")?;
    let email = require_str(&data, "email")?;
    let password = require_str(&data, "password")?;

    if !validate_email(email) {
        return Err(ApiError::bad_request(
            "Invalid email format",
            "Please provide a valid email address",
        ));
    }
    if !validate_gst(gst) {
        return Err(ApiError::bad_request(
            "Invalid GST number format",
            "Please provide a valid GST number",
        ));
    }
    if !validate_pan(pan) {
        return Err(ApiError::bad_request(
            "Invalid PAN number format",
            "Please provide a valid PAN number",
        ));
    }
    if !validate_phone(contact_number) {
        return Err(ApiError::bad_request(
            "Invalid phone number format",
            "Please provide a valid phone number",
        ));
    }

    if db::users::get_user_by_email(&state.pool, email).await?.is_some() {
        return Err(ApiError::bad_request(
            "Email already exists",
            "User with this email already registered",
        ));
    }

    let password_hash = bcrypt::hash(password, state.config.bcrypt_cost)?;

    // User and profile land together or not at all.
    let mut tx = state.pool.begin().await?;
    let user_id = db::users::create_user(
        &mut tx,
        email,
        &password_hash,
        USER_TYPE_BUSINESS,
        STATUS_PENDING,
    )
    .await?;
    db::users::create_business_profile(
        &mut tx,
        user_id,
        legal_entity_name,
        gst,
        pan,
        address,
        contact_person_name,
        contact_number,
        data.get("logo").and_then(Value::as_str),
    )
    .await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Registration request submitted successfully! Please wait for admin approval.",
        "data": {
            "userId": user_id,
            "status": STATUS_PENDING,
        }
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/individual/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
#[post("/auth/individual/login")]
pub async fn individual_login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = credentials(&payload)?;

    let user = db::users::get_user_by_email(&state.pool, email).await?;
    let Some(user) = user else {
        return Err(invalid_credentials());
    };
    if user.user_type != USER_TYPE_INDIVIDUAL {
        return Err(invalid_credentials());
    }

    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let profile = db::users::get_individual_profile(&state.pool, user.id).await?;
    let token = issue_token(&user, &state.config)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "email": user.email,
                "name": profile.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
                "type": user.user_type,
            }
        }
    })))
}

#[post("/auth/individual/signup")]
pub async fn individual_signup(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let name = require_str(&data, "name")?;
    let email = require_str(&data, "email")?;
    let contact_number = require_str(&data, "contactNumber")?;
    let address = require_str(&data, "address")?;
    let password = require_str(&data, "password")?;

    if !validate_email(email) {
        return Err(ApiError::bad_request(
            "Invalid email format",
            "Please provide a valid email address",
        ));
    }
    if !validate_phone(contact_number) {
        return Err(ApiError::bad_request(
            "Invalid phone number format",
            "Please provide a valid phone number",
        ));
    }

    if db::users::get_user_by_email(&state.pool, email).await?.is_some() {
        return Err(ApiError::bad_request(
            "Email already exists",
            "User with this email already registered",
        ));
    }

    let password_hash = bcrypt::hash(password, state.config.bcrypt_cost)?;

    let mut tx = state.pool.begin().await?;
    let user_id = db::users::create_user(
        &mut tx,
        email,
        &password_hash,
        USER_TYPE_INDIVIDUAL,
        STATUS_APPROVED,
    )
    .await?;
    db::users::create_individual_profile(&mut tx, user_id, name, contact_number, address).await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Account created successfully! You can now log in.",
        "data": {
            "userId": user_id,
        }
    })))
}
