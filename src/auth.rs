// src/auth.rs
//
// JWT issuing/verification and the role-gating middleware. The middleware
// loads the referenced user row on every request, so a blocked account
// loses access on its next call even though its token stays decodable
// until natural expiry.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use chrono::{Duration, Utc};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{User, STATUS_APPROVED, USER_TYPE_SUPERADMIN};
use crate::{db, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub email: String,
    pub user_type: String,
    pub exp: usize,
}

/// Authenticated caller, inserted into request extensions by `RequireAuth`
/// and read by handlers via `web::ReqData<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub user_type: String,
    pub status: String,
}

pub fn issue_token(user: &User, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::hours(config.jwt_expire_hours)).timestamp() as usize;

    let claims = Claims {
        user_id: user.id,
        email: user.email.clone(),
        user_type: user.user_type.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Superadmin accounts are implicitly always approved; everyone else must
/// carry the literal `approved` status.
pub fn is_active(user_type: &str, status: &str) -> bool {
    user_type == USER_TYPE_SUPERADMIN || status == STATUS_APPROVED
}

/// Middleware that:
/// - takes `Authorization: Bearer <jwt>` and validates the token
/// - loads the referenced user row and checks account status
/// - checks the user's role against the route's allowed set
/// - inserts `AuthUser` into `req.extensions_mut()`
pub struct RequireAuth {
    allowed: &'static [&'static str],
}

impl RequireAuth {
    pub fn roles(allowed: &'static [&'static str]) -> RequireAuth {
        RequireAuth { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            allowed: self.allowed,
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    allowed: &'static [&'static str],
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed = self.allowed;

        Box::pin(async move {
            // Missing state is a deployment fault, not a bad request.
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    Error::from(ApiError::Internal("application state missing".to_string()))
                })?;

            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("");

            let Some(token) = auth_header.strip_prefix("Bearer ") else {
                return Err(ApiError::unauthorized(
                    "Access token required",
                    "No valid token provided",
                )
                .into());
            };

            let claims = match decode_token(token, &state.config.jwt_secret) {
                Ok(claims) => claims,
                Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                    return Err(
                        ApiError::unauthorized("Token expired", "Please login again").into(),
                    );
                }
                Err(_) => {
                    return Err(
                        ApiError::unauthorized("Invalid token", "Token is malformed").into(),
                    );
                }
            };

            let user = db::users::get_user_by_id(&state.pool, claims.user_id)
                .await
                .map_err(ApiError::from)?;

            let Some(user) = user else {
                return Err(ApiError::unauthorized("Invalid token", "User not found").into());
            };

            if !is_active(&user.user_type, &user.status) {
                return Err(ApiError::forbidden(
                    "Account not approved",
                    "Your account status does not allow access",
                )
                .into());
            }

            if !allowed.is_empty() && !allowed.contains(&user.user_type.as_str()) {
                return Err(ApiError::forbidden(
                    "Insufficient permissions",
                    "Access denied for this user type",
                )
                .into());
            }

            req.extensions_mut().insert(AuthUser {
                id: user.id,
                email: user.email,
                user_type: user.user_type,
                status: user.status,
            });

            service.call(req).await
        })
    }
}
