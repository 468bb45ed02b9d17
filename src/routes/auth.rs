use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{AuthRequest, AuthResponse, Role, UserAccount};
use crate::services::{secure_password, verify_password, StoreError};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/signup", web::post().to(signup))
        .route("/login", web::post().to(login));
}

/// Create an account
///
/// POST /api/signup
///
/// Request body:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
async fn signup(
    state: web::Data<AppState>,
    req: web::Json<AuthRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner().trimmed();
    if req.is_blank() {
        return Err(ApiError::BadRequest("username and password required".to_string()));
    }
    req.validate()?;

    let password = secure_password(&req.password);
    let role = if state.admin.is_admin_username(&req.username) {
        Role::Admin
    } else {
        Role::User
    };

    let account = UserAccount {
        username: req.username.clone(),
        password_hash: password.hashed,
        salt: password.salt,
        role,
        created_at: chrono::Utc::now(),
    };

    state.store.create_user(account).await.map_err(|e| match e {
        StoreError::Conflict(_) => ApiError::Conflict("username already exists".to_string()),
        other => other.into(),
    })?;

    tracing::info!("Created account {} ({})", req.username, role.as_str());

    Ok(HttpResponse::Ok().json(AuthResponse {
        ok: true,
        username: req.username,
        role,
    }))
}

/// Check credentials
///
/// POST /api/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<AuthRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner().trimmed();
    if req.is_blank() {
        return Err(ApiError::BadRequest("username and password required".to_string()));
    }

    let invalid = || ApiError::Unauthorized("invalid credentials".to_string());

    let account = state.store.get_user(&req.username).await?.ok_or_else(invalid)?;
    if !verify_password(&req.password, &account.salt, &account.password_hash) {
        tracing::info!("Failed login for {}", req.username);
        return Err(invalid());
    }

    tracing::debug!("User {} logged in", account.username);

    Ok(HttpResponse::Ok().json(AuthResponse {
        ok: true,
        username: account.username,
        role: account.role,
    }))
}
