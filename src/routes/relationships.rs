use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{FriendsResponse, OkResponse, PendingResponse, RelationshipRequest};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/relationships/pending/{username}", web::get().to(get_pending))
        .route("/relationships/friends/{username}", web::get().to(get_friends))
        .route("/relationships/request", web::post().to(send_request))
        .route("/relationships/accept", web::post().to(accept_request))
        .route("/relationships/deny", web::post().to(deny_request));
}

fn validated(req: web::Json<RelationshipRequest>) -> Result<RelationshipRequest, ApiError> {
    let req = req.into_inner();
    req.validate()?;
    Ok(req)
}

/// GET /api/relationships/pending/{username}
async fn get_pending(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let relationships = state.store.get_relationships(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PendingResponse {
        pending: relationships.pending,
    }))
}

/// GET /api/relationships/friends/{username}
async fn get_friends(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let relationships = state.store.get_relationships(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FriendsResponse {
        friends: relationships.friends,
    }))
}

/// Send a friend request
///
/// POST /api/relationships/request
///
/// Request body:
/// ```json
/// { "from": "string", "to": "string" }
/// ```
///
/// Self requests, duplicate pending requests and requests between friends
/// are rejected with distinct error codes.
async fn send_request(
    state: web::Data<AppState>,
    req: web::Json<RelationshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = validated(req)?;

    if req.from != req.to {
        state.require_user(&req.from).await?;
        state.require_user(&req.to).await?;
    }

    state.store.send_request(&req.from, &req.to).await?;
    tracing::info!("Friend request {} -> {}", req.from, req.to);

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

/// Accept a pending request; `to` is the user accepting
///
/// POST /api/relationships/accept
async fn accept_request(
    state: web::Data<AppState>,
    req: web::Json<RelationshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = validated(req)?;

    state.store.accept_request(&req.from, &req.to).await?;
    tracing::info!("{} accepted friend request from {}", req.to, req.from);

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

/// Deny a pending request; `to` is the user denying
///
/// POST /api/relationships/deny
async fn deny_request(
    state: web::Data<AppState>,
    req: web::Json<RelationshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = validated(req)?;

    let removed = state.store.deny_request(&req.from, &req.to).await?;
    if removed {
        tracing::info!("{} denied friend request from {}", req.to, req.from);
    }

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
