use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::summarize_conversations;
use crate::error::ApiError;
use crate::models::{Message, SendMessageRequest};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/messages", web::post().to(send_message))
        .route("/messages/{username}/{other}", web::get().to(get_conversation))
        .route("/conversations/{username}", web::get().to(list_conversations));
}

/// Send a direct message
///
/// POST /api/messages
///
/// Request body:
/// ```json
/// { "sender": "string", "receiver": "string", "content": "string" }
/// ```
async fn send_message(
    state: web::Data<AppState>,
    req: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    req.validate()?;

    let content = req.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("content required".to_string()));
    }
    if content.chars().count() > state.messaging.max_message_length {
        return Err(ApiError::BadRequest(format!(
            "message longer than {} characters",
            state.messaging.max_message_length
        )));
    }
    if req.sender == req.receiver {
        return Err(ApiError::BadRequest("cannot message yourself".to_string()));
    }

    state.require_user(&req.sender).await?;
    state.require_user(&req.receiver).await?;

    let message = Message::new(req.sender, req.receiver, content.to_string());
    state.store.insert_message(message.clone()).await?;

    tracing::debug!("Message {} sent {} -> {}", message.id, message.sender, message.receiver);

    Ok(HttpResponse::Ok().json(message))
}

/// GET /api/messages/{username}/{other}
///
/// Messages between the two users, oldest first. Everything `other` sent to
/// `username` is marked read.
async fn get_conversation(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (username, other) = path.into_inner();

    let marked = state.store.mark_read(&username, &other).await?;
    if marked > 0 {
        tracing::debug!("Marked {} messages from {} to {} as read", marked, other, username);
    }

    let messages = state.store.conversation(&username, &other).await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// GET /api/conversations/{username}
async fn list_conversations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let messages = state.store.messages_for(&username).await?;
    Ok(HttpResponse::Ok().json(summarize_conversations(&username, &messages)))
}
