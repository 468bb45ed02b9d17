// Route exports
pub mod admin;
pub mod auth;
pub mod availability;
pub mod health;
pub mod matches;
pub mod messages;
pub mod profiles;
pub mod relationships;

use actix_web::web;
use std::sync::Arc;
use crate::config::{AdminSettings, MatchingSettings, MessagingSettings, Settings};
use crate::error::ApiError;
use crate::models::UserAccount;
use crate::services::Store;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub matching: MatchingSettings,
    pub messaging: MessagingSettings,
    pub admin: AdminSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, settings: &Settings) -> Self {
        Self {
            store,
            matching: settings.matching.clone(),
            messaging: settings.messaging.clone(),
            admin: settings.admin.clone(),
        }
    }

    /// Fetch an account or fail with 404
    pub async fn require_user(&self, username: &str) -> Result<UserAccount, ApiError> {
        self.store
            .get_user(username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {} not found", username)))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure)
            .configure(auth::configure)
            .configure(profiles::configure)
            .configure(matches::configure)
            .configure(availability::configure)
            .configure(relationships::configure)
            .configure(messages::configure)
            .configure(admin::configure),
    );
}
