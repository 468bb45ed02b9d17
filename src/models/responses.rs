use serde::{Deserialize, Serialize};
use crate::models::domain::{Availability, Match, Profile, Role};

/// Response for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<Match>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub ok: bool,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSavedResponse {
    pub ok: bool,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub availability: Availability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingResponse {
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsResponse {
    pub friends: Vec<String>,
}

/// Row of the admin user list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserSummary {
    pub username: String,
    pub role: Role,
    pub profile: Option<Profile>,
}

/// Everything the admin dashboard shows about one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserDetail {
    pub username: String,
    pub role: Role,
    pub profile: Option<Profile>,
    pub friends: Vec<String>,
    pub calendar: Availability,
}
