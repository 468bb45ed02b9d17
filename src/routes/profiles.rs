use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{Profile, ProfileRequest, ProfileSavedResponse};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile/{username}", web::get().to(get_profile))
        .route("/profile/{username}", web::post().to(save_profile))
        .route("/profiles", web::get().to(list_profiles));
}

/// Validate a profile body into a normalized profile
pub(crate) fn profile_from_request(req: ProfileRequest) -> Result<Profile, ApiError> {
    req.validate()?;
    req.into_profile()
        .ok_or_else(|| ApiError::BadRequest("classes must contain at least one class".to_string()))
}

/// GET /api/profile/{username}
///
/// Returns the profile, or `null` when the user has not created one yet.
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let profile = state.store.get_profile(&username).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/profile/{username}
///
/// Request body:
/// ```json
/// {
///   "classes": ["MAC2311"],
///   "studyPreference": "long|frequent",
///   "academicYear": "freshman|sophomore|junior|senior|graduate",
///   "studyGoals": ["exam", "homework", "review"],
///   "studyFrequency": "once|before-exams|daily|other"
/// }
/// ```
async fn save_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    state.require_user(&username).await?;

    let profile = profile_from_request(req.into_inner())?;
    state.store.upsert_profile(&username, profile.clone()).await?;

    tracing::info!("Saved profile for {} ({} classes)", username, profile.classes.len());

    Ok(HttpResponse::Ok().json(ProfileSavedResponse { ok: true, profile }))
}

/// GET /api/profiles
async fn list_profiles(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let profiles = state.store.get_all_profiles().await?;
    Ok(HttpResponse::Ok().json(profiles))
}
