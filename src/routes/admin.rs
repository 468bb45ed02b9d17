use actix_web::{web, HttpResponse};
use crate::error::ApiError;
use crate::models::{
    AdminUserDetail, AdminUserSummary, OkResponse, Profile, ProfileMap, ProfileRequest,
    SearchQuery, UserAccount,
};
use super::{profiles::profile_from_request, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/admin/users/{admin}", web::get().to(list_users))
        .route("/admin/search/{admin}", web::get().to(search_users))
        .route("/admin/user/{admin}/{target}", web::get().to(get_user_detail))
        .route("/admin/user/{admin}/{target}", web::post().to(update_user_profile));
}

async fn require_admin(state: &AppState, admin: &str) -> Result<UserAccount, ApiError> {
    match state.store.get_user(admin).await? {
        Some(account) if account.is_admin() => Ok(account),
        _ => {
            tracing::warn!("Rejected admin request from {}", admin);
            Err(ApiError::Forbidden("admin access required".to_string()))
        }
    }
}

fn summarize(accounts: Vec<UserAccount>, profiles: &ProfileMap) -> Vec<AdminUserSummary> {
    accounts
        .into_iter()
        .map(|account| AdminUserSummary {
            profile: profiles.get(&account.username).cloned(),
            username: account.username,
            role: account.role,
        })
        .collect()
}

/// Case-insensitive match on username or any class code
fn matches_search(username: &str, profile: Option<&Profile>, needle: &str) -> bool {
    username.to_lowercase().contains(needle)
        || profile
            .map(|p| p.classes.iter().any(|c| c.to_lowercase().contains(needle)))
            .unwrap_or(false)
}

/// GET /api/admin/users/{admin}
async fn list_users(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &path.into_inner()).await?;

    let accounts = state.store.list_users().await?;
    let profiles = state.store.get_all_profiles().await?;

    Ok(HttpResponse::Ok().json(summarize(accounts, &profiles)))
}

/// GET /api/admin/search/{admin}?q=text
async fn search_users(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &path.into_inner()).await?;

    let needle = query.q.trim().to_lowercase();
    let profiles = state.store.get_all_profiles().await?;
    let accounts: Vec<UserAccount> = state
        .store
        .list_users()
        .await?
        .into_iter()
        .filter(|a| needle.is_empty() || matches_search(&a.username, profiles.get(&a.username), &needle))
        .collect();

    tracing::debug!("Admin search {:?} matched {} users", needle, accounts.len());

    Ok(HttpResponse::Ok().json(summarize(accounts, &profiles)))
}

/// GET /api/admin/user/{admin}/{target}
async fn get_user_detail(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (admin, target) = path.into_inner();
    require_admin(&state, &admin).await?;

    let account = state.require_user(&target).await?;
    let profile = state.store.get_profile(&target).await?;
    let friends = state.store.get_relationships(&target).await?.friends;
    let calendar = state.store.get_availability(&target).await?;

    Ok(HttpResponse::Ok().json(AdminUserDetail {
        username: account.username,
        role: account.role,
        profile,
        friends,
        calendar,
    }))
}

/// POST /api/admin/user/{admin}/{target}
///
/// Replaces the target's profile. Same body and validation as the
/// profile endpoint.
async fn update_user_profile(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    req: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let (admin, target) = path.into_inner();
    require_admin(&state, &admin).await?;
    state.require_user(&target).await?;

    let profile = profile_from_request(req.into_inner())?;
    state.store.upsert_profile(&target, profile).await?;

    tracing::info!("Admin {} updated profile of {}", admin, target);

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
