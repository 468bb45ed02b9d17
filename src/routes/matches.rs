use actix_web::{web, HttpResponse};
use std::collections::HashSet;
use crate::core::compute_matches;
use crate::error::ApiError;
use crate::models::{FindMatchesResponse, MatchesQuery};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/{username}", web::get().to(find_matches));
}

/// Find study partners
///
/// GET /api/matches/{username}?limit=20
///
/// Loads the requester's profile, every stored profile and the requester's
/// friends, then ranks candidates. Friends are never offered again.
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let limit = state.matching.effective_limit(query.limit);

    tracing::info!("Finding matches for user: {}, limit: {}", username, limit);

    let requester_profile = state
        .store
        .get_profile(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no profile for {}", username)))?;

    let all_profiles = state.store.get_all_profiles().await?;

    let excluded: HashSet<String> = state
        .store
        .get_relationships(&username)
        .await?
        .friends
        .into_iter()
        .collect();

    tracing::debug!(
        "Scoring {} profiles for {} ({} friends excluded)",
        all_profiles.len(),
        username,
        excluded.len()
    );

    let mut matches = compute_matches(&username, &requester_profile, &all_profiles, &excluded);
    let total_results = matches.len();
    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        matches.len(),
        username,
        total_results
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_results,
    }))
}
