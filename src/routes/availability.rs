use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use crate::error::ApiError;
use crate::models::{AvailabilityRequest, AvailabilityResponse, AvailabilityStatus};
use super::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/availability/{username}", web::get().to(get_availability))
        .route("/availability/{username}", web::post().to(set_availability));
}

fn parse_status(status: &str) -> Result<AvailabilityStatus, ApiError> {
    match status {
        "available" => Ok(AvailabilityStatus::Available),
        "unavailable" => Ok(AvailabilityStatus::Unavailable),
        _ => Err(ApiError::BadRequest(
            "status must be 'available' or 'unavailable'".to_string(),
        )),
    }
}

/// GET /api/availability/{username}
async fn get_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let calendar = state.store.get_availability(&username).await?;
    Ok(HttpResponse::Ok().json(calendar))
}

/// POST /api/availability/{username}
///
/// Request body:
/// ```json
/// { "date": "2025-03-14", "status": "available|unavailable" }
/// ```
async fn set_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let req = req.into_inner();

    let (date, status) = match (req.date.as_deref(), req.status.as_deref()) {
        (Some(date), Some(status)) if !date.is_empty() && !status.is_empty() => (date, status),
        _ => return Err(ApiError::BadRequest("date and status required".to_string())),
    };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid date: {}", date)))?;
    let status = parse_status(status)?;

    state.require_user(&username).await?;
    let availability = state.store.set_availability(&username, date, status).await?;

    tracing::debug!("{} marked {} as {}", username, date, status.as_str());

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        ok: true,
        availability,
    }))
}
