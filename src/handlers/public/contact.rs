use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::{AppError, Result, msg};
use crate::extractors::Json;
use crate::handlers::rate_limited;
use crate::models::{ContactRequest, FranchiseApplyRequest};
use crate::util::client_ip;
use crate::validation;

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<ContactRequest>,
) -> Result<Json<SuccessResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_contact(&ip)
        .map_err(rate_limited(msg::CONTACT_TOO_MANY_REQUESTS))?;

    validation::validate_contact(&request).map_err(|details| AppError::Validation {
        error: msg::CONTACT_VALIDATION_FAILED.to_string(),
        details: json!(details),
    })?;

    let conn = state.db.get()?;
    queries::create_contact_message(
        &conn,
        request.name.as_deref().unwrap_or_default().trim(),
        request.email.as_deref().unwrap_or_default().trim(),
        request.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
        request.subject.as_deref().unwrap_or_default().trim(),
        request.message.as_deref().unwrap_or_default().trim(),
    )?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn apply_franchise(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<FranchiseApplyRequest>,
) -> Result<Json<SuccessResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_franchise(&ip)
        .map_err(rate_limited(msg::FRANCHISE_TOO_MANY_REQUESTS))?;

    validation::validate_franchise(&request).map_err(|details| AppError::Validation {
        error: msg::VALIDATION_FAILED.to_string(),
        details: json!(details),
    })?;

    // location = "city, preferredLocation" with empty parts skipped; the
    // rest of the questionnaire rides along as JSON in `message`.
    let location = [
        request.city.as_deref().map(str::trim),
        request.preferred_location.as_deref().map(str::trim),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let answers = json!({
        "idNumber": request.id_number,
        "birthDate": request.birth_date,
        "currentAddress": request.current_address,
        "fbExperience": request.fb_experience,
        "managementExperience": request.management_experience,
        "currentOccupation": request.current_occupation,
        "spaceSize": request.space_size,
        "expectedOpenDate": request.expected_open_date,
        "motivation": request.motivation,
    });

    let conn = state.db.get()?;
    queries::create_franchise_application(
        &conn,
        request.full_name.as_deref().unwrap_or_default().trim(),
        request.email.as_deref().unwrap_or_default().trim(),
        request.phone.as_deref().unwrap_or_default().trim(),
        &location,
        request.available_capital.as_deref().map(str::trim),
        Some(&serde_json::to_string(&answers)?),
    )?;
    Ok(Json(SuccessResponse { success: true }))
}
