use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::Serialize;

use crate::db::{queries, AppState};
use crate::error::{OptionExt, Result, msg};
use crate::extractors::{Json, Path};
use crate::handlers::rate_limited;
use crate::loyalty::{self, LoyaltyTier};
use crate::models::LoyaltyTransaction;
use crate::util::client_ip;

const RECENT_TRANSACTIONS: i64 = 20;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub loyalty_points: i64,
    pub loyalty_tier: LoyaltyTier,
    pub lifetime_points: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub next_tier: Option<LoyaltyTier>,
    pub points_to_next_tier: i64,
    pub percent: f64,
}

#[derive(Serialize)]
pub struct ClubProfileResponse {
    pub profile: ClubProfile,
    pub progress: TierProgress,
    pub transactions: Vec<LoyaltyTransaction>,
}

pub async fn club_profile(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<Json<ClubProfileResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_lookups(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let profile = queries::get_profile(&conn, &user_id).or_not_found(msg::PROFILE_NOT_FOUND)?;
    let transactions = queries::list_loyalty_transactions(&conn, &user_id, RECENT_TRANSACTIONS)?;

    let points = profile.loyalty_points;
    let tier = profile.loyalty_tier;
    Ok(Json(ClubProfileResponse {
        profile: ClubProfile {
            id: profile.id,
            full_name: profile.full_name,
            loyalty_points: points,
            loyalty_tier: tier,
            lifetime_points: profile.lifetime_points,
        },
        progress: TierProgress {
            next_tier: loyalty::next_tier(tier),
            points_to_next_tier: loyalty::points_to_next_tier(points, tier),
            percent: loyalty::tier_progress(points, tier),
        },
        transactions,
    }))
}
