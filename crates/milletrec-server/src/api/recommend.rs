use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use milletrec_engine::{
    CookingPreference, Recommendation, RecommendationSession, TastePreference, TexturePreference,
    UserPreferences,
};
use milletrec_store::RequestLogEntry;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct RecommendRequest {
    pub health_concerns: Vec<String>,
    #[serde(default)]
    pub health_goal: Option<String>,
    #[serde(default)]
    pub user_query: Option<String>,
    #[serde(default)]
    pub taste_preference: TastePreference,
    #[serde(default)]
    pub texture_preference: TexturePreference,
    #[serde(default)]
    pub cooking_preference: CookingPreference,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendData {
    pub recommendations: Vec<Recommendation>,
}

pub(super) async fn recommend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<ApiResponse<RecommendData>>, ApiError> {
    let concerns: Vec<String> = request
        .health_concerns
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if concerns.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "at least one health concern is required",
        ));
    }

    let raw_input = serde_json::to_value(&request).unwrap_or_default();

    let preferences = UserPreferences {
        health_concerns: concerns,
        health_goal: request.health_goal,
        user_query: request.user_query,
        taste_preference: request.taste_preference,
        texture_preference: request.texture_preference,
        cooking_preference: request.cooking_preference,
    };
    let top_k = request.top_k.unwrap_or(state.default_top_k);

    let session = RecommendationSession::new(&state.ctx, &state.matcher, &state.scorer);
    let outcome = session.recommend(&preferences, top_k);

    let entry = RequestLogEntry {
        timestamp: Utc::now(),
        request_id: req_id.0.clone(),
        raw_input,
        parsed_preferences: preferences,
        candidate_scores: outcome.candidate_scores,
        top_recommendations: outcome.recommendations.clone(),
    };
    if let Err(e) = state.request_log.append(&entry) {
        // The response is still valid without the audit row.
        tracing::warn!(error = %e, request_id = %req_id.0, "failed to append request log entry");
    }

    Ok(Json(ApiResponse {
        data: RecommendData {
            recommendations: outcome.recommendations,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
