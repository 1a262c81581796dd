use axum::{extract::State, Extension, Json};
use serde::Serialize;

use milletrec_core::display_name;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct MilletItem {
    pub entity_id: String,
    pub display_name: String,
    pub review_count: usize,
}

pub(super) async fn list_millets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<MilletItem>>> {
    let data = state
        .ctx
        .entities()
        .iter()
        .map(|entity| MilletItem {
            entity_id: entity.entity_id.clone(),
            display_name: display_name(&entity.entity_id),
            review_count: entity.reviews.len(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
