use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn get_record(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let record = state
        .pipeline
        .persistence()
        .load(&id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let Some(record) = record else {
        return Err(ApiError::NotFound);
    };

    let value = serde_json::to_value(record).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(value))
}
