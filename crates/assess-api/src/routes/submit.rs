use axum::extract::State;
use axum::Json;
use serde_json::Value;

use assess_core::errors::CoreError;
use assess_core::model::Submission;
use assess_core::schema;

use crate::dto::responses::SubmitResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn submit(
    State(state): State<AppState>,
    Json(mut raw): Json<Value>,
) -> ApiResult<Json<SubmitResponse>> {
    if raw.is_null() {
        return Err(ApiError::BadRequest("request body cannot be empty".to_string()));
    }

    // 1) Fill envelope defaults, then validate the raw document. A failed
    //    validation is fatal: nothing below runs.
    schema::apply_defaults(&mut raw, &now_rfc3339());
    schema::validate(&raw).map_err(|e| match e {
        CoreError::Validation { error } => ApiError::Validation(error),
        other => ApiError::Internal(other.to_string()),
    })?;

    let submission: Submission = serde_json::from_value(raw.clone())
        .map_err(|e| ApiError::Internal(format!("validated submission failed to decode: {e}")))?;

    // 2) Run the pipeline off the async runtime; stages block on store and
    //    collaborator calls.
    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.run(submission))
        .await
        .map_err(|e| ApiError::Internal(format!("pipeline task failed: {e}")))?;

    Ok(Json(SubmitResponse {
        message: "Assessment processing completed".to_string(),
        record_id: result.record_id.clone(),
        overall_status: result.overall_status,
        successful_steps: result.successful_steps,
        total_steps: result.total_steps,
        results: result,
        original_data: raw,
    }))
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
