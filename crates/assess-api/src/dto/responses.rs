use serde::Serialize;
use serde_json::Value;

use assess_core::model::{OverallStatus, PipelineResult};

/// Aggregate response for one processed submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub record_id: String,
    pub overall_status: OverallStatus,
    pub successful_steps: usize,
    pub total_steps: usize,
    pub results: PipelineResult,

    /// The validated submission as received (envelope defaults applied).
    pub original_data: Value,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
}
