//! Per-stage and aggregate pipeline outcome types.
//!
//! Stage failures are values, not faults: every stage produces exactly one
//! `StageResult`, and the orchestrator aggregates them into a
//! `PipelineResult` instead of propagating errors to its caller.

use std::fmt::{self, Display};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The five counted pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Scoring,
    Export,
    Persist,
    Render,
    Notify,
}

impl StageName {
    pub const ALL: [StageName; 5] = [
        StageName::Scoring,
        StageName::Export,
        StageName::Persist,
        StageName::Render,
        StageName::Notify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Scoring => "scoring",
            StageName::Export => "export",
            StageName::Persist => "persist",
            StageName::Render => "render",
            StageName::Notify => "notify",
        }
    }
}

impl Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    Failure,
    Skipped,
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageName,
    pub status: StageStatus,

    /// Stage-specific payload on success (export filename, storage key,
    /// report artifact id, message id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    /// Human-readable reason on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Why the stage did not run, when skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StageResult {
    pub fn success(stage: StageName, payload: serde_json::Value) -> Self {
        Self {
            stage,
            status: StageStatus::Success,
            payload: Some(payload),
            error: None,
            reason: None,
        }
    }

    pub fn failure(stage: StageName, error: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Failure,
            payload: None,
            error: Some(error.into()),
            reason: None,
        }
    }

    pub fn skipped(stage: StageName, reason: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            payload: None,
            error: None,
            reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StageStatus::Success
    }
}

/// Stage results in execution order.
///
/// Serializes as a JSON object keyed by stage name, preserving execution
/// order in the emitted document.
#[derive(Debug, Clone, Default)]
pub struct Steps(pub Vec<StageResult>);

impl Steps {
    pub fn push(&mut self, result: StageResult) {
        self.0.push(result);
    }

    pub fn get(&self, stage: StageName) -> Option<&StageResult> {
        self.0.iter().find(|r| r.stage == stage)
    }

    pub fn successful(&self) -> usize {
        self.0.iter().filter(|r| r.is_success()).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Steps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for step in &self.0 {
            map.serialize_entry(step.stage.as_str(), step)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Success,
    PartialSuccess,
    Failure,
}

/// Aggregate outcome of a full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub record_id: String,
    pub timestamp: String,
    pub overall_status: OverallStatus,
    pub successful_steps: usize,
    pub total_steps: usize,
    pub steps: Steps,
}

impl PipelineResult {
    /// Assemble the aggregate from per-stage outcomes.
    ///
    /// Invariants: `successful_steps` counts `success` results only, and
    /// `total_steps` counts every attempted stage, skipped included.
    pub fn from_steps(
        record_id: impl Into<String>,
        timestamp: impl Into<String>,
        steps: Steps,
    ) -> Self {
        let successful_steps = steps.successful();
        let total_steps = steps.len();
        let overall_status = if successful_steps == total_steps && total_steps > 0 {
            OverallStatus::Success
        } else if successful_steps > 0 {
            OverallStatus::PartialSuccess
        } else {
            OverallStatus::Failure
        };
        Self {
            record_id: record_id.into(),
            timestamp: timestamp.into(),
            overall_status,
            successful_steps,
            total_steps,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_serialize_in_execution_order() {
        let mut steps = Steps::default();
        steps.push(StageResult::success(
            StageName::Scoring,
            serde_json::json!({"overall": 80.0}),
        ));
        steps.push(StageResult::failure(StageName::Render, "backend down"));
        steps.push(StageResult::skipped(StageName::Notify, "no report artifact"));

        let s = serde_json::to_string(&steps).unwrap();
        let scoring = s.find("\"scoring\"").unwrap();
        let render = s.find("\"render\"").unwrap();
        let notify = s.find("\"notify\"").unwrap();
        assert!(scoring < render && render < notify);
    }

    #[test]
    fn aggregate_counts_and_status() {
        let mut steps = Steps::default();
        steps.push(StageResult::success(StageName::Scoring, serde_json::json!({})));
        steps.push(StageResult::failure(StageName::Export, "disk full"));
        steps.push(StageResult::success(StageName::Persist, serde_json::json!({})));
        steps.push(StageResult::failure(StageName::Render, "backend down"));
        steps.push(StageResult::skipped(StageName::Notify, "no report artifact"));

        let result = PipelineResult::from_steps("id", "ts", steps);
        assert_eq!(result.successful_steps, 2);
        assert_eq!(result.total_steps, 5);
        assert_eq!(result.overall_status, OverallStatus::PartialSuccess);
    }

    #[test]
    fn all_failures_is_failure() {
        let mut steps = Steps::default();
        steps.push(StageResult::failure(StageName::Export, "a"));
        steps.push(StageResult::failure(StageName::Persist, "b"));

        let result = PipelineResult::from_steps("id", "ts", steps);
        assert_eq!(result.overall_status, OverallStatus::Failure);
        assert_eq!(result.successful_steps, 0);
    }
}
