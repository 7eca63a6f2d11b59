//! The pipeline orchestrator.
//!
//! Runs scoring, export, persist, render and notify in a fixed sequence.
//! Stage failures are captured, never propagated: the orchestrator always
//! returns a `PipelineResult` for a validated submission. The one branch in
//! the sequence is the render -> notify hard dependency; everything else
//! proceeds unconditionally.
//!
//! Collaborator calls (persist, render, notify) run under a caller-imposed
//! timeout; exceeding it is that stage's failure, not a pipeline fault.

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use assess_core::model::{PipelineResult, ProcessedRecord, StageName, StageResult, Steps, Submission};
use assess_core::scoring::{self, ReadinessWeights};
use assess_store::Store;

use crate::stages::export::ExportWriter;
use crate::stages::notify::{MailBackend, Notifier};
use crate::stages::persist::PersistenceAdapter;
use crate::stages::render::{RenderBackend, ReportRenderer};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Section weights for the overall readiness score.
    pub weights: ReadinessWeights,

    /// Directory receiving CSV exports.
    pub export_dir: PathBuf,

    /// Sender address for report notifications.
    pub mail_from: String,

    /// Subject prefix; the submitter's name is appended.
    pub subject_prefix: String,

    /// Upper bound on each collaborator call.
    pub stage_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights: ReadinessWeights::default(),
            export_dir: PathBuf::from("exports"),
            mail_from: "reports@localhost".to_string(),
            subject_prefix: "Assessment Report".to_string(),
            stage_timeout: Duration::from_secs(30),
        }
    }
}

pub struct Pipeline {
    cfg: PipelineConfig,
    exporter: ExportWriter,
    persistence: PersistenceAdapter,
    renderer: ReportRenderer,
    notifier: Notifier,
}

impl Pipeline {
    pub fn new(
        cfg: PipelineConfig,
        store: Arc<Store>,
        render_backend: Arc<dyn RenderBackend + Send + Sync>,
        mail_backend: Arc<dyn MailBackend + Send + Sync>,
    ) -> Self {
        let exporter = ExportWriter::new(&cfg.export_dir);
        let persistence = PersistenceAdapter::new(store.clone());
        let renderer = ReportRenderer::new(render_backend, store);
        let notifier = Notifier::new(mail_backend, cfg.mail_from.clone(), cfg.subject_prefix.clone());
        Self { cfg, exporter, persistence, renderer, notifier }
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    /// Run the full pipeline for one validated submission.
    pub fn run(&self, submission: Submission) -> PipelineResult {
        let record_id = Uuid::new_v4().to_string();
        let created_at = now_rfc3339();

        let derived = scoring::score(&submission, &self.cfg.weights);
        let record =
            ProcessedRecord::new(record_id.as_str(), created_at.as_str(), submission, derived);

        info!(record_id = %record.record_id, "pipeline run started");
        let mut steps = Steps::default();

        // Scoring is total on validated input; the stage records its output.
        steps.push(StageResult::success(
            StageName::Scoring,
            json!({
                "overall_readiness_score": record.derived.overall_readiness_score,
                "transferability_percent": record.derived.transferability.percent,
                "personal_readiness_percent": record.derived.personal_readiness.percent,
            }),
        ));

        match self.exporter.export(&record) {
            Ok(outcome) => {
                info!(record_id = %record.record_id, filename = %outcome.filename, "export written");
                steps.push(StageResult::success(
                    StageName::Export,
                    json!({ "filename": outcome.filename, "columns": outcome.columns }),
                ));
            }
            Err(e) => {
                warn!(record_id = %record.record_id, error = %e, "export failed");
                steps.push(StageResult::failure(StageName::Export, e.to_string()));
            }
        }

        {
            let persistence = self.persistence.clone();
            let r = record.clone();
            match self.with_timeout(move || persistence.persist(&r)) {
                Ok(outcome) => {
                    info!(record_id = %record.record_id, key = %outcome.key, "record persisted");
                    steps.push(StageResult::success(
                        StageName::Persist,
                        json!({ "record_id": outcome.record_id, "key": outcome.key }),
                    ));
                }
                Err(e) => {
                    warn!(record_id = %record.record_id, error = %e, "persist failed");
                    steps.push(StageResult::failure(StageName::Persist, e.to_string()));
                }
            }
        }

        let rendered = {
            let renderer = self.renderer.clone();
            let r = record.clone();
            match self.with_timeout(move || renderer.render(&r)) {
                Ok(outcome) => {
                    info!(
                        record_id = %record.record_id,
                        artifact_id = %outcome.artifact_id,
                        "report rendered"
                    );
                    steps.push(StageResult::success(
                        StageName::Render,
                        json!({
                            "filename": outcome.filename,
                            "artifact_id": outcome.artifact_id,
                            "size_bytes": outcome.bytes.len(),
                        }),
                    ));
                    Some(outcome)
                }
                Err(e) => {
                    warn!(record_id = %record.record_id, error = %e, "render failed");
                    steps.push(StageResult::failure(StageName::Render, e.to_string()));
                    None
                }
            }
        };

        // The one hard dependency: notify needs the rendered artifact.
        match rendered {
            Some(report) => {
                let notifier = self.notifier.clone();
                let r = record.clone();
                match self.with_timeout(move || notifier.notify(&r, &report)) {
                    Ok(outcome) => {
                        info!(
                            record_id = %record.record_id,
                            message_id = %outcome.message_id,
                            "notification sent"
                        );
                        steps.push(StageResult::success(
                            StageName::Notify,
                            json!({
                                "message_id": outcome.message_id,
                                "to": outcome.to,
                                "subject": outcome.subject,
                            }),
                        ));
                    }
                    Err(e) => {
                        warn!(record_id = %record.record_id, error = %e, "notify failed");
                        steps.push(StageResult::failure(StageName::Notify, e.to_string()));
                    }
                }
            }
            None => {
                steps.push(StageResult::skipped(
                    StageName::Notify,
                    "report rendering did not produce an artifact to attach",
                ));
            }
        }

        let result = PipelineResult::from_steps(record.record_id.clone(), created_at, steps);
        info!(
            record_id = %record.record_id,
            successful = result.successful_steps,
            total = result.total_steps,
            "pipeline run complete"
        );
        result
    }

    /// Run a collaborator call on a worker thread with the configured
    /// deadline. A call that outlives the deadline is abandoned and reported
    /// as a failure.
    fn with_timeout<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let timeout = self.cfg.stage_timeout;
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(f());
        });
        match rx.recv_timeout(timeout) {
            Ok(res) => res,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Err(anyhow!("stage timed out after {}ms", timeout.as_millis()))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(anyhow!("stage worker terminated unexpectedly"))
            }
        }
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
