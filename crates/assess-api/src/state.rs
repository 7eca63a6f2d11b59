use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use assess_pipeline::{FsMailer, HtmlReportRenderer, Pipeline, PipelineConfig};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<AppConfig>,
    pub store: Arc<assess_store::Store>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(cfg: AppConfig, store: assess_store::Store) -> Result<Self> {
        let store = Arc::new(store);

        let render_backend = Arc::new(HtmlReportRenderer::new()?);
        let mail_backend = Arc::new(FsMailer::new(&cfg.outbox_dir));

        let pipeline_cfg = PipelineConfig {
            weights: cfg.scoring.weights(),
            export_dir: PathBuf::from(&cfg.export_dir),
            mail_from: cfg.mail.from_email.clone(),
            subject_prefix: cfg.mail.subject_prefix.clone(),
            stage_timeout: Duration::from_secs(cfg.stage_timeout_secs),
        };
        let pipeline = Arc::new(Pipeline::new(
            pipeline_cfg,
            store.clone(),
            render_backend,
            mail_backend,
        ));

        Ok(Self {
            cfg: Arc::new(cfg),
            store,
            pipeline,
        })
    }
}
