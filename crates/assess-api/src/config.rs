use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use assess_core::scoring::ReadinessWeights;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub listen_addr: String,
    pub log_level: String,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    pub store_root: String,
    #[serde(default = "AppConfig::default_export_dir")]
    pub export_dir: String,
    #[serde(default = "AppConfig::default_outbox_dir")]
    pub outbox_dir: String,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default = "AppConfig::default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            cors: CorsConfig::default(),
            telemetry: TelemetryConfig::default(),
            store_root: ".assess".to_string(),
            export_dir: Self::default_export_dir(),
            outbox_dir: Self::default_outbox_dir(),
            scoring: ScoringConfig::default(),
            mail: MailConfig::default(),
            stage_timeout_secs: Self::default_stage_timeout_secs(),
        }
    }
}

impl AppConfig {
    fn default_export_dir() -> String {
        ".assess/exports".to_string()
    }

    fn default_outbox_dir() -> String {
        ".assess/outbox".to_string()
    }

    fn default_stage_timeout_secs() -> u64 {
        30
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allow_any_origin: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allow_any_origin: true, allowed_origins: vec![] }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "TelemetryConfig::default_format")]
    pub format: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { format: Self::default_format(), json: false }
    }
}

impl TelemetryConfig {
    fn default_format() -> String {
        "pretty".to_string()
    }
}

/// Section weights for the overall readiness score. A policy decision, so it
/// lives in configuration rather than in the scoring engine.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default = "ScoringConfig::default_business_weight")]
    pub business_weight: f64,
    #[serde(default = "ScoringConfig::default_personal_weight")]
    pub personal_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            business_weight: Self::default_business_weight(),
            personal_weight: Self::default_personal_weight(),
        }
    }
}

impl ScoringConfig {
    fn default_business_weight() -> f64 {
        0.6
    }

    fn default_personal_weight() -> f64 {
        0.4
    }

    pub fn weights(&self) -> ReadinessWeights {
        ReadinessWeights {
            business: self.business_weight,
            personal: self.personal_weight,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default = "MailConfig::default_from_email")]
    pub from_email: String,
    #[serde(default = "MailConfig::default_subject_prefix")]
    pub subject_prefix: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_email: Self::default_from_email(),
            subject_prefix: Self::default_subject_prefix(),
        }
    }
}

impl MailConfig {
    fn default_from_email() -> String {
        "reports@localhost".to_string()
    }

    fn default_subject_prefix() -> String {
        "Assessment Report".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Args {
    pub config: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        let mut config: Option<String> = None;
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(v) = it.next() {
                        config = Some(v);
                    }
                }
                _ => {}
            }
        }
        Self { config }
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let cfg = match path {
        None => AppConfig::default(),
        Some(p) => {
            let raw = fs::read_to_string(Path::new(p))?;
            let mut cfg: AppConfig = serde_json::from_str(&raw)
                .map_err(|e| anyhow!("invalid config json: {e}"))?;
            if cfg.listen_addr.trim().is_empty() {
                cfg.listen_addr = AppConfig::default().listen_addr;
            }
            if cfg.log_level.trim().is_empty() {
                cfg.log_level = AppConfig::default().log_level;
            }
            cfg
        }
    };

    let w = cfg.scoring;
    if !(w.business_weight >= 0.0 && w.personal_weight >= 0.0) {
        return Err(anyhow!("scoring weights must be non-negative"));
    }
    if w.business_weight + w.personal_weight <= 0.0 {
        return Err(anyhow!("scoring weights must not both be zero"));
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.scoring.business_weight, 0.6);
        assert_eq!(cfg.scoring.personal_weight, 0.4);
        assert_eq!(cfg.stage_timeout_secs, 30);
    }

    #[test]
    fn negative_weights_rejected() {
        let td = tempfile::TempDir::new().unwrap();
        let path = td.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "listen_addr": "127.0.0.1:0",
                "log_level": "info",
                "store_root": ".assess",
                "scoring": {"business_weight": -1.0, "personal_weight": 0.5}
            }"#,
        )
        .unwrap();
        assert!(load_config(Some(path.to_str().unwrap())).is_err());
    }

    #[test]
    fn custom_weights_load() {
        let td = tempfile::TempDir::new().unwrap();
        let path = td.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "listen_addr": "127.0.0.1:0",
                "log_level": "info",
                "store_root": ".assess",
                "scoring": {"business_weight": 0.5, "personal_weight": 0.5}
            }"#,
        )
        .unwrap();
        let cfg = load_config(Some(path.to_str().unwrap())).unwrap();
        let weights = cfg.scoring.weights();
        assert_eq!(weights.business, 0.5);
        assert_eq!(weights.personal, 0.5);
    }
}
