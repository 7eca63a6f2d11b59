//! Pipeline orchestration for processed assessments.
//!
//! One submission flows through five stages: scoring, tabular export,
//! durable persistence, report rendering and mail notification. Stages are
//! independent best-effort sinks; only notify depends on render. The
//! orchestrator captures every outcome as a `StageResult` and always returns
//! an aggregate `PipelineResult`.

pub mod orchestrator;
pub mod stages;

pub use orchestrator::{Pipeline, PipelineConfig};
pub use stages::notify::{FsMailer, MailBackend, MailMessage, MemoryMailer};
pub use stages::render::{HtmlReportRenderer, RenderBackend};
