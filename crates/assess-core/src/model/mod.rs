//! Wire and domain models for assessment submissions.

mod record;
mod stage;
mod submission;

pub use record::{Derived, FinancialMetrics, ProcessedRecord, SectionScore};
pub use stage::{OverallStatus, PipelineResult, StageName, StageResult, StageStatus, Steps};
pub use submission::{
    AssessmentData, BusinessGoals, BusinessReadiness, ExitTimeline, Industry, PerformanceRatings,
    PersonalRatings, Submission, SubmissionMetadata, WouldAcceptOffer,
};
