//! Processed record: a submission enriched with derived scores.

use serde::{Deserialize, Serialize};

use super::submission::Submission;

/// A submission enriched with a generated identifier, a creation timestamp
/// and the scoring engine's output. Created once per pipeline run and never
/// mutated after scoring completes.
///
/// The submission fields are flattened so the stored JSON carries the
/// original data at the top level next to `record_id`, `created_at` and
/// `derived`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub record_id: String,
    pub created_at: String,
    #[serde(flatten)]
    pub submission: Submission,
    pub derived: Derived,
}

impl ProcessedRecord {
    /// Assemble a processed record. Identifier and timestamp are injected by
    /// the caller; core never reads clocks or generates ids.
    pub fn new(
        record_id: impl Into<String>,
        created_at: impl Into<String>,
        submission: Submission,
        derived: Derived,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            created_at: created_at.into(),
            submission,
            derived,
        }
    }
}

/// Scoring engine output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Derived {
    /// Business performance & transferability section score.
    pub transferability: SectionScore,

    /// Personal readiness section score.
    pub personal_readiness: SectionScore,

    /// Weighted combination of the two normalized section scores, 0-100.
    pub overall_readiness_score: f64,

    pub financial: FinancialMetrics,
}

/// Score summary for one rating section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionScore {
    /// Arithmetic mean of the section's ratings, in [1, 6].
    pub mean: f64,

    /// Normalized percentage: `(mean - 1) / 5 * 100`, in [0, 100].
    pub percent: f64,
}

/// Metrics derived from the financial section.
///
/// A `None` means the metric is undefined for this submission (a required
/// denominator was zero). Defined values are always finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub ebitda_multiple: f64,
    pub ebitda_margin: f64,
    pub revenue_per_employee: Option<f64>,
    pub last_year_profit_margin: Option<f64>,
    pub current_year_profit_margin: Option<f64>,
    pub valuation_gap: f64,
    pub revenue_growth_ratio: Option<f64>,
    pub profit_growth_ratio: Option<f64>,
    pub two_year_average_revenue: f64,
    pub two_year_average_profit: f64,
    pub range_of_value_low: f64,
    pub estimated_current_value: f64,
    pub range_of_value_high: f64,
    pub profit_gap_surplus: Option<f64>,
    pub exit_value_opportunity: f64,
}
