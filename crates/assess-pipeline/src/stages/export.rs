//! Tabular export: one processed record, one CSV row.
//!
//! The column set is a single static table, so the header is byte-identical
//! across runs for the same schema version. Columns are fully qualified
//! (`assessment_data.<section>.<field>`, `derived.<metric>`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use assess_core::model::ProcessedRecord;

/// Export stage outcome.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub filename: String,
    pub path: PathBuf,
    pub columns: usize,
}

/// Writes each processed record as a single-row CSV file.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    out_dir: PathBuf,
}

impl ExportWriter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self { out_dir: out_dir.as_ref().to_path_buf() }
    }

    pub fn export(&self, record: &ProcessedRecord) -> Result<ExportOutcome> {
        let cells = flatten(record);
        let filename = format!("assessment_{}.csv", record.record_id);
        let path = self.out_dir.join(&filename);

        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating export dir {}", self.out_dir.display()))?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(cells.iter().map(|(name, _)| name.as_str()))?;
        writer.write_record(cells.iter().map(|(_, value)| value.as_str()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing csv writer: {e}"))?;

        fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;

        Ok(ExportOutcome { filename, path, columns: cells.len() })
    }
}

/// Flatten a record into `(column, value)` pairs. Header and row are derived
/// from the same list, which is what keeps the ordering stable.
fn flatten(record: &ProcessedRecord) -> Vec<(String, String)> {
    let mut cells: Vec<(String, String)> = Vec::with_capacity(80);
    let submission = &record.submission;
    let goals = &submission.assessment_data.business_goals_and_financials;
    let derived = &record.derived;

    let mut push = |name: &str, value: String| cells.push((name.to_string(), value));

    push("record_id", record.record_id.clone());
    push("created_at", record.created_at.clone());
    push("metadata.date_sent", submission.metadata.date_sent.clone());
    push("metadata.source", submission.metadata.source.clone());
    push("metadata.version", submission.metadata.version.clone());
    push("first_name", submission.first_name.clone());
    push("last_name", submission.last_name.clone());
    push("email", submission.email.clone());
    push("phone_number", submission.phone_number.clone());

    let goals_prefix = "assessment_data.business_goals_and_financials";
    push(&format!("{goals_prefix}.company_name"), goals.company_name.clone());
    push(&format!("{goals_prefix}.company_industry"), super::wire_str(&goals.company_industry));
    push(&format!("{goals_prefix}.number_of_employees"), num(goals.number_of_employees));
    push(&format!("{goals_prefix}.current_business_value"), num(goals.current_business_value));
    push(&format!("{goals_prefix}.target_sale_price"), num(goals.target_sale_price));
    push(&format!("{goals_prefix}.last_year_revenue"), num(goals.last_year_revenue));
    push(&format!("{goals_prefix}.last_year_profit"), num(goals.last_year_profit));
    push(
        &format!("{goals_prefix}.current_year_estimated_revenue"),
        num(goals.current_year_estimated_revenue),
    );
    push(
        &format!("{goals_prefix}.current_year_estimated_profit"),
        num(goals.current_year_estimated_profit),
    );
    push(&format!("{goals_prefix}.planned_exit_timeline"), super::wire_str(&goals.planned_exit_timeline));
    push(&format!("{goals_prefix}.would_accept_offer"), super::wire_str(&goals.would_accept_offer));
    push(&format!("{goals_prefix}.business_readiness"), super::wire_str(&goals.business_readiness));

    let performance_prefix = "assessment_data.business_performance_and_transferability";
    for (name, value) in submission
        .assessment_data
        .business_performance_and_transferability
        .entries()
    {
        push(&format!("{performance_prefix}.{name}"), value.to_string());
    }

    let personal_prefix = "assessment_data.personal_readiness_for_business_owners";
    for (name, value) in submission
        .assessment_data
        .personal_readiness_for_business_owners
        .entries()
    {
        push(&format!("{personal_prefix}.{name}"), value.to_string());
    }

    push("derived.transferability.mean", num(derived.transferability.mean));
    push("derived.transferability.percent", num(derived.transferability.percent));
    push("derived.personal_readiness.mean", num(derived.personal_readiness.mean));
    push("derived.personal_readiness.percent", num(derived.personal_readiness.percent));
    push("derived.overall_readiness_score", num(derived.overall_readiness_score));

    let fin = &derived.financial;
    push("derived.financial.ebitda_multiple", num(fin.ebitda_multiple));
    push("derived.financial.ebitda_margin", num(fin.ebitda_margin));
    push("derived.financial.revenue_per_employee", opt_num(fin.revenue_per_employee));
    push("derived.financial.last_year_profit_margin", opt_num(fin.last_year_profit_margin));
    push(
        "derived.financial.current_year_profit_margin",
        opt_num(fin.current_year_profit_margin),
    );
    push("derived.financial.valuation_gap", num(fin.valuation_gap));
    push("derived.financial.revenue_growth_ratio", opt_num(fin.revenue_growth_ratio));
    push("derived.financial.profit_growth_ratio", opt_num(fin.profit_growth_ratio));
    push("derived.financial.two_year_average_revenue", num(fin.two_year_average_revenue));
    push("derived.financial.two_year_average_profit", num(fin.two_year_average_profit));
    push("derived.financial.range_of_value_low", num(fin.range_of_value_low));
    push("derived.financial.estimated_current_value", num(fin.estimated_current_value));
    push("derived.financial.range_of_value_high", num(fin.range_of_value_high));
    push("derived.financial.profit_gap_surplus", opt_num(fin.profit_gap_surplus));
    push("derived.financial.exit_value_opportunity", num(fin.exit_value_opportunity));

    cells
}

fn num(v: f64) -> String {
    format!("{v}")
}

/// Undefined metrics export as an empty cell.
fn opt_num(v: Option<f64>) -> String {
    v.map(|v| format!("{v}")).unwrap_or_default()
}
