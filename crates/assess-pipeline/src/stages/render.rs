//! Report rendering: processed record in, self-contained document out.
//!
//! The document collaborator sits behind `RenderBackend`; the built-in
//! implementation renders an HTML report from an embedded tera template.
//! The stage depends only on the processed record, so it runs regardless of
//! how earlier sinks fared.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tera::Tera;

use assess_core::model::ProcessedRecord;
use assess_store::Store;

use super::questions;

const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html.tera");

/// Opaque document collaborator: template context in, document bytes out.
pub trait RenderBackend {
    fn render(&self, context: &Value) -> Result<Vec<u8>>;
}

/// Built-in backend producing a self-contained HTML report.
pub struct HtmlReportRenderer {
    tera: Tera,
}

impl HtmlReportRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", REPORT_TEMPLATE)
            .context("parsing report template")?;
        Ok(Self { tera })
    }
}

impl RenderBackend for HtmlReportRenderer {
    fn render(&self, context: &Value) -> Result<Vec<u8>> {
        let ctx = tera::Context::from_serialize(context).context("building template context")?;
        let html = self.tera.render("report.html", &ctx).context("rendering report")?;
        Ok(html.into_bytes())
    }
}

/// Render stage outcome. `bytes` feeds the notify stage; the artifact id
/// addresses the stored copy.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub filename: String,
    pub artifact_id: String,
    pub bytes: Vec<u8>,
}

/// Renders the report and files it in the artifact store.
#[derive(Clone)]
pub struct ReportRenderer {
    backend: Arc<dyn RenderBackend + Send + Sync>,
    store: Arc<Store>,
}

impl ReportRenderer {
    pub fn new(backend: Arc<dyn RenderBackend + Send + Sync>, store: Arc<Store>) -> Self {
        Self { backend, store }
    }

    pub fn render(&self, record: &ProcessedRecord) -> Result<RenderOutcome> {
        let context = template_context(record);
        let bytes = self.backend.render(&context)?;
        let artifact_id = self.store.put_report_bytes(&bytes)?;
        Ok(RenderOutcome {
            filename: report_filename(record),
            artifact_id,
            bytes,
        })
    }
}

fn report_filename(record: &ProcessedRecord) -> String {
    let company = &record
        .submission
        .assessment_data
        .business_goals_and_financials
        .company_name;
    let safe: String = company
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("assessment_report_{}_{}.html", safe.trim_matches('_'), record.record_id)
}

/// Build the template context. Everything the template shows is formatted
/// here; the template itself only loops and prints.
pub fn template_context(record: &ProcessedRecord) -> Value {
    let submission = &record.submission;
    let goals = &submission.assessment_data.business_goals_and_financials;
    let derived = &record.derived;
    let fin = &derived.financial;

    let business = rating_groups(
        submission
            .assessment_data
            .business_performance_and_transferability
            .entries()
            .iter()
            .map(|&(name, score)| (questions::business_question(name), score)),
    );
    let personal = rating_groups(
        submission
            .assessment_data
            .personal_readiness_for_business_owners
            .entries()
            .iter()
            .map(|&(name, score)| (questions::personal_question(name), score)),
    );

    json!({
        "record_id": record.record_id,
        "generated_at": record.created_at,
        "owner_name": format!("{} {}", submission.first_name, submission.last_name),
        "email": submission.email,
        "phone_number": submission.phone_number,
        "company_name": goals.company_name,
        "industry": super::wire_str(&goals.company_industry),
        "employees": format!("{}", goals.number_of_employees),
        "exit_timeline": super::wire_str(&goals.planned_exit_timeline),
        "would_accept_offer": super::wire_str(&goals.would_accept_offer),
        "business_readiness": super::wire_str(&goals.business_readiness),
        "transferability_percent": format_percent(derived.transferability.percent),
        "personal_readiness_percent": format_percent(derived.personal_readiness.percent),
        "overall_readiness_score": format_percent(derived.overall_readiness_score),
        "financial_rows": [
            row("Last Year Revenue", format_currency(goals.last_year_revenue)),
            row("Last Year Profit", format_currency(goals.last_year_profit)),
            row("Current Year Revenue (Est.)", format_currency(goals.current_year_estimated_revenue)),
            row("Current Year Profit (Est.)", format_currency(goals.current_year_estimated_profit)),
            row("Current Business Value (Self-Reported)", format_currency(goals.current_business_value)),
            row("Target Sale Price", format_currency(goals.target_sale_price)),
            row("Valuation Gap", format_currency(fin.valuation_gap)),
            row("Revenue per Employee", opt_currency(fin.revenue_per_employee)),
            row("Last Year Profit Margin", opt_ratio_percent(fin.last_year_profit_margin)),
            row("Current Year Profit Margin (Est.)", opt_ratio_percent(fin.current_year_profit_margin)),
            row("Two-Year Average Revenue", format_currency(fin.two_year_average_revenue)),
            row("Two-Year Average Profit", format_currency(fin.two_year_average_profit)),
        ],
        "valuation_rows": [
            row("EBITDA Multiple", format!("{:.1}x", fin.ebitda_multiple)),
            row("EBITDA Margin", format_percent(fin.ebitda_margin)),
            row("Conservative Value (Low)", format_currency(fin.range_of_value_low)),
            row("Current Value (Based on Data)", format_currency(fin.estimated_current_value)),
            row("Optimistic Value (High)", format_currency(fin.range_of_value_high)),
            row("Value Opportunity", format_currency(fin.exit_value_opportunity)),
        ],
        "business_focus": business.0,
        "business_strong": business.1,
        "personal_focus": personal.0,
        "personal_strong": personal.1,
    })
}

fn row(label: &str, value: String) -> Value {
    json!({ "label": label, "value": value })
}

/// Split ratings into needs-improvement (<= 3, ascending) and
/// performing-well (>= 4, descending).
fn rating_groups(entries: impl Iterator<Item = (&'static str, u8)>) -> (Vec<Value>, Vec<Value>) {
    let mut focus: Vec<(&'static str, u8)> = Vec::new();
    let mut strong: Vec<(&'static str, u8)> = Vec::new();
    for (question, score) in entries {
        if score <= 3 {
            focus.push((question, score));
        } else {
            strong.push((question, score));
        }
    }
    focus.sort_by_key(|(_, s)| *s);
    strong.sort_by_key(|(_, s)| std::cmp::Reverse(*s));

    let to_json = |items: Vec<(&'static str, u8)>| {
        items
            .into_iter()
            .map(|(question, score)| json!({ "question": question, "score": score }))
            .collect()
    };
    (to_json(focus), to_json(strong))
}

fn format_percent(v: f64) -> String {
    format!("{v:.1}%")
}

fn opt_ratio_percent(v: Option<f64>) -> String {
    match v {
        Some(v) => format_percent(v * 100.0),
        None => "N/A".to_string(),
    }
}

fn opt_currency(v: Option<f64>) -> String {
    match v {
        Some(v) => format_currency(v),
        None => "N/A".to_string(),
    }
}

fn format_currency(v: f64) -> String {
    let negative = v < 0.0;
    let cents = format!("{:.2}", v.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${grouped}.{frac}")
    } else {
        format!("${grouped}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::scoring::{score, ReadinessWeights};
    use assess_store::StoreConfig;
    use tempfile::TempDir;

    fn record() -> ProcessedRecord {
        let submission = assess_core::fixtures::sample_submission_typed();
        let derived = score(&submission, &ReadinessWeights::default());
        ProcessedRecord::new("rec-1", "2025-06-01T12:00:00Z", submission, derived)
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234567.5), "$1,234,567.50");
        assert_eq!(format_currency(-400000.0), "-$400,000.00");
    }

    #[test]
    fn render_is_deterministic_and_mentions_company() {
        let td = TempDir::new().unwrap();
        let store = Arc::new(Store::open(StoreConfig::ephemeral(td.path()).unwrap()).unwrap());
        let backend = Arc::new(HtmlReportRenderer::new().unwrap());
        let stage = ReportRenderer::new(backend, store);

        let a = stage.render(&record()).unwrap();
        let b = stage.render(&record()).unwrap();
        assert_eq!(a.artifact_id, b.artifact_id);

        let html = String::from_utf8(a.bytes).unwrap();
        assert!(html.contains("Analytical Engines Ltd"));
        assert!(html.contains("Ada Lovelace"));
    }

    #[test]
    fn filename_sanitizes_company_name() {
        let mut raw = assess_core::fixtures::sample_submission();
        raw["assessment_data"]["business_goals_and_financials"]["company_name"] =
            serde_json::json!("A/B: Test & Sons");
        let submission: assess_core::model::Submission = serde_json::from_value(raw).unwrap();
        let derived = score(&submission, &ReadinessWeights::default());
        let record = ProcessedRecord::new("rec-2", "2025-06-01T12:00:00Z", submission, derived);

        let name = report_filename(&record);
        assert_eq!(name, "assessment_report_AB_Test__Sons_rec-2.html");
    }

    #[test]
    fn context_groups_ratings_by_score() {
        let mut raw = assess_core::fixtures::sample_submission();
        raw["assessment_data"]["personal_readiness_for_business_owners"]["estate_plan"] =
            serde_json::json!(2);
        let submission: assess_core::model::Submission = serde_json::from_value(raw).unwrap();
        let derived = score(&submission, &ReadinessWeights::default());
        let record = ProcessedRecord::new("rec-3", "2025-06-01T12:00:00Z", submission, derived);

        let ctx = template_context(&record);
        assert_eq!(ctx["personal_focus"].as_array().unwrap().len(), 1);
        assert_eq!(ctx["personal_strong"].as_array().unwrap().len(), 9);
        assert_eq!(ctx["personal_focus"][0]["score"], 2);
    }
}
