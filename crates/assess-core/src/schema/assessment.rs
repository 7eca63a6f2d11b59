//! The assessment submission schema, expressed as a constraint tree.
//!
//! Field lists and enumerations here are the single source of truth for the
//! submission shape; the walker in the parent module interprets them.

use regex::Regex;
use serde_json::Value;

use crate::errors::{CoreError, CoreResult};

use super::{Constraint, Field};

/// Optional leading `+`, then 2-15 digits with no leading zero.
const PHONE_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";

const INDUSTRIES: &[&str] = &[
    "Retail",
    "Restaurants",
    "Construction",
    "Manufacturing",
    "Professional Services",
    "Healthcare (Non-Medical)",
    "E-commerce",
    "Wholesale/Distribution",
    "Auto Repair",
    "Beauty/Personal Care",
    "IT Services",
    "Other",
];

const EXIT_TIMELINES: &[&str] = &["0-1 year", "1-2 years", "3-5 years", "5+ years"];

const ACCEPT_OFFER: &[&str] = &["yes", "no"];

const BUSINESS_READINESS: &[&str] = &[
    "business would fall apart without me",
    "business would struggle some but remain functioning",
    "business would run well/independently with strong management",
];

/// Business performance & transferability rating fields, in schema order.
pub const PERFORMANCE_FIELDS: &[&str] = &[
    "financial_statements",
    "profitability",
    "customer_base",
    "sales_growth",
    "brand_value",
    "marketing",
    "market_position",
    "customer_relationships",
    "growth_strategy",
    "revenue_streams",
    "management_capability",
    "leadership_roles",
    "succession_planning",
    "employee_turnover",
    "business_processes",
    "it_systems",
    "operations_continuity",
    "technology_systems",
    "proprietary_tech",
    "operational_processes",
    "scalability",
    "supplier_contracts",
    "operating_expenses",
    "risk_management",
    "business_resilience",
    "legal_contracts",
];

/// Personal readiness rating fields, in schema order.
pub const PERSONAL_FIELDS: &[&str] = &[
    "personal_identity",
    "financial_plan",
    "physical_health",
    "energy_level",
    "estate_plan",
    "legal_protections",
    "future_vision",
    "family_communication",
    "professional_advisors",
    "process_confidence",
];

/// Build the full submission schema.
pub fn assessment_schema() -> CoreResult<Constraint> {
    let phone = Regex::new(PHONE_PATTERN)
        .map_err(|e| CoreError::schema(format!("phone pattern: {e}")))?;

    Ok(Constraint::Object(vec![
        Field::required(
            "metadata",
            Constraint::Object(vec![
                Field::required("date_sent", Constraint::Timestamp),
                Field::optional("source", Constraint::Str { min_len: 1, max_len: 100 }),
                Field::optional("version", Constraint::Str { min_len: 1, max_len: 20 }),
            ]),
        ),
        Field::required("first_name", Constraint::Str { min_len: 1, max_len: 35 }),
        Field::required("last_name", Constraint::Str { min_len: 1, max_len: 35 }),
        Field::required("email", Constraint::Str { min_len: 1, max_len: 100 }),
        Field::required(
            "phone_number",
            Constraint::Pattern {
                regex: phone,
                describe: "an optional leading + followed by 2-15 digits with no leading zero",
            },
        ),
        Field::required(
            "assessment_data",
            Constraint::Object(vec![
                Field::required("business_goals_and_financials", business_goals_shape()),
                Field::required(
                    "business_performance_and_transferability",
                    ratings_shape(PERFORMANCE_FIELDS),
                ),
                Field::required(
                    "personal_readiness_for_business_owners",
                    ratings_shape(PERSONAL_FIELDS),
                ),
            ]),
        ),
    ]))
}

fn business_goals_shape() -> Constraint {
    Constraint::Object(vec![
        Field::required("company_name", Constraint::Str { min_len: 1, max_len: 200 }),
        Field::required("company_industry", Constraint::OneOf { allowed: INDUSTRIES }),
        Field::required("number_of_employees", Constraint::Number { min: Some(0.0) }),
        Field::required("current_business_value", Constraint::Number { min: Some(0.0) }),
        Field::required("target_sale_price", Constraint::Number { min: Some(0.0) }),
        Field::required("last_year_revenue", Constraint::Number { min: Some(0.0) }),
        Field::required("last_year_profit", Constraint::Number { min: Some(0.0) }),
        Field::required(
            "current_year_estimated_revenue",
            Constraint::Number { min: Some(0.0) },
        ),
        Field::required(
            "current_year_estimated_profit",
            Constraint::Number { min: Some(0.0) },
        ),
        Field::required(
            "planned_exit_timeline",
            Constraint::OneOf { allowed: EXIT_TIMELINES },
        ),
        Field::required("would_accept_offer", Constraint::OneOf { allowed: ACCEPT_OFFER }),
        Field::required(
            "business_readiness",
            Constraint::OneOf { allowed: BUSINESS_READINESS },
        ),
    ])
}

fn ratings_shape(names: &'static [&'static str]) -> Constraint {
    Constraint::Object(
        names
            .iter()
            .map(|name| Field::required(name, Constraint::Integer { min: 1, max: 6 }))
            .collect(),
    )
}

/// Fill envelope defaults before validation, the way the original intake
/// does: a missing `metadata` object is created, a missing `date_sent` gets
/// the caller-supplied timestamp, and `source`/`version` fall back to
/// "web"/"1.0". Non-object input is left untouched for the validator to
/// reject.
pub fn apply_defaults(raw: &mut Value, now_iso: &str) {
    let Some(root) = raw.as_object_mut() else {
        return;
    };

    let metadata = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(metadata) = metadata.as_object_mut() else {
        return;
    };

    metadata
        .entry("date_sent")
        .or_insert_with(|| Value::String(now_iso.to_string()));
    metadata
        .entry("source")
        .or_insert_with(|| Value::String("web".to_string()));
    metadata
        .entry("version")
        .or_insert_with(|| Value::String("1.0".to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_metadata() {
        let mut raw = serde_json::json!({"first_name": "Ada"});
        apply_defaults(&mut raw, "2025-06-01T12:00:00Z");
        assert_eq!(raw["metadata"]["date_sent"], "2025-06-01T12:00:00Z");
        assert_eq!(raw["metadata"]["source"], "web");
        assert_eq!(raw["metadata"]["version"], "1.0");
    }

    #[test]
    fn defaults_never_overwrite() {
        let mut raw = serde_json::json!({
            "metadata": {"date_sent": "2024-01-01T00:00:00Z", "source": "crm"}
        });
        apply_defaults(&mut raw, "2025-06-01T12:00:00Z");
        assert_eq!(raw["metadata"]["date_sent"], "2024-01-01T00:00:00Z");
        assert_eq!(raw["metadata"]["source"], "crm");
        assert_eq!(raw["metadata"]["version"], "1.0");
    }

    #[test]
    fn schema_builds() {
        assessment_schema().unwrap();
    }
}
