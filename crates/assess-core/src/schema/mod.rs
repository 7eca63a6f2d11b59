//! Declarative schema validation for inbound submissions.
//!
//! Validation rules are data, not code: a `Constraint` tree describes the
//! required shape (required fields, types, enumerations, numeric ranges,
//! string patterns) and a generic walker checks a raw `serde_json::Value`
//! against it. New sections are added by extending the tree in
//! `assessment.rs`, not by writing per-field conditionals.
//!
//! The walker is deterministic and total: it visits fields in declaration
//! order, collects every violation, and never partially validates.

mod assessment;

pub use assessment::{apply_defaults, assessment_schema, PERFORMANCE_FIELDS, PERSONAL_FIELDS};

use std::fmt::{self, Display};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CoreError, CoreResult};

/// One failed constraint, addressed by a dotted field path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

/// A rejected submission: every failing field path with its reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.path, v.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A node in the declarative constraint tree.
#[derive(Debug)]
pub enum Constraint {
    /// JSON object with a fixed field set. Unknown keys are rejected.
    Object(Vec<Field>),

    /// String with character-count bounds.
    Str { min_len: usize, max_len: usize },

    /// String matching a compiled pattern.
    Pattern { regex: Regex, describe: &'static str },

    /// ISO-8601 timestamp string.
    Timestamp,

    /// String restricted to a fixed enumeration.
    OneOf { allowed: &'static [&'static str] },

    /// Finite number with an optional lower bound.
    Number { min: Option<f64> },

    /// Integer within a closed range.
    Integer { min: i64, max: i64 },
}

/// A named member of an object shape.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub constraint: Constraint,
}

impl Field {
    pub fn required(name: &'static str, constraint: Constraint) -> Self {
        Self { name, required: true, constraint }
    }

    pub fn optional(name: &'static str, constraint: Constraint) -> Self {
        Self { name, required: false, constraint }
    }
}

/// Validate a raw submission document against the assessment schema.
///
/// Returns `CoreError::Validation` carrying every violation, or
/// `CoreError::Schema` if the schema itself cannot be built.
pub fn validate(raw: &Value) -> CoreResult<()> {
    let schema = assessment_schema()?;
    let mut violations = Vec::new();
    check(&schema, raw, "$", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::validation(ValidationError { violations }))
    }
}

fn join(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

fn check(constraint: &Constraint, value: &Value, path: &str, out: &mut Vec<Violation>) {
    match constraint {
        Constraint::Object(fields) => check_object(fields, value, path, out),
        Constraint::Str { min_len, max_len } => {
            let Some(s) = value.as_str() else {
                return push(out, path, "expected a string");
            };
            let len = s.chars().count();
            if len < *min_len || len > *max_len {
                push(
                    out,
                    path,
                    format!("string length must be {min_len}..={max_len} characters, got {len}"),
                );
            }
        }
        Constraint::Pattern { regex, describe } => {
            let Some(s) = value.as_str() else {
                return push(out, path, "expected a string");
            };
            if !regex.is_match(s) {
                push(out, path, format!("must be {describe}"));
            }
        }
        Constraint::Timestamp => {
            let Some(s) = value.as_str() else {
                return push(out, path, "expected a string");
            };
            if !is_valid_timestamp(s) {
                push(out, path, "must be an ISO-8601 timestamp");
            }
        }
        Constraint::OneOf { allowed } => {
            let Some(s) = value.as_str() else {
                return push(out, path, "expected a string");
            };
            if !allowed.contains(&s) {
                push(out, path, format!("must be one of: {}", allowed.join(", ")));
            }
        }
        Constraint::Number { min } => {
            let Some(n) = value.as_f64() else {
                return push(out, path, "expected a number");
            };
            if let Some(min) = min {
                if n < *min {
                    push(out, path, format!("must be >= {min}"));
                }
            }
        }
        Constraint::Integer { min, max } => {
            let Some(n) = value.as_i64() else {
                return push(out, path, "expected an integer");
            };
            if n < *min || n > *max {
                push(out, path, format!("must be an integer in {min}..={max}, got {n}"));
            }
        }
    }
}

fn check_object(fields: &[Field], value: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(map) = value.as_object() else {
        return push(out, path, "expected an object");
    };

    // Unknown keys first; serde_json object iteration is key-ordered, so the
    // violation order stays deterministic.
    for key in map.keys() {
        if !fields.iter().any(|f| f.name == key) {
            push(out, &join(path, key), "unknown field");
        }
    }

    for field in fields {
        match map.get(field.name) {
            None => {
                if field.required {
                    push(out, &join(path, field.name), "missing required field");
                }
            }
            Some(v) => check(&field.constraint, v, &join(path, field.name), out),
        }
    }
}

fn push(out: &mut Vec<Violation>, path: &str, reason: impl Into<String>) {
    out.push(Violation {
        path: path.to_string(),
        reason: reason.into(),
    });
}

fn is_valid_timestamp(s: &str) -> bool {
    use time::format_description::well_known::{Iso8601, Rfc3339};

    if time::OffsetDateTime::parse(s, &Rfc3339).is_ok() {
        return true;
    }
    // The upstream form stamps offset-less ISO-8601; accept it too.
    time::PrimitiveDateTime::parse(s, &Iso8601::DEFAULT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(err: CoreError) -> Vec<String> {
        err.as_validation()
            .expect("validation error")
            .violations
            .iter()
            .map(|v| v.path.clone())
            .collect()
    }

    #[test]
    fn missing_required_field_named() {
        let mut raw = crate::fixtures::sample_submission();
        raw.as_object_mut().unwrap().remove("email");
        let err = validate(&raw).unwrap_err();
        assert!(paths(err).contains(&"$.email".to_string()));
    }

    #[test]
    fn unknown_field_rejected_at_any_depth() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["personal_readiness_for_business_owners"]["extra"] = json!(3);
        let err = validate(&raw).unwrap_err();
        assert!(paths(err).contains(
            &"$.assessment_data.personal_readiness_for_business_owners.extra".to_string()
        ));
    }

    #[test]
    fn rating_bounds_are_closed_1_to_6() {
        for (value, ok) in [(0, false), (1, true), (6, true), (7, false)] {
            let mut raw = crate::fixtures::sample_submission();
            raw["assessment_data"]["personal_readiness_for_business_owners"]["estate_plan"] =
                json!(value);
            assert_eq!(validate(&raw).is_ok(), ok, "rating {value}");
        }
    }

    #[test]
    fn rating_must_be_integer_not_float() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["personal_readiness_for_business_owners"]["estate_plan"] =
            json!(3.5);
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn phone_pattern_enforced() {
        for (value, ok) in [
            ("+15551234567", true),
            ("15551234567", true),
            ("+05551234567", false),
            ("not-a-phone", false),
            ("+1", false),
        ] {
            let mut raw = crate::fixtures::sample_submission();
            raw["phone_number"] = json!(value);
            assert_eq!(validate(&raw).is_ok(), ok, "phone {value}");
        }
    }

    #[test]
    fn negative_financials_rejected() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["business_goals_and_financials"]["last_year_revenue"] =
            json!(-1.0);
        let err = validate(&raw).unwrap_err();
        assert!(paths(err).contains(
            &"$.assessment_data.business_goals_and_financials.last_year_revenue".to_string()
        ));
    }

    #[test]
    fn bad_industry_enum_rejected() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["business_goals_and_financials"]["company_industry"] =
            json!("Mining");
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_offsetless() {
        for (value, ok) in [
            ("2025-06-01T12:00:00Z", true),
            ("2025-06-01T12:00:00.123456", true),
            ("June 1st", false),
        ] {
            let mut raw = crate::fixtures::sample_submission();
            raw["metadata"]["date_sent"] = json!(value);
            assert_eq!(validate(&raw).is_ok(), ok, "timestamp {value}");
        }
    }

    #[test]
    fn all_violations_collected_deterministically() {
        let mut raw = crate::fixtures::sample_submission();
        raw.as_object_mut().unwrap().remove("first_name");
        raw["phone_number"] = json!("0");
        let a = paths(validate(&raw).unwrap_err());
        let b = paths(validate(&raw).unwrap_err());
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn valid_sample_passes() {
        let raw = crate::fixtures::sample_submission();
        validate(&raw).unwrap();
    }
}
