//! Canned submissions for tests. Enabled in-crate for unit tests and for
//! downstream crates via the `fixtures` feature.

use serde_json::{json, Value};

use crate::model::Submission;

/// A fully valid submission document.
pub fn sample_submission() -> Value {
    let mut performance = serde_json::Map::new();
    for name in crate::schema::PERFORMANCE_FIELDS {
        performance.insert((*name).to_string(), json!(4));
    }
    let mut personal = serde_json::Map::new();
    for name in crate::schema::PERSONAL_FIELDS {
        personal.insert((*name).to_string(), json!(5));
    }

    json!({
        "metadata": {
            "date_sent": "2025-06-01T12:00:00Z",
            "source": "web",
            "version": "1.0"
        },
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "phone_number": "+15551234567",
        "assessment_data": {
            "business_goals_and_financials": {
                "company_name": "Analytical Engines Ltd",
                "company_industry": "Manufacturing",
                "number_of_employees": 12.0,
                "current_business_value": 800000.0,
                "target_sale_price": 1200000.0,
                "last_year_revenue": 100000.0,
                "last_year_profit": 20000.0,
                "current_year_estimated_revenue": 120000.0,
                "current_year_estimated_profit": 30000.0,
                "planned_exit_timeline": "1-2 years",
                "would_accept_offer": "yes",
                "business_readiness": "business would struggle some but remain functioning"
            },
            "business_performance_and_transferability": performance,
            "personal_readiness_for_business_owners": personal
        }
    })
}

/// The sample submission, deserialized into the typed model.
pub fn sample_submission_typed() -> Submission {
    serde_json::from_value(sample_submission()).expect("sample submission is valid")
}
