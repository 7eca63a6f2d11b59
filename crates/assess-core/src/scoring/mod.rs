//! Scoring engine: derives numeric summaries from a validated submission.
//!
//! Pure and deterministic; no I/O, no clocks. Total on validated input:
//! a zero denominator yields an undefined metric, never a fault, so every
//! defined output is finite.

mod industry;

pub use industry::{benchmark, IndustryBenchmark};

use serde::{Deserialize, Serialize};

use crate::model::{Derived, FinancialMetrics, SectionScore, Submission};

/// Weights combining the two rating sections into the overall readiness
/// score. Injected from configuration; never hard-coded at call sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub business: f64,
    pub personal: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self { business: 0.6, personal: 0.4 }
    }
}

impl ReadinessWeights {
    /// Weights scaled to sum to 1. Non-positive totals fall back to the
    /// default split so the engine stays total.
    pub fn normalized(&self) -> (f64, f64) {
        let sum = self.business + self.personal;
        if sum > 0.0 && sum.is_finite() {
            (self.business / sum, self.personal / sum)
        } else {
            let d = Self::default();
            (d.business, d.personal)
        }
    }
}

/// Derive all scored metrics for one submission.
pub fn score(submission: &Submission, weights: &ReadinessWeights) -> Derived {
    let performance = &submission
        .assessment_data
        .business_performance_and_transferability;
    let personal = &submission.assessment_data.personal_readiness_for_business_owners;

    let transferability = section_score(performance.entries().iter().map(|(_, v)| *v));
    let personal_readiness = section_score(personal.entries().iter().map(|(_, v)| *v));

    let (wb, wp) = weights.normalized();
    let overall_readiness_score = transferability.percent * wb + personal_readiness.percent * wp;

    Derived {
        transferability,
        personal_readiness,
        overall_readiness_score,
        financial: financial_metrics(submission),
    }
}

fn section_score(ratings: impl Iterator<Item = u8>) -> SectionScore {
    let mut sum = 0u32;
    let mut count = 0u32;
    for r in ratings {
        sum += u32::from(r);
        count += 1;
    }
    // Sections are fixed and non-empty; validated ratings sit in 1..=6.
    let mean = if count > 0 { f64::from(sum) / f64::from(count) } else { 1.0 };
    SectionScore {
        mean,
        percent: (mean - 1.0) / 5.0 * 100.0,
    }
}

fn financial_metrics(submission: &Submission) -> FinancialMetrics {
    let goals = &submission.assessment_data.business_goals_and_financials;
    let bench = benchmark(goals.company_industry);

    let last_year_profit_margin = ratio(goals.last_year_profit, goals.last_year_revenue);
    let current_year_profit_margin = ratio(
        goals.current_year_estimated_profit,
        goals.current_year_estimated_revenue,
    );

    let two_year_average_revenue =
        (goals.current_year_estimated_revenue + goals.last_year_revenue) / 2.0;
    let two_year_average_profit =
        (goals.current_year_estimated_profit + goals.last_year_profit) / 2.0;

    let range_of_value_low = two_year_average_profit * 3.0;
    let estimated_current_value = two_year_average_profit * bench.margin / 100.0;
    let range_of_value_high = two_year_average_profit * bench.multiple * 1.4;

    let profit_gap_surplus = last_year_profit_margin.map(|margin| {
        goals.current_year_estimated_revenue * margin
            - goals.current_year_estimated_revenue * bench.margin / 100.0
    });

    FinancialMetrics {
        ebitda_multiple: bench.multiple,
        ebitda_margin: bench.margin,
        revenue_per_employee: ratio(goals.last_year_revenue, goals.number_of_employees),
        last_year_profit_margin,
        current_year_profit_margin,
        valuation_gap: goals.target_sale_price - goals.current_business_value,
        revenue_growth_ratio: ratio(
            goals.current_year_estimated_revenue,
            goals.last_year_revenue,
        ),
        profit_growth_ratio: ratio(goals.current_year_estimated_profit, goals.last_year_profit),
        two_year_average_revenue,
        two_year_average_profit,
        range_of_value_low,
        estimated_current_value,
        range_of_value_high,
        profit_gap_surplus,
        exit_value_opportunity: range_of_value_high - estimated_current_value,
    }
}

/// `num / den`, undefined when the denominator is not strictly positive.
fn ratio(num: f64, den: f64) -> Option<f64> {
    if den > 0.0 {
        Some(num / den)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_submission_typed;
    use crate::model::Submission;

    fn with_ratings(value: u8) -> Submission {
        let mut raw = crate::fixtures::sample_submission();
        for (section, fields) in [
            (
                "business_performance_and_transferability",
                crate::schema::PERFORMANCE_FIELDS,
            ),
            (
                "personal_readiness_for_business_owners",
                crate::schema::PERSONAL_FIELDS,
            ),
        ] {
            for name in fields {
                raw["assessment_data"][section][*name] = serde_json::json!(value);
            }
        }
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn scoring_is_deterministic() {
        let s = sample_submission_typed();
        let w = ReadinessWeights::default();
        let a = serde_json::to_value(score(&s, &w)).unwrap();
        let b = serde_json::to_value(score(&s, &w)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn all_sixes_score_one_hundred_percent() {
        let d = score(&with_ratings(6), &ReadinessWeights::default());
        assert_eq!(d.transferability.percent, 100.0);
        assert_eq!(d.personal_readiness.percent, 100.0);
        assert_eq!(d.overall_readiness_score, 100.0);
    }

    #[test]
    fn all_ones_score_zero_percent() {
        let d = score(&with_ratings(1), &ReadinessWeights::default());
        assert_eq!(d.transferability.percent, 0.0);
        assert_eq!(d.personal_readiness.percent, 0.0);
        assert_eq!(d.overall_readiness_score, 0.0);
    }

    #[test]
    fn sample_profit_margin_is_point_two() {
        let d = score(&sample_submission_typed(), &ReadinessWeights::default());
        assert_eq!(d.financial.last_year_profit_margin, Some(0.2));
    }

    #[test]
    fn zero_revenue_leaves_margin_undefined() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["business_goals_and_financials"]["last_year_revenue"] =
            serde_json::json!(0.0);
        let s: Submission = serde_json::from_value(raw).unwrap();
        let d = score(&s, &ReadinessWeights::default());
        assert_eq!(d.financial.last_year_profit_margin, None);
        assert_eq!(d.financial.revenue_growth_ratio, None);
        assert_eq!(d.financial.profit_gap_surplus, None);
    }

    #[test]
    fn zero_employees_leaves_revenue_per_employee_undefined() {
        let mut raw = crate::fixtures::sample_submission();
        raw["assessment_data"]["business_goals_and_financials"]["number_of_employees"] =
            serde_json::json!(0.0);
        let s: Submission = serde_json::from_value(raw).unwrap();
        let d = score(&s, &ReadinessWeights::default());
        assert_eq!(d.financial.revenue_per_employee, None);
    }

    #[test]
    fn weights_shift_overall_score() {
        let mut raw = crate::fixtures::sample_submission();
        for name in crate::schema::PERSONAL_FIELDS {
            raw["assessment_data"]["personal_readiness_for_business_owners"][*name] =
                serde_json::json!(6);
        }
        let s: Submission = serde_json::from_value(raw).unwrap();

        let business_heavy = score(&s, &ReadinessWeights { business: 1.0, personal: 0.0 });
        let personal_heavy = score(&s, &ReadinessWeights { business: 0.0, personal: 1.0 });
        assert!(personal_heavy.overall_readiness_score > business_heavy.overall_readiness_score);
        assert_eq!(personal_heavy.overall_readiness_score, 100.0);
    }

    #[test]
    fn valuation_gap_is_target_minus_current() {
        let d = score(&sample_submission_typed(), &ReadinessWeights::default());
        assert_eq!(d.financial.valuation_gap, 400000.0);
    }

    #[test]
    fn derived_outputs_are_finite() {
        let d = score(&with_ratings(3), &ReadinessWeights::default());
        let v = serde_json::to_value(&d).unwrap();
        fn assert_finite(v: &serde_json::Value) {
            match v {
                serde_json::Value::Number(n) => {
                    assert!(n.as_f64().map(f64::is_finite).unwrap_or(true));
                }
                serde_json::Value::Object(m) => m.values().for_each(assert_finite),
                serde_json::Value::Array(a) => a.iter().for_each(assert_finite),
                _ => {}
            }
        }
        assert_finite(&v);
    }
}
