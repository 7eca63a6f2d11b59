//! Question text for the rating fields, keyed by wire field name.
//! Shown in the rendered report next to each score.

pub fn business_question(field: &str) -> &str {
    match field {
        "financial_statements" => {
            "How audited, current, & due diligence-ready are your financial statements?"
        }
        "profitability" => "How clear & consistent are your profitability & cash flow trends?",
        "customer_base" => "How diversified is your customer base to reduce revenue risk?",
        "sales_growth" => "How consistent is your sales growth over the past three years?",
        "brand_value" => "How clear & customer-recognized is your brand's unique value proposition?",
        "marketing" => "How effective & measurable are your documented marketing campaigns?",
        "market_position" => "How strong is your market position compared to competitors?",
        "customer_relationships" => {
            "How documented are customer relationships for annual revenue retention?"
        }
        "growth_strategy" => "How clear is your documented growth strategy for new markets/segments?",
        "revenue_streams" => "How well-identified are potential new revenue streams?",
        "management_capability" => {
            "How capable is your management team of running the business independently?"
        }
        "leadership_roles" => "How clearly documented are leadership roles & responsibilities?",
        "succession_planning" => "How robust is your succession plan for key leadership positions?",
        "employee_turnover" => "How low is employee turnover & high are morale & competency?",
        "business_processes" => "How well-documented & automated are core business processes?",
        "it_systems" => "How secure, scalable, & licensed are your IT systems?",
        "operations_continuity" => {
            "How seamlessly can operations continue during an ownership transition?"
        }
        "technology_systems" => "How current, secure, & licensed are your technology systems?",
        "proprietary_tech" => {
            "How valuable are proprietary tech or innovations to your competitive advantage?"
        }
        "operational_processes" => {
            "How optimized are key operational processes for cost-effectiveness?"
        }
        "scalability" => "How scalable are operations to handle increased demand?",
        "supplier_contracts" => {
            "How favorable, documented, & transferable are supplier contracts?"
        }
        "operating_expenses" => "How optimized are your operating expenses for profitability?",
        "risk_management" => "How comprehensive is your documented risk management plan?",
        "business_resilience" => "How resilient is your business to market or industry volatility?",
        "legal_contracts" => "How current & documented are all legal contracts? No Legal Issues?",
        _ => field,
    }
}

pub fn personal_question(field: &str) -> &str {
    match field {
        "personal_identity" => "How clear is your personal identity beyond being a business owner?",
        "financial_plan" => "How secure is your personal financial plan post-sale?",
        "physical_health" => "How strong is your physical health heading into next phase of life?",
        "energy_level" => "How is your level of energy for the sale process?",
        "estate_plan" => "How current is your personal estate plan for post-sale?",
        "legal_protections" => "How clear are your legal protections for sale proceeds?",
        "future_vision" => "How clear is your vision for life after the sale?",
        "family_communication" => "How open are you with family about the sale's impact?",
        "professional_advisors" => "How well do you leverage professional advisors?",
        "process_confidence" => {
            "How confident are you in navigating the process with potential buyers?"
        }
        _ => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rating_field_has_question_text() {
        for field in assess_core::schema::PERFORMANCE_FIELDS {
            assert_ne!(business_question(field), *field, "missing text for {field}");
        }
        for field in assess_core::schema::PERSONAL_FIELDS {
            assert_ne!(personal_question(field), *field, "missing text for {field}");
        }
    }
}
