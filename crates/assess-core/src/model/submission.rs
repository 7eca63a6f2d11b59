//! Typed representation of a validated assessment submission.
//!
//! This is a wire model: field names and enum spellings match the inbound
//! JSON document exactly. Instances are only constructed by deserializing
//! input that already passed `crate::schema::validate`, and are immutable
//! from then on.

use serde::{Deserialize, Serialize};

/// A complete, validated assessment submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub metadata: SubmissionMetadata,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub assessment_data: AssessmentData,
}

/// Submission envelope metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    /// ISO-8601 timestamp of when the assessment was submitted.
    pub date_sent: String,
    #[serde(default = "SubmissionMetadata::default_source")]
    pub source: String,
    #[serde(default = "SubmissionMetadata::default_version")]
    pub version: String,
}

impl SubmissionMetadata {
    fn default_source() -> String {
        "web".to_string()
    }

    fn default_version() -> String {
        "1.0".to_string()
    }
}

/// The three fixed assessment sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentData {
    pub business_goals_and_financials: BusinessGoals,
    pub business_performance_and_transferability: PerformanceRatings,
    pub personal_readiness_for_business_owners: PersonalRatings,
}

/// Categorical and numeric facts about the business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessGoals {
    pub company_name: String,
    pub company_industry: Industry,
    pub number_of_employees: f64,
    pub current_business_value: f64,
    pub target_sale_price: f64,
    pub last_year_revenue: f64,
    pub last_year_profit: f64,
    pub current_year_estimated_revenue: f64,
    pub current_year_estimated_profit: f64,
    pub planned_exit_timeline: ExitTimeline,
    pub would_accept_offer: WouldAcceptOffer,
    pub business_readiness: BusinessReadiness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Retail,
    Restaurants,
    Construction,
    Manufacturing,
    #[serde(rename = "Professional Services")]
    ProfessionalServices,
    #[serde(rename = "Healthcare (Non-Medical)")]
    HealthcareNonMedical,
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[serde(rename = "Wholesale/Distribution")]
    WholesaleDistribution,
    #[serde(rename = "Auto Repair")]
    AutoRepair,
    #[serde(rename = "Beauty/Personal Care")]
    BeautyPersonalCare,
    #[serde(rename = "IT Services")]
    ItServices,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitTimeline {
    #[serde(rename = "0-1 year")]
    ZeroToOneYear,
    #[serde(rename = "1-2 years")]
    OneToTwoYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "5+ years")]
    FivePlusYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WouldAcceptOffer {
    #[serde(rename = "yes")]
    Yes,
    #[serde(rename = "no")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessReadiness {
    #[serde(rename = "business would fall apart without me")]
    WouldFallApart,
    #[serde(rename = "business would struggle some but remain functioning")]
    WouldStruggle,
    #[serde(rename = "business would run well/independently with strong management")]
    WouldRunWell,
}

/// Business performance and transferability ratings, each on a 1-6 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRatings {
    pub financial_statements: u8,
    pub profitability: u8,
    pub customer_base: u8,
    pub sales_growth: u8,
    pub brand_value: u8,
    pub marketing: u8,
    pub market_position: u8,
    pub customer_relationships: u8,
    pub growth_strategy: u8,
    pub revenue_streams: u8,
    pub management_capability: u8,
    pub leadership_roles: u8,
    pub succession_planning: u8,
    pub employee_turnover: u8,
    pub business_processes: u8,
    pub it_systems: u8,
    pub operations_continuity: u8,
    pub technology_systems: u8,
    pub proprietary_tech: u8,
    pub operational_processes: u8,
    pub scalability: u8,
    pub supplier_contracts: u8,
    pub operating_expenses: u8,
    pub risk_management: u8,
    pub business_resilience: u8,
    pub legal_contracts: u8,
}

impl PerformanceRatings {
    /// Ratings in declared field order, paired with their wire names.
    pub fn entries(&self) -> [(&'static str, u8); 26] {
        [
            ("financial_statements", self.financial_statements),
            ("profitability", self.profitability),
            ("customer_base", self.customer_base),
            ("sales_growth", self.sales_growth),
            ("brand_value", self.brand_value),
            ("marketing", self.marketing),
            ("market_position", self.market_position),
            ("customer_relationships", self.customer_relationships),
            ("growth_strategy", self.growth_strategy),
            ("revenue_streams", self.revenue_streams),
            ("management_capability", self.management_capability),
            ("leadership_roles", self.leadership_roles),
            ("succession_planning", self.succession_planning),
            ("employee_turnover", self.employee_turnover),
            ("business_processes", self.business_processes),
            ("it_systems", self.it_systems),
            ("operations_continuity", self.operations_continuity),
            ("technology_systems", self.technology_systems),
            ("proprietary_tech", self.proprietary_tech),
            ("operational_processes", self.operational_processes),
            ("scalability", self.scalability),
            ("supplier_contracts", self.supplier_contracts),
            ("operating_expenses", self.operating_expenses),
            ("risk_management", self.risk_management),
            ("business_resilience", self.business_resilience),
            ("legal_contracts", self.legal_contracts),
        ]
    }
}

/// Personal readiness ratings for the business owner, each on a 1-6 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRatings {
    pub personal_identity: u8,
    pub financial_plan: u8,
    pub physical_health: u8,
    pub energy_level: u8,
    pub estate_plan: u8,
    pub legal_protections: u8,
    pub future_vision: u8,
    pub family_communication: u8,
    pub professional_advisors: u8,
    pub process_confidence: u8,
}

impl PersonalRatings {
    /// Ratings in declared field order, paired with their wire names.
    pub fn entries(&self) -> [(&'static str, u8); 10] {
        [
            ("personal_identity", self.personal_identity),
            ("financial_plan", self.financial_plan),
            ("physical_health", self.physical_health),
            ("energy_level", self.energy_level),
            ("estate_plan", self.estate_plan),
            ("legal_protections", self.legal_protections),
            ("future_vision", self.future_vision),
            ("family_communication", self.family_communication),
            ("professional_advisors", self.professional_advisors),
            ("process_confidence", self.process_confidence),
        ]
    }
}
