//! Industry EBITDA benchmarks used by the valuation metrics.

use crate::model::Industry;

/// EBITDA multiple and margin for one industry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndustryBenchmark {
    pub multiple: f64,
    pub margin: f64,
}

/// Benchmark figures per industry.
pub fn benchmark(industry: Industry) -> IndustryBenchmark {
    let (multiple, margin) = match industry {
        Industry::Retail => (4.1, 15.0),
        Industry::Restaurants => (3.6, 12.5),
        Industry::Construction => (4.3, 18.0),
        Industry::Manufacturing => (4.6, 19.2),
        Industry::ProfessionalServices => (4.5, 26.7),
        Industry::HealthcareNonMedical => (5.0, 22.2),
        Industry::Ecommerce => (4.8, 20.3),
        Industry::WholesaleDistribution => (4.2, 14.9),
        Industry::AutoRepair => (3.8, 17.7),
        Industry::BeautyPersonalCare => (3.7, 15.4),
        Industry::ItServices => (5.3, 25.6),
        Industry::Other => (4.1, 17.5),
    };
    IndustryBenchmark { multiple, margin }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_industry_has_positive_figures() {
        for industry in [
            Industry::Retail,
            Industry::Restaurants,
            Industry::Construction,
            Industry::Manufacturing,
            Industry::ProfessionalServices,
            Industry::HealthcareNonMedical,
            Industry::Ecommerce,
            Industry::WholesaleDistribution,
            Industry::AutoRepair,
            Industry::BeautyPersonalCare,
            Industry::ItServices,
            Industry::Other,
        ] {
            let b = benchmark(industry);
            assert!(b.multiple > 0.0 && b.margin > 0.0);
        }
    }
}
