//! Rule-based opportunity and ROI estimate for a free-text business description.
//!
//! The estimate is fully deterministic: the description is run through the
//! extractors, one of three fixed process templates is chosen, and every dollar
//! figure is a fixed share of a base cost derived from stated or defaulted
//! revenue. Only `generated_at` varies between calls.

use crate::extractor::{
    estimate_business_size, estimate_revenue_bracket, extract_implementation_cost,
    extract_industry, extract_revenue_amount,
};
use crate::formatting::format_currency;
use crate::models::{
    BusinessProfile, Industry, Level, OpportunityReport, ProcessEstimate, RecommendedSolution,
};
use chrono::Local;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static MARKETING_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)marketing|consultant").expect("hint regex is valid")
});

pub const PROFILE_NAME: &str = "Client Business";

const DEFAULT_PAIN_POINTS: [&str; 3] = [
    "Manual processes",
    "Time-intensive tasks",
    "Operational inefficiencies",
];

const DEFAULT_PROCESSES: [&str; 3] = [
    "Research tasks",
    "Report generation",
    "Communication management",
];

pub const IMPLEMENTATION_ROADMAP: [&str; 5] = [
    "Week 1-4: Discovery and requirements gathering",
    "Week 5-8: Solution design and architecture planning",
    "Week 9-16: Core system development and testing",
    "Week 17-20: Integration and system testing",
    "Week 21-24: Deployment and user training",
];

pub const NEXT_STEPS: [&str; 4] = [
    "Schedule discovery call to discuss specific requirements",
    "Develop proof of concept for highest-impact process",
    "Create detailed implementation plan and timeline",
    "Begin with pilot program to validate ROI projections",
];

/// One row of a process template. Cost share and savings rate apply to the base cost.
#[derive(Debug, Clone, Copy)]
pub struct ProcessSpec {
    pub name: &'static str,
    pub time_percentage: f64,
    pub complexity_score: u8,
    pub automation_potential: Level,
    pub implementation_difficulty: Level,
    pub cost_share: f64,
    pub savings_rate: f64,
}

/// How an investment range is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStyle {
    /// `$45.0M - $75.0M`
    Millions,
    /// `$25,000 - $40,000`
    Dollars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Banking,
    Marketing,
    Generic,
}

/// Fixed process mix and solution shape for one class of business.
#[derive(Debug)]
pub struct ProcessTemplate {
    pub kind: TemplateKind,
    /// Share of annual revenue taken as the base operating cost.
    pub revenue_share: f64,
    /// Base cost never falls below this.
    pub cost_floor: f64,
    pub processes: &'static [ProcessSpec],
    pub approach: &'static str,
    pub components: &'static [&'static str],
    pub timeline: &'static str,
    pub investment_low_share: f64,
    pub investment_high_share: f64,
    pub range_style: RangeStyle,
}

static BANKING: ProcessTemplate = ProcessTemplate {
    kind: TemplateKind::Banking,
    revenue_share: 0.15,
    cost_floor: 50_000_000.0,
    processes: &[
        ProcessSpec {
            name: "Regulatory Compliance & Reporting",
            time_percentage: 40.0,
            complexity_score: 5,
            automation_potential: Level::High,
            implementation_difficulty: Level::High,
            cost_share: 0.40,
            savings_rate: 0.6,
        },
        ProcessSpec {
            name: "Risk Management & Data Analysis",
            time_percentage: 25.0,
            complexity_score: 4,
            automation_potential: Level::High,
            implementation_difficulty: Level::Medium,
            cost_share: 0.25,
            savings_rate: 0.7,
        },
        ProcessSpec {
            name: "Customer Due Diligence & KYC",
            time_percentage: 20.0,
            complexity_score: 4,
            automation_potential: Level::High,
            implementation_difficulty: Level::Medium,
            cost_share: 0.20,
            savings_rate: 0.8,
        },
        ProcessSpec {
            name: "Cybersecurity Monitoring & Response",
            time_percentage: 15.0,
            complexity_score: 5,
            automation_potential: Level::Medium,
            implementation_difficulty: Level::High,
            cost_share: 0.15,
            savings_rate: 0.5,
        },
    ],
    approach: "Enterprise AI Compliance & Risk Management Platform",
    components: &[
        "Regulatory Reporting Agent",
        "Risk Analysis Engine",
        "KYC Automation",
        "Cybersecurity Monitor",
    ],
    timeline: "18-24 months (phased implementation)",
    investment_low_share: 0.3,
    investment_high_share: 0.5,
    range_style: RangeStyle::Millions,
};

static MARKETING: ProcessTemplate = ProcessTemplate {
    kind: TemplateKind::Marketing,
    revenue_share: 0.6,
    cost_floor: 60_000.0,
    processes: &[
        ProcessSpec {
            name: "Client Research & Market Analysis",
            time_percentage: 40.0,
            complexity_score: 3,
            automation_potential: Level::High,
            implementation_difficulty: Level::Medium,
            cost_share: 0.4,
            savings_rate: 0.7,
        },
        ProcessSpec {
            name: "Proposal and Content Creation",
            time_percentage: 30.0,
            complexity_score: 4,
            automation_potential: Level::High,
            implementation_difficulty: Level::Low,
            cost_share: 0.3,
            savings_rate: 0.8,
        },
        ProcessSpec {
            name: "Client Communication & Reporting",
            time_percentage: 20.0,
            complexity_score: 2,
            automation_potential: Level::Medium,
            implementation_difficulty: Level::Low,
            cost_share: 0.2,
            savings_rate: 0.6,
        },
    ],
    approach: "Multi-Agent Marketing Automation Platform",
    components: &["Research Agent", "Content Generator", "Communication Bot"],
    timeline: "8-12 weeks",
    investment_low_share: 0.25,
    investment_high_share: 0.4,
    range_style: RangeStyle::Dollars,
};

static GENERIC: ProcessTemplate = ProcessTemplate {
    kind: TemplateKind::Generic,
    revenue_share: 0.2,
    cost_floor: 100_000.0,
    processes: &[
        ProcessSpec {
            name: "Research & Data Collection",
            time_percentage: 35.0,
            complexity_score: 3,
            automation_potential: Level::High,
            implementation_difficulty: Level::Medium,
            cost_share: 0.35,
            savings_rate: 0.7,
        },
        ProcessSpec {
            name: "Report and Document Generation",
            time_percentage: 25.0,
            complexity_score: 4,
            automation_potential: Level::High,
            implementation_difficulty: Level::Low,
            cost_share: 0.25,
            savings_rate: 0.8,
        },
        ProcessSpec {
            name: "Administrative Tasks",
            time_percentage: 20.0,
            complexity_score: 2,
            automation_potential: Level::Medium,
            implementation_difficulty: Level::Low,
            cost_share: 0.20,
            savings_rate: 0.6,
        },
    ],
    approach: "Multi-Agent Business Automation Platform",
    components: &["Research Agent", "Content Generator", "Communication Bot"],
    timeline: "12-16 weeks",
    investment_low_share: 0.25,
    investment_high_share: 0.4,
    range_style: RangeStyle::Dollars,
};

impl TemplateKind {
    /// Banking by industry, marketing only when the wording mentions it.
    pub fn select(industry: Industry, description: &str) -> Self {
        match industry {
            Industry::Banking => TemplateKind::Banking,
            _ if MARKETING_HINT_RE.is_match(description) => TemplateKind::Marketing,
            _ => TemplateKind::Generic,
        }
    }

    pub fn template(self) -> &'static ProcessTemplate {
        match self {
            TemplateKind::Banking => &BANKING,
            TemplateKind::Marketing => &MARKETING,
            TemplateKind::Generic => &GENERIC,
        }
    }
}

impl ProcessTemplate {
    pub fn base_cost(&self, annual_revenue: f64) -> f64 {
        (annual_revenue * self.revenue_share).max(self.cost_floor)
    }

    pub fn investment_range(&self, base_cost: f64) -> InvestmentRange {
        InvestmentRange {
            low: base_cost * self.investment_low_share,
            high: base_cost * self.investment_high_share,
            style: self.range_style,
        }
    }

    pub fn estimate_processes(&self, base_cost: f64) -> Vec<ProcessEstimate> {
        self.processes
            .iter()
            .map(|spec| {
                let current_cost_annual = base_cost * spec.cost_share;
                ProcessEstimate {
                    name: spec.name.to_string(),
                    time_percentage: spec.time_percentage,
                    complexity_score: spec.complexity_score,
                    automation_potential: spec.automation_potential,
                    current_cost_annual,
                    potential_savings: current_cost_annual * spec.savings_rate,
                    roi_percentage: spec.savings_rate * 100.0,
                    implementation_difficulty: spec.implementation_difficulty,
                }
            })
            .collect()
    }
}

/// Low and high investment bounds plus how they are written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentRange {
    pub low: f64,
    pub high: f64,
    pub style: RangeStyle,
}

impl InvestmentRange {
    /// Low bound as it reads in the rendered range, which is what the ROI figures use.
    pub fn implementation_cost(&self) -> f64 {
        extract_implementation_cost(&self.to_string())
    }
}

impl fmt::Display for InvestmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            RangeStyle::Millions => write!(
                f,
                "${:.1}M - ${:.1}M",
                self.low / 1_000_000.0,
                self.high / 1_000_000.0
            ),
            RangeStyle::Dollars => write!(
                f,
                "{} - {}",
                format_currency(self.low),
                format_currency(self.high)
            ),
        }
    }
}

/// Savings over implementation cost, as a percentage. Zero cost gives zero.
pub fn overall_roi(total_savings: f64, implementation_cost: f64) -> f64 {
    if implementation_cost > 0.0 {
        total_savings / implementation_cost * 100.0
    } else {
        0.0
    }
}

/// Whole months until cumulative savings cover the implementation cost.
///
/// Truncated, not rounded. Twelve when there are no savings at all.
pub fn payback_months(implementation_cost: f64, total_savings: f64) -> u32 {
    if total_savings > 0.0 {
        (implementation_cost / (total_savings / 12.0)) as u32
    } else {
        12
    }
}

pub fn build_business_profile(description: &str) -> BusinessProfile {
    BusinessProfile {
        name: PROFILE_NAME.to_string(),
        industry: extract_industry(description),
        size: estimate_business_size(description),
        revenue_range: estimate_revenue_bracket(description),
        description: description.to_string(),
        pain_points: DEFAULT_PAIN_POINTS.iter().map(|s| s.to_string()).collect(),
        current_processes: DEFAULT_PROCESSES.iter().map(|s| s.to_string()).collect(),
    }
}

/// Produces the full opportunity report for a business description.
pub fn estimate_opportunity(description: &str) -> OpportunityReport {
    let business_profile = build_business_profile(description);
    let template = TemplateKind::select(business_profile.industry, description).template();

    let annual_revenue = extract_revenue_amount(description);
    let base_cost = template.base_cost(annual_revenue);
    let process_estimates = template.estimate_processes(base_cost);

    let investment = template.investment_range(base_cost);
    let investment_range = investment.to_string();
    let implementation_cost = investment.implementation_cost();

    let total_savings: f64 = process_estimates.iter().map(|p| p.potential_savings).sum();

    tracing::debug!(
        "Estimated {:?} template: base_cost={}, savings={}, implementation={}",
        template.kind,
        base_cost,
        total_savings,
        implementation_cost
    );

    OpportunityReport {
        business_profile,
        process_estimates,
        overall_roi: overall_roi(total_savings, implementation_cost),
        recommended_solution: RecommendedSolution {
            approach: template.approach.to_string(),
            components: template.components.iter().map(|s| s.to_string()).collect(),
            timeline: template.timeline.to_string(),
            investment: investment_range.clone(),
        },
        implementation_roadmap: IMPLEMENTATION_ROADMAP.iter().map(|s| s.to_string()).collect(),
        investment_range,
        payback_months: payback_months(implementation_cost, total_savings),
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        generated_at: Local::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_selection() {
        assert_eq!(
            TemplateKind::select(Industry::Banking, "a bank"),
            TemplateKind::Banking
        );
        assert_eq!(
            TemplateKind::select(Industry::Consulting, "strategy advisory"),
            TemplateKind::Generic
        );
        assert_eq!(
            TemplateKind::select(Industry::Marketing, "digital advertising agency"),
            TemplateKind::Generic
        );
        assert_eq!(
            TemplateKind::select(Industry::Consulting, "independent consultants"),
            TemplateKind::Marketing
        );
        assert_eq!(
            TemplateKind::select(Industry::Retail, "retail shop with a marketing consultant"),
            TemplateKind::Marketing
        );
        assert_eq!(
            TemplateKind::select(Industry::Retail, "retail shop"),
            TemplateKind::Generic
        );
    }

    #[test]
    fn test_cost_shares_sum_below_one() {
        for kind in [
            TemplateKind::Banking,
            TemplateKind::Marketing,
            TemplateKind::Generic,
        ] {
            let template = kind.template();
            let total: f64 = template.processes.iter().map(|p| p.cost_share).sum();
            assert!(total <= 1.0 + 1e-9, "{:?} shares sum to {}", kind, total);
            assert!(template.processes.iter().all(|p| p.savings_rate < 1.0));
        }
    }

    #[test]
    fn test_investment_range_rendering() {
        let range = BANKING.investment_range(150_000_000.0);
        assert_eq!(range.to_string(), "$45.0M - $75.0M");
        assert_eq!(range.implementation_cost(), 45_000_000.0);

        let range = GENERIC.investment_range(100_000.0);
        assert_eq!(range.to_string(), "$25,000 - $40,000");
        assert_eq!(range.implementation_cost(), 25_000.0);
    }

    #[test]
    fn test_payback_and_roi_edges() {
        assert_eq!(payback_months(50_000.0, 0.0), 12);
        assert_eq!(payback_months(45_000_000.0, 97_500_000.0), 5);
        assert_eq!(overall_roi(10.0, 0.0), 0.0);
        assert_eq!(overall_roi(50.0, 25.0), 200.0);
    }
}
