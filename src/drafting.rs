//! Context bundle handed to the reply-drafting model.
//!
//! Nothing in here writes prose itself. It picks which fixed guidance strings,
//! value propositions and pricing tier apply to a lead, and renders them into
//! the drafting prompt. Every selection is a pure function of its inputs.

use crate::extractor::find_revenue_figure;
use crate::models::{FamiliarityTier, IntentType, LeadAssessment, LeadRecord};

macro_rules! product_name {
    () => {
        "CauSelf"
    };
}

pub const PRODUCT_NAME: &str = product_name!();
pub const SENDER_NAME: &str = "Brett Podolsky";
pub const SENDER_SIGN_OFF: &str = "Brett";

/// Headline value propositions, always quoted with their numbers.
pub const VALUE_PROPS: &[(&str, &str)] = &[
    ("accuracy", "25% forecast accuracy improvement"),
    ("time_savings", "40% planning time reduction"),
    ("implementation_speed", "90-120 day implementation"),
    ("legacy_comparison", "12-18 months for SAP/Oracle"),
    ("cost_savings", "50-70% lower TCO than enterprise systems"),
    ("positioning", "Enterprise-grade AI at mid-market prices"),
    ("target", "Purpose-built for FMCG"),
];

/// Value props quoted in the drafting prompt, in order.
const PROMPT_VALUE_PROPS: &[&str] = &[
    "accuracy",
    "time_savings",
    "implementation_speed",
    "positioning",
    "target",
];

/// Answer to a pain point, keyed by a phrase the classifier may report.
pub const PAIN_POINT_SOLUTIONS: &[(&str, &str)] = &[
    ("forecast accuracy", "AI/ML models improve accuracy by 25%"),
    ("manual planning", "Automation reduces planning time by 40%"),
    (
        "disconnected systems",
        "Integrated platform connects ERP/WMS/TMS",
    ),
    ("enterprise cost", "50-70% lower TCO than SAP/Oracle"),
    (
        "long implementation",
        "90-120 days vs 12-18+ months for legacy systems",
    ),
];

/// Annual price band for one revenue bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTier {
    pub bracket: &'static str,
    pub revenue_min: f64,
    pub revenue_max: f64,
    pub revenue_label: &'static str,
    pub price_label: &'static str,
}

pub const PRICING_TIERS: &[PricingTier] = &[
    PricingTier {
        bracket: "small",
        revenue_min: 50_000_000.0,
        revenue_max: 100_000_000.0,
        revenue_label: "$50M-$100M",
        price_label: "$75K-$100K",
    },
    PricingTier {
        bracket: "medium",
        revenue_min: 100_000_000.0,
        revenue_max: 300_000_000.0,
        revenue_label: "$100M-$300M",
        price_label: "$100K-$150K",
    },
    PricingTier {
        bracket: "large",
        revenue_min: 300_000_000.0,
        revenue_max: 700_000_000.0,
        revenue_label: "$300M-$700M",
        price_label: "$150K-$200K",
    },
];

/// Target customer profile.
pub struct QualificationCriteria {
    pub industries: &'static [&'static str],
    pub revenue_min: f64,
    pub revenue_max: f64,
    pub decision_makers: &'static [&'static str],
}

pub const QUALIFICATION_CRITERIA: QualificationCriteria = QualificationCriteria {
    industries: &["FMCG", "Food", "Beverage", "Consumer Goods", "CPG"],
    revenue_min: 50_000_000.0,
    revenue_max: 700_000_000.0,
    decision_makers: &[
        "VP Supply Chain",
        "COO",
        "CFO",
        "Director",
        "VP Operations",
    ],
};

pub fn familiarity_guidance(tier: FamiliarityTier) -> &'static str {
    match tier {
        FamiliarityTier::Hot => {
            "This is a HOT lead (high engagement). Skip introduction, get to specifics quickly."
        }
        FamiliarityTier::Warm => {
            concat!(
                "This is a WARM lead (some engagement). Brief reminder of ",
                product_name!(),
                ", then specifics."
            )
        }
        FamiliarityTier::Cold => {
            "This is a COLD lead (no prior context). Full value prop, social proof, soft CTA."
        }
    }
}

pub fn intent_guidance(intent: IntentType) -> &'static str {
    match intent {
        IntentType::HighIntent => "High intent - be direct, propose meeting with specific times",
        IntentType::MediumIntent => {
            "Medium intent - educate on value, soft CTA for discovery call"
        }
        IntentType::LowIntent => "Low intent - build interest, offer resources",
        IntentType::Objection => {
            "Objection handling - empathize, reframe, offer low-pressure 15-min call"
        }
        IntentType::Question => "Answer specific question, then pivot to discovery",
    }
}

pub fn qualification_guidance(is_qualified: bool) -> &'static str {
    if is_qualified {
        "Lead IS qualified - offer 30-min discovery call"
    } else {
        "Lead NOT fully qualified - offer resources, nurture approach"
    }
}

/// Picks the pricing tier whose revenue window holds the stated revenue.
///
/// The top tier includes its upper bound; revenue outside $50M-$700M has no tier.
pub fn pricing_tier_for(revenue: &str) -> Option<&'static PricingTier> {
    let amount = find_revenue_figure(revenue)?.amount_usd;
    PRICING_TIERS.iter().enumerate().find_map(|(idx, tier)| {
        let is_last = idx + 1 == PRICING_TIERS.len();
        let below_max = amount < tier.revenue_max || (is_last && amount <= tier.revenue_max);
        (amount >= tier.revenue_min && below_max).then_some(tier)
    })
}

fn value_prop(key: &str) -> &'static str {
    VALUE_PROPS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or_default()
}

/// Solutions whose key phrase appears in any reported pain point, in table order.
pub fn matching_solutions(pain_points: &[String]) -> Vec<&'static str> {
    let lowered: Vec<String> = pain_points.iter().map(|p| p.to_lowercase()).collect();
    PAIN_POINT_SOLUTIONS
        .iter()
        .filter(|(key, _)| lowered.iter().any(|p| p.contains(key)))
        .map(|(_, solution)| *solution)
        .collect()
}

/// Deterministic selections for one lead.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContext {
    pub guidelines: Vec<&'static str>,
    pub pricing_tier: Option<&'static PricingTier>,
    pub solutions: Vec<&'static str>,
}

impl ResponseContext {
    pub fn new(lead: &LeadRecord, assessment: &LeadAssessment) -> Self {
        Self {
            guidelines: vec![
                familiarity_guidance(lead.familiarity),
                intent_guidance(assessment.intent),
                qualification_guidance(assessment.is_qualified),
            ],
            pricing_tier: lead.revenue.as_deref().and_then(pricing_tier_for),
            solutions: matching_solutions(&assessment.pain_points),
        }
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

pub fn build_generation_prompt(lead: &LeadRecord, assessment: &LeadAssessment) -> String {
    let context = ResponseContext::new(lead, assessment);

    let guidelines = context
        .guidelines
        .iter()
        .map(|g| format!("- {}", g))
        .collect::<Vec<_>>()
        .join("\n");

    let value_props = PROMPT_VALUE_PROPS
        .iter()
        .map(|key| match *key {
            "implementation_speed" => format!(
                "- {} (vs {})",
                value_prop(key),
                value_prop("legacy_comparison")
            ),
            _ => format!("- {}", value_prop(key)),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let solutions = if context.solutions.is_empty() {
        "- None matched".to_string()
    } else {
        context
            .solutions
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let pricing = PRICING_TIERS
        .iter()
        .map(|tier| {
            let marker = if context.pricing_tier == Some(tier) {
                " <- this lead's bracket"
            } else {
                ""
            };
            format!(
                "- {} revenue: {} annually{}",
                tier.revenue_label, tier.price_label, marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are {sender}, founder of {product}, responding to a sales lead.

LEAD INFORMATION:
Name: {name}
Company: {company}
Role: {role}
Industry: {industry}
Revenue: {revenue}
Source: {source}
Engagement Context: {engagement}

THEIR MESSAGE:
{message}

ANALYSIS:
Intent: {intent}
Qualified: {qualified}
Pain Points Mentioned: {pain_points}
Questions: {questions}
Objections: {objections}
Current System: {current_system}

RESPONSE GUIDELINES:
{guidelines}

{product} VALUE PROPS (ALWAYS include these numbers):
{value_props}

SOLUTIONS FOR THEIR PAIN POINTS:
{solutions}

TONE & STYLE:
- Consultative, not salesy
- Confident but humble
- Data-driven (use specific numbers)
- Empathetic to their challenges
- Direct with clear CTAs
- Match their tone (formal vs casual)

PRICING GUIDANCE (if relevant):
{pricing}
- Include: platform license, implementation, training, support

EXAMPLE STRUCTURES:

HIGH INTENT (Hot Lead):
"Great to hear from you! [Reference their engagement].

What they typically see with {product}:
- 25% forecast accuracy improvement
- 40% reduction in planning time
- 90-120 day implementation

[Address specific question/pain point]

Would it make sense to schedule a 30-minute discovery call? I'm available [Day] or [Day].

Best regards,
{sign_off}"

OBJECTION (Already Have System):
"That's great - many of our best clients had existing systems when they came to us. What's working well with [Their System]? And what would you improve?

{product} often sits alongside existing ERPs, enhancing forecasting capabilities. We're right-sized for mid-market complexity - the 'Goldilocks zone' between point solutions and SAP.

Would it make sense to have a 15-minute conversation to see if there's a fit? No pressure if there isn't.

Best regards,
{sign_off}"

Generate a personalized response to {name}. Output ONLY the email/message text, no additional commentary."#,
        sender = SENDER_NAME,
        product = PRODUCT_NAME,
        sign_off = SENDER_SIGN_OFF,
        name = lead.sender_name,
        company = lead.company_name.as_deref().unwrap_or("their company"),
        role = lead.role.as_deref().unwrap_or("role unknown"),
        industry = lead.industry,
        revenue = lead.revenue.as_deref().unwrap_or("unknown"),
        source = lead.source,
        engagement = lead.engagement_note.as_deref().unwrap_or("None"),
        message = lead.message,
        intent = assessment.intent,
        qualified = if assessment.is_qualified { "Yes" } else { "No" },
        pain_points = join_or_none(&assessment.pain_points),
        questions = join_or_none(&assessment.questions),
        objections = join_or_none(&assessment.objections),
        current_system = assessment.current_system.as_deref().unwrap_or("None"),
        guidelines = guidelines,
        value_props = value_props,
        solutions = solutions,
        pricing = pricing,
    )
}
