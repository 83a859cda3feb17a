use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Lead Models ============

/// Channel an inbound lead message arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Email,
    Social,
    WebForm,
    AssessmentTool,
    Referral,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Email => "email",
            LeadSource::Social => "social",
            LeadSource::WebForm => "website_form",
            LeadSource::AssessmentTool => "assessment_tool",
            LeadSource::Referral => "referral",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much prior exposure the lead has had to our marketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamiliarityTier {
    /// High engagement, clicked multiple times.
    Hot,
    /// Opened emails, clicked some content.
    Warm,
    /// New outreach, zero context.
    Cold,
}

impl FamiliarityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamiliarityTier::Hot => "hot",
            FamiliarityTier::Warm => "warm",
            FamiliarityTier::Cold => "cold",
        }
    }
}

impl fmt::Display for FamiliarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How ready-to-buy a lead's message reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    /// Meeting request, pricing, specific challenge.
    HighIntent,
    /// General interest, "tell me more".
    MediumIntent,
    /// Vague inquiry.
    LowIntent,
    /// Already have a system, too expensive, bad timing.
    Objection,
    /// Specific question about features, implementation, pricing.
    Question,
}

impl IntentType {
    pub const ALL: [IntentType; 5] = [
        IntentType::HighIntent,
        IntentType::MediumIntent,
        IntentType::LowIntent,
        IntentType::Objection,
        IntentType::Question,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentType::HighIntent => "high_intent",
            IntentType::MediumIntent => "medium_intent",
            IntentType::LowIntent => "low_intent",
            IntentType::Objection => "objection",
            IntentType::Question => "question",
        }
    }

    /// Parses the classifier wire name (`HIGH_INTENT`, `objection`, ...).
    pub fn from_wire(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw inbound message plus whatever enrichment the sender supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub sender_name: String,
    pub company_name: Option<String>,
    pub message: String,
    pub source: LeadSource,
    pub familiarity: FamiliarityTier,
    /// e.g. "$200M", "$50M-$100M".
    pub revenue: Option<String>,
    /// e.g. "VP Supply Chain", "COO".
    pub role: Option<String>,
    /// e.g. "Clicked email 2x, took assessment".
    pub engagement_note: Option<String>,
    pub industry: String,
}

impl LeadRecord {
    pub fn new(
        sender_name: impl Into<String>,
        message: impl Into<String>,
        source: LeadSource,
        familiarity: FamiliarityTier,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            company_name: None,
            message: message.into(),
            source,
            familiarity,
            revenue: None,
            role: None,
            engagement_note: None,
            industry: "FMCG".to_string(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    pub fn with_revenue(mut self, revenue: impl Into<String>) -> Self {
        self.revenue = Some(revenue.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_engagement_note(mut self, note: impl Into<String>) -> Self {
        self.engagement_note = Some(note.into());
        self
    }
}

/// Classification of one inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAssessment {
    pub intent: IntentType,
    pub is_qualified: bool,
    pub qualification_reasons: Vec<String>,
    pub pain_points: Vec<String>,
    pub questions: Vec<String>,
    pub objections: Vec<String>,
    /// Incumbent system named by the lead (SAP, Oracle, ...).
    pub current_system: Option<String>,
}

/// Recommended next step for the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    ImmediateCall,
    ScheduleDiscovery30,
    ScheduleIntro15,
    SendResources,
    FollowUp1Week,
}

impl NextAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextAction::ImmediateCall => "immediate_call",
            NextAction::ScheduleDiscovery30 => "schedule_discovery_30",
            NextAction::ScheduleIntro15 => "schedule_intro_15",
            NextAction::SendResources => "send_resources",
            NextAction::FollowUp1Week => "follow_up_1_week",
        }
    }

    /// Upper-cased, space separated label for terminal output.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase().replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub action: NextAction,
    pub detail: String,
    pub rationale: String,
}

/// Drafted reply plus the recommendation that goes with it.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsePackage {
    pub reply: String,
    pub recommendation: ActionRecommendation,
    pub assessment: LeadAssessment,
    /// True when the classifier output could not be parsed and defaults were used.
    pub assessment_fallback: bool,
    pub generated_at: DateTime<Local>,
    /// 0-1 scale.
    pub confidence: f64,
}

// ============ Opportunity Models ============

/// Closed set of industries recognised by the keyword extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Banking,
    Legal,
    Consulting,
    RealEstate,
    Healthcare,
    Manufacturing,
    Marketing,
    Accounting,
    Insurance,
    Retail,
    Technology,
    Education,
    ProfessionalServices,
}

impl Industry {
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Banking => "Banking",
            Industry::Legal => "Legal",
            Industry::Consulting => "Consulting",
            Industry::RealEstate => "Real Estate",
            Industry::Healthcare => "Healthcare",
            Industry::Manufacturing => "Manufacturing",
            Industry::Marketing => "Marketing",
            Industry::Accounting => "Accounting",
            Industry::Insurance => "Insurance",
            Industry::Retail => "Retail",
            Industry::Technology => "Technology",
            Industry::Education => "Education",
            Industry::ProfessionalServices => "Professional Services",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// High / Medium / Low rating used for automation potential and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub industry: Industry,
    pub size: String,
    pub revenue_range: String,
    pub description: String,
    pub pain_points: Vec<String>,
    pub current_processes: Vec<String>,
}

/// Cost and savings estimate for one business process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEstimate {
    pub name: String,
    /// Share of operating time, percent.
    pub time_percentage: f64,
    /// 1-5 ordinal.
    pub complexity_score: u8,
    pub automation_potential: Level,
    pub current_cost_annual: f64,
    pub potential_savings: f64,
    pub roi_percentage: f64,
    pub implementation_difficulty: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSolution {
    pub approach: String,
    pub components: Vec<String>,
    pub timeline: String,
    pub investment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityReport {
    pub business_profile: BusinessProfile,
    pub process_estimates: Vec<ProcessEstimate>,
    pub overall_roi: f64,
    pub recommended_solution: RecommendedSolution,
    pub implementation_roadmap: Vec<String>,
    pub investment_range: String,
    pub payback_months: u32,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl OpportunityReport {
    pub fn total_current_cost(&self) -> f64 {
        self.process_estimates
            .iter()
            .map(|p| p.current_cost_annual)
            .sum()
    }

    pub fn total_savings(&self) -> f64 {
        self.process_estimates
            .iter()
            .map(|p| p.potential_savings)
            .sum()
    }
}
