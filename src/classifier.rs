//! Classification prompt for inbound lead messages and parsing of the model's verdict.

use crate::drafting::{PRODUCT_NAME, QUALIFICATION_CRITERIA};
use crate::models::{IntentType, LeadAssessment, LeadRecord};
use crate::outcome::Outcome;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("json object regex is valid"));

const UNPARSED_REASON: &str = "Unable to parse analysis";
const MISSING_REASONS: &str = "No qualification reasons provided";

/// Builds the classification prompt for one lead.
pub fn build_analysis_prompt(lead: &LeadRecord) -> String {
    let criteria = &QUALIFICATION_CRITERIA;
    format!(
        r#"You are analyzing a sales lead message for {product}, an AI-powered supply chain forecasting platform for FMCG companies.

LEAD MESSAGE:
From: {sender}
Company: {company}
Source: {source}
Temperature: {tier}
Message: {message}

CONTEXT:
- {product} is an AI forecasting platform for FMCG companies ($50M-$700M revenue)
- Target industries: {industries}
- Target decision makers: {decision_makers}
- Qualified leads: FMCG industry, mid-market size, decision maker/influencer

ANALYSIS TASKS:
1. Classify the INTENT of this message:
   - HIGH_INTENT: Meeting request, pricing question, specific challenge/pain point
   - MEDIUM_INTENT: General interest, "tell me more", exploring options
   - LOW_INTENT: Vague inquiry, minimal engagement
   - OBJECTION: Already have system, too expensive, bad timing
   - QUESTION: Specific question about features, implementation, pricing

2. Determine if lead is QUALIFIED:
   - FMCG or adjacent industry
   - Mid-market size (${min_m}M-${max_m}M revenue range)
   - Decision maker or influencer role
   - Expressed specific pain point or need

3. Extract KEY INFORMATION:
   - Pain points mentioned (forecast accuracy, manual processes, etc.)
   - Specific questions asked
   - Objections raised
   - Current system mentioned (SAP, Oracle, etc.)

RESPONSE FORMAT (JSON):
{{
    "intent": "HIGH_INTENT|MEDIUM_INTENT|LOW_INTENT|OBJECTION|QUESTION",
    "is_qualified": true|false,
    "qualification_reasons": ["reason 1", "reason 2"],
    "pain_points_mentioned": ["pain point 1", "pain point 2"],
    "specific_questions": ["question 1", "question 2"],
    "objections_raised": ["objection 1"],
    "current_system_mentioned": "system name or null"
}}

Provide ONLY the JSON response, no additional text."#,
        product = PRODUCT_NAME,
        sender = lead.sender_name,
        company = lead.company_name.as_deref().unwrap_or("Unknown"),
        source = lead.source,
        tier = lead.familiarity,
        message = lead.message,
        industries = criteria.industries.join(", "),
        decision_makers = criteria.decision_makers.join(", "),
        min_m = criteria.revenue_min / 1_000_000.0,
        max_m = criteria.revenue_max / 1_000_000.0,
    )
}

/// Span from the first `{` to the last `}` in the text, newlines included.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(text).map(|m| m.as_str())
}

/// Assessment used whenever the classifier reply can't be interpreted.
pub fn default_assessment() -> LeadAssessment {
    LeadAssessment {
        intent: IntentType::MediumIntent,
        is_qualified: false,
        qualification_reasons: vec![UNPARSED_REASON.to_string()],
        pain_points: Vec::new(),
        questions: Vec::new(),
        objections: Vec::new(),
        current_system: None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAssessment {
    intent: Option<String>,
    is_qualified: Option<bool>,
    qualification_reasons: Option<Vec<String>>,
    pain_points_mentioned: Option<Vec<String>>,
    specific_questions: Option<Vec<String>>,
    objections_raised: Option<Vec<String>>,
    current_system_mentioned: Option<String>,
}

/// Interprets the classifier reply.
///
/// Missing keys take defaults. No JSON object, undecodable JSON or an intent
/// outside the five known names yields [`Outcome::Fallback`] with
/// [`default_assessment`].
pub fn parse_assessment(text: &str) -> Outcome<LeadAssessment> {
    let Some(json) = extract_json_object(text) else {
        tracing::warn!("Classifier reply contained no JSON object");
        return Outcome::fallback(default_assessment(), "no JSON object found");
    };

    let raw: RawAssessment = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Classifier reply was not valid JSON: {}", e);
            return Outcome::fallback(default_assessment(), format!("invalid JSON: {}", e));
        }
    };

    let intent = match raw.intent.as_deref() {
        None => IntentType::MediumIntent,
        Some(wire) => match IntentType::from_wire(wire) {
            Some(intent) => intent,
            None => {
                tracing::warn!("Classifier returned unknown intent '{}'", wire);
                return Outcome::fallback(
                    default_assessment(),
                    format!("unknown intent: {}", wire),
                );
            }
        },
    };

    let is_qualified = raw.is_qualified.unwrap_or(false);
    let mut qualification_reasons = raw.qualification_reasons.unwrap_or_default();
    if !is_qualified && qualification_reasons.is_empty() {
        qualification_reasons.push(MISSING_REASONS.to_string());
    }

    let current_system = raw
        .current_system_mentioned
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("null"));

    Outcome::Succeeded(LeadAssessment {
        intent,
        is_qualified,
        qualification_reasons,
        pain_points: raw.pain_points_mentioned.unwrap_or_default(),
        questions: raw.specific_questions.unwrap_or_default(),
        objections: raw.objections_raised.unwrap_or_default(),
        current_system,
    })
}
