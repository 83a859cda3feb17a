use crate::actions::recommend_next_action;
use crate::classifier::{build_analysis_prompt, parse_assessment};
use crate::drafting::build_generation_prompt;
use crate::errors::{AppError, ResultExt};
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::models::{LeadAssessment, LeadRecord, ResponsePackage};
use crate::outcome::Outcome;
use chrono::Local;

const ANALYSIS_MAX_TOKENS: u32 = 1024;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const DRAFT_MAX_TOKENS: u32 = 2048;
const DRAFT_TEMPERATURE: f32 = 0.5;
/// Fixed until there is a real signal to derive it from.
const RESPONSE_CONFIDENCE: f64 = 0.85;

/// Classifies an inbound lead, drafts the reply and recommends the next step.
pub struct LeadResponseAgent {
    generator: Box<dyn TextGenerator>,
}

impl LeadResponseAgent {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Asks the model to classify the lead.
    ///
    /// An unreadable classification degrades to [`Outcome::Fallback`]; only
    /// transport and service errors are returned as `Err`.
    pub async fn analyze(&self, lead: &LeadRecord) -> Result<Outcome<LeadAssessment>, AppError> {
        let request = GenerationRequest::new(
            build_analysis_prompt(lead),
            ANALYSIS_MAX_TOKENS,
            ANALYSIS_TEMPERATURE,
        );
        let raw = self
            .generator
            .generate(&request)
            .await
            .with_context(|| format!("Classifying lead from {}", lead.sender_name))?;

        let outcome = parse_assessment(&raw);
        if let Some(reason) = outcome.fallback_reason() {
            tracing::warn!(
                "Using default assessment for {}: {}",
                lead.sender_name,
                reason
            );
        }
        Ok(outcome)
    }

    /// Drafts the reply text. The model's output is used as-is apart from trimming.
    pub async fn draft_reply(
        &self,
        lead: &LeadRecord,
        assessment: &LeadAssessment,
    ) -> Result<String, AppError> {
        let request = GenerationRequest::new(
            build_generation_prompt(lead, assessment),
            DRAFT_MAX_TOKENS,
            DRAFT_TEMPERATURE,
        );
        let reply = self
            .generator
            .generate(&request)
            .await
            .with_context(|| format!("Drafting reply to {}", lead.sender_name))?;
        Ok(reply.trim().to_string())
    }

    /// Runs classification, drafting and the action rules for one lead.
    pub async fn respond(&self, lead: &LeadRecord) -> Result<ResponsePackage, AppError> {
        tracing::info!(
            "Responding to lead: sender={}, source={}, tier={}",
            lead.sender_name,
            lead.source,
            lead.familiarity
        );

        let outcome = self.analyze(lead).await?;
        let assessment_fallback = outcome.is_fallback();
        let assessment = outcome.into_value();
        tracing::info!(
            "Lead classified: intent={}, qualified={}",
            assessment.intent,
            assessment.is_qualified
        );

        let reply = self.draft_reply(lead, &assessment).await?;

        let recommendation = recommend_next_action(
            &assessment,
            lead.familiarity,
            lead.engagement_note.as_deref(),
        );
        tracing::info!("Recommended next action: {}", recommendation.action.as_str());

        Ok(ResponsePackage {
            reply,
            recommendation,
            assessment,
            assessment_fallback,
            generated_at: Local::now(),
            confidence: RESPONSE_CONFIDENCE,
        })
    }
}
