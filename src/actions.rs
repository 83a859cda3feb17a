use crate::models::{ActionRecommendation, FamiliarityTier, IntentType, LeadAssessment, NextAction};

fn recommendation(action: NextAction, detail: &str, rationale: String) -> ActionRecommendation {
    ActionRecommendation {
        action,
        detail: detail.to_string(),
        rationale,
    }
}

/// Picks the next step for a lead.
///
/// Rules are checked in order and the first one that fires wins:
///
/// 1. hot tier with high intent: call today
/// 2. qualified with high/medium intent or a question: 30-minute discovery
/// 3. objection: 15-minute intro
/// 4. not qualified: send resources
/// 5. qualified with low intent: follow up in a week
/// 6. anything else: 30-minute discovery
pub fn recommend_next_action(
    assessment: &LeadAssessment,
    familiarity: FamiliarityTier,
    engagement_note: Option<&str>,
) -> ActionRecommendation {
    let intent = assessment.intent;

    if familiarity == FamiliarityTier::Hot && intent == IntentType::HighIntent {
        return recommendation(
            NextAction::ImmediateCall,
            "Call this lead TODAY. High intent + high engagement = immediate opportunity.",
            format!(
                "Hot lead ({}) with high intent. Strike while hot.",
                engagement_note.unwrap_or("no engagement notes")
            ),
        );
    }

    if assessment.is_qualified
        && matches!(
            intent,
            IntentType::HighIntent | IntentType::MediumIntent | IntentType::Question
        )
    {
        return recommendation(
            NextAction::ScheduleDiscovery30,
            "Propose 30-minute discovery call with 2-3 specific time options.",
            format!("Qualified lead with {}. Standard discovery flow.", intent),
        );
    }

    if intent == IntentType::Objection {
        return recommendation(
            NextAction::ScheduleIntro15,
            "Offer 15-minute no-pressure conversation to explore fit.",
            format!(
                "Objection raised: {}. Low-pressure approach.",
                assessment.objections.join(", ")
            ),
        );
    }

    if !assessment.is_qualified {
        return recommendation(
            NextAction::SendResources,
            "Send case study/whitepaper, add to nurture campaign.",
            format!(
                "Not qualified: {}",
                assessment.qualification_reasons.join(", ")
            ),
        );
    }

    if intent == IntentType::LowIntent {
        return recommendation(
            NextAction::FollowUp1Week,
            "Set reminder to follow up in 1 week with additional value/insight.",
            "Qualified but low intent. Give them space, follow up with value.".to_string(),
        );
    }

    // Unreachable with the current intent set; kept so new intents still get a step.
    recommendation(
        NextAction::ScheduleDiscovery30,
        "Propose 30-minute discovery call.",
        "Default action for unclear situation.".to_string(),
    )
}
