/// Integration tests with mocked model APIs
/// Exercises both hosted clients and the two agents without hitting real services
use async_trait::async_trait;
use rust_sales_agents::errors::AppError;
use rust_sales_agents::lead_agent::LeadResponseAgent;
use rust_sales_agents::llm_client::{
    AnthropicClient, GenerationRequest, OpenAiClient, TextGenerator,
};
use rust_sales_agents::models::{FamiliarityTier, Industry, IntentType, LeadRecord, LeadSource, NextAction};
use rust_sales_agents::render::render_outcome;
use rust_sales_agents::research_agent::{MarketResearchAgent, PipelineStatus};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anthropic_client(base_url: String) -> AnthropicClient {
    AnthropicClient::new(
        base_url,
        "test-key".to_string(),
        "claude-test".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn openai_client(base_url: String) -> OpenAiClient {
    OpenAiClient::new(
        base_url,
        "test-key".to_string(),
        "gpt-test".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn anthropic_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn"
    })
}

fn openai_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

fn hot_lead() -> LeadRecord {
    LeadRecord::new(
        "Jennifer Martinez",
        "Our forecast accuracy is terrible and we're constantly dealing with stockouts. Can we schedule a demo?",
        LeadSource::AssessmentTool,
        FamiliarityTier::Hot,
    )
    .with_company("PureFood Products")
    .with_revenue("$80M")
    .with_role("COO")
    .with_engagement_note("Took assessment, clicked email 3x")
}

/// Generator that replays canned replies and records every request.
struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, AppError>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String, AppError>>) -> (Self, Arc<Mutex<Vec<GenerationRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut replies = replies;
        replies.reverse();
        (
            Self {
                replies: Mutex::new(replies),
                requests: Arc::clone(&requests),
            },
            requests,
        )
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(AppError::ExternalApiError("script exhausted".to_string())))
    }
}

#[tokio::test]
async fn test_anthropic_client_sends_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_string_contains("claude-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_text("Hello there")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = anthropic_client(mock_server.uri());
    let text = client
        .generate(&GenerationRequest::new("Say hello", 64, 0.3))
        .await
        .unwrap();

    assert_eq!(text, "Hello there");
}

#[tokio::test]
async fn test_anthropic_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = anthropic_client(mock_server.uri());
    let err = client
        .generate(&GenerationRequest::new("Say hello", 64, 0.3))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ExternalApiError(_)));
    let message = err.to_string();
    assert!(message.contains("Anthropic returned 529"), "{}", message);
    assert!(message.contains("overloaded"));
}

#[tokio::test]
async fn test_anthropic_response_without_text_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "content": [] })),
        )
        .mount(&mock_server)
        .await;

    let client = anthropic_client(mock_server.uri());
    let err = client
        .generate(&GenerationRequest::new("Say hello", 64, 0.3))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no text content"));
}

#[tokio::test]
async fn test_openai_client_uses_bearer_and_system_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains("\"role\":\"system\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_text("Analysis done")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = openai_client(mock_server.uri());
    let request = GenerationRequest::new("Analyze", 128, 0.3).with_system("You are an analyst.");
    let text = client.generate(&request).await.unwrap();

    assert_eq!(text, "Analysis done");
}

#[tokio::test]
async fn test_openai_empty_choices_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&mock_server)
        .await;

    let client = openai_client(mock_server.uri());
    let err = client
        .generate(&GenerationRequest::new("Analyze", 128, 0.3))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no message content"));
}

#[tokio::test]
async fn test_lead_agent_end_to_end_hot_lead() {
    let mock_server = MockServer::start().await;

    let classification = r#"Here is the analysis:
{
    "intent": "HIGH_INTENT",
    "is_qualified": true,
    "qualification_reasons": ["FMCG company", "COO", "$80M revenue"],
    "pain_points_mentioned": ["forecast accuracy", "stockouts"],
    "specific_questions": ["Can we schedule a demo?"],
    "objections_raised": [],
    "current_system_mentioned": null
}"#;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("ANALYSIS TASKS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_text(classification)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("RESPONSE GUIDELINES"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(anthropic_text("\n  Hi Jennifer, thanks for taking the assessment.\n\nBest regards,\nBrett  \n")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let agent = LeadResponseAgent::new(Box::new(anthropic_client(mock_server.uri())));
    let package = agent.respond(&hot_lead()).await.unwrap();

    assert_eq!(package.assessment.intent, IntentType::HighIntent);
    assert!(package.assessment.is_qualified);
    assert!(!package.assessment_fallback);
    assert_eq!(package.recommendation.action, NextAction::ImmediateCall);
    assert!(package
        .recommendation
        .rationale
        .contains("Took assessment, clicked email 3x"));
    assert_eq!(
        package.reply,
        "Hi Jennifer, thanks for taking the assessment.\n\nBest regards,\nBrett"
    );
    assert_eq!(package.confidence, 0.85);
}

#[tokio::test]
async fn test_lead_agent_unreadable_classification_uses_default() {
    let (generator, requests) = ScriptedGenerator::new(vec![
        Ok("I'm not sure how to classify this one.".to_string()),
        Ok("Thanks for reaching out!".to_string()),
    ]);
    let agent = LeadResponseAgent::new(Box::new(generator));

    let package = agent.respond(&hot_lead()).await.unwrap();

    assert!(package.assessment_fallback);
    assert_eq!(package.assessment.intent, IntentType::MediumIntent);
    assert_eq!(package.recommendation.action, NextAction::SendResources);
    assert_eq!(
        package.recommendation.rationale,
        "Not qualified: Unable to parse analysis"
    );

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].max_tokens, 1024);
    assert_eq!(requests[0].temperature, 0.3);
    assert_eq!(requests[1].max_tokens, 2048);
    assert_eq!(requests[1].temperature, 0.5);
}

#[tokio::test]
async fn test_lead_agent_propagates_service_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&mock_server)
        .await;

    let agent = LeadResponseAgent::new(Box::new(anthropic_client(mock_server.uri())));
    let err = agent.respond(&hot_lead()).await.unwrap_err();

    assert!(matches!(err.root(), AppError::ExternalApiError(_)));
    assert!(err.to_string().contains("Classifying lead from Jennifer Martinez"));
}

#[tokio::test]
async fn test_research_agent_completes_pipeline_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_text("Findings.")))
        .expect(3)
        .mount(&mock_server)
        .await;

    let agent = MarketResearchAgent::new(Box::new(openai_client(mock_server.uri())));
    let outcome = agent
        .analyze_business("Regional bank with $1,000,000,000 in annual revenue")
        .await
        .unwrap();

    match &outcome.pipeline {
        PipelineStatus::Completed { findings } => {
            assert_eq!(findings.business_analysis, "Findings.");
            assert_eq!(findings.roi_analysis, "Findings.");
        }
        other => panic!("expected completed pipeline, got {:?}", other),
    }
    assert_eq!(outcome.report.business_profile.industry, Industry::Banking);
    assert_eq!(outcome.report.investment_range, "$45.0M - $75.0M");

    let text = render_outcome(&outcome);
    assert!(text.contains("AI AGENT FINDINGS"));
    assert!(text.contains("ROI ANALYSIS\n------------\nFindings."));

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["pipeline"]["findings"]["business_analysis"], "Findings.");
    assert_eq!(json["investment_range"], "$45.0M - $75.0M");
}

#[tokio::test]
async fn test_research_agent_chains_context_between_roles() {
    let (generator, requests) = ScriptedGenerator::new(vec![
        Ok("BUSINESS-NOTES".to_string()),
        Ok("PROCESS-NOTES".to_string()),
        Ok("ROI-NOTES".to_string()),
    ]);
    let agent = MarketResearchAgent::new(Box::new(generator));

    let outcome = agent.analyze_business("Boutique marketing agency").await.unwrap();
    assert!(matches!(outcome.pipeline, PipelineStatus::Completed { .. }));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].prompt.contains("Business Description: Boutique marketing agency"));
    assert!(requests[0]
        .system
        .as_deref()
        .unwrap()
        .contains("Senior Market Research Analyst"));
    assert!(requests[1].prompt.contains("BUSINESS-NOTES"));
    assert!(requests[2].prompt.contains("BUSINESS-NOTES"));
    assert!(requests[2].prompt.contains("PROCESS-NOTES"));
    assert!(requests[2]
        .system
        .as_deref()
        .unwrap()
        .contains("Financial ROI Analyst"));
}

#[tokio::test]
async fn test_research_agent_failure_still_produces_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let agent = MarketResearchAgent::new(Box::new(openai_client(mock_server.uri())));
    let outcome = agent
        .analyze_business("A small bakery with 12 employees")
        .await
        .unwrap();

    match &outcome.pipeline {
        PipelineStatus::Failed { reason } => assert!(reason.contains("OpenAI returned 500")),
        other => panic!("expected failed pipeline, got {:?}", other),
    }
    assert_eq!(outcome.report.process_estimates.len(), 3);
    assert_eq!(
        outcome.report.business_profile.size,
        "Small Business (12 employees)"
    );
}

#[tokio::test]
async fn test_research_agent_rejects_empty_description() {
    let (generator, requests) = ScriptedGenerator::new(vec![]);
    let agent = MarketResearchAgent::new(Box::new(generator));

    let err = agent.analyze_business("   ").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(requests.lock().unwrap().is_empty());
}
