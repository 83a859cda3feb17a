//! Questionnaire-driven business analysis and AI opportunity assessment.

use clap::Parser;
use rust_sales_agents::config::ResearchAgentConfig;
use rust_sales_agents::export::save_report;
use rust_sales_agents::llm_client::OpenAiClient;
use rust_sales_agents::prompt::Prompter;
use rust_sales_agents::render::{header, render_outcome};
use rust_sales_agents::research_agent::MarketResearchAgent;
use std::io::{BufRead, Write};
use std::path::Path;

/// Turns a short business questionnaire into an automation opportunity report.
#[derive(Parser, Debug)]
#[command(name = "market-research-agent", version)]
struct Cli {}

const QUESTIONS: [&str; 6] = [
    "What industry is your business in?",
    "How many employees do you have?",
    "What are your main business activities?",
    "What processes take the most time each week?",
    "What are your biggest operational challenges?",
    "What's your approximate annual revenue?",
];

/// Asks every question and joins the answered ones, each prefixed by its question.
fn collect_business_info<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<String> {
    prompter.say("BUSINESS DISCOVERY QUESTIONNAIRE")?;
    prompter.say(&"-".repeat(40))?;

    let mut responses = Vec::new();
    for (i, question) in QUESTIONS.iter().enumerate() {
        prompter.say(&format!("\n{}. {}", i + 1, question))?;
        if let Some(answer) = prompter.ask_optional("   > ")? {
            responses.push(format!("{} {}", question, answer));
        }
    }
    Ok(responses.join(" "))
}

fn load_config() -> anyhow::Result<ResearchAgentConfig> {
    ResearchAgentConfig::from_env().map_err(|e| {
        eprintln!("Error: OpenAI API key not configured! ({})", e);
        eprintln!("\n1. Get your key from: https://platform.openai.com/api-keys");
        eprintln!("2. Edit the .env file in this directory");
        eprintln!("3. Replace 'sk-your-key-here' with your actual key");
        e
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rust_sales_agents::init_tracing();
    let _cli = Cli::parse();

    println!(
        "{}",
        header("AGENTIC AI MARKET RESEARCH AGENT\n  Professional Business Analysis & AI Opportunity Assessment")
    );

    let config = load_config()?;
    let agent = MarketResearchAgent::new(Box::new(OpenAiClient::from_config(&config)?));

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    let description = collect_business_info(&mut prompter)?;
    if description.trim().is_empty() {
        println!("No business information provided. Exiting.");
        return Ok(());
    }

    println!("\nProcessing your business analysis...");
    println!("   This may take 30-60 seconds...");

    let outcome = agent.analyze_business(&description).await?;
    println!("{}", render_outcome(&outcome));

    if prompter.confirm("\nSave this report to file? (y/n): ")? {
        let path = save_report(&outcome, Path::new(&config.report_dir))?;
        println!("\nAnalysis saved to: {}", path.display());
    }

    println!("\nAnalysis complete! Use this report for client discussions and proposals.");
    Ok(())
}
