use clap::{Parser, Subcommand};
use rust_sales_agents::config::LeadAgentConfig;
use rust_sales_agents::lead_agent::LeadResponseAgent;
use rust_sales_agents::llm_client::AnthropicClient;
use rust_sales_agents::models::{FamiliarityTier, LeadRecord, LeadSource};
use rust_sales_agents::prompt::Prompter;
use rust_sales_agents::render::{header, render_lead_summary, render_response_package};
use std::io::{BufRead, Write};

/// Drafts replies to inbound sales leads and recommends the next step.
#[derive(Parser, Debug)]
#[command(name = "lead-response-agent", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in sample leads instead of prompting
    Test,
}

const FAMILIARITY_MENU: [(&str, FamiliarityTier); 3] = [
    ("HOT (high engagement)", FamiliarityTier::Hot),
    ("WARM (some clicks)", FamiliarityTier::Warm),
    ("COLD (new outreach)", FamiliarityTier::Cold),
];

const SOURCE_MENU: [(&str, LeadSource); 5] = [
    ("Email", LeadSource::Email),
    ("Social", LeadSource::Social),
    ("Website Form", LeadSource::WebForm),
    ("Assessment Tool", LeadSource::AssessmentTool),
    ("Referral", LeadSource::Referral),
];

fn sample_leads() -> Vec<LeadRecord> {
    vec![
        LeadRecord::new(
            "Sarah Chen",
            "Hi Brett, I saw your email about AI forecasting. We're currently using Excel for our \
             demand planning and it's killing us - so many hours of manual work. What kind of \
             accuracy improvements have you seen with FMCG companies our size ($150M revenue)? \
             Would love to learn more.",
            LeadSource::Email,
            FamiliarityTier::Warm,
        )
        .with_company("BrightFood Corp")
        .with_revenue("$150M")
        .with_role("VP Supply Chain")
        .with_engagement_note("Clicked email 2x"),
        LeadRecord::new(
            "Mike Thompson",
            "We already have SAP IBP. Why would we need another system?",
            LeadSource::Social,
            FamiliarityTier::Cold,
        )
        .with_company("GlobalBev Inc")
        .with_revenue("$400M")
        .with_role("Director of Planning"),
        LeadRecord::new(
            "Jennifer Martinez",
            "Just took your supply chain assessment - scored 42%. Our forecast accuracy is \
             terrible and we're constantly dealing with stockouts. Can we schedule a demo?",
            LeadSource::AssessmentTool,
            FamiliarityTier::Hot,
        )
        .with_company("PureFood Products")
        .with_revenue("$80M")
        .with_role("COO")
        .with_engagement_note("Took assessment, clicked email 3x"),
    ]
}

fn build_agent() -> anyhow::Result<LeadResponseAgent> {
    let config = match LeadAgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nSet your Anthropic API key:");
            eprintln!("  export ANTHROPIC_API_KEY='your-key-here'");
            eprintln!("or add it to a .env file in this directory.");
            return Err(e);
        }
    };
    let client = AnthropicClient::from_config(&config)?;
    tracing::info!("Lead response agent using model {}", config.model);
    Ok(LeadResponseAgent::new(Box::new(client)))
}

/// Collects one lead from the terminal. `None` when the operator quits.
fn read_lead<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Option<LeadRecord>> {
    loop {
        prompter.say(&format!("\n{}", "-".repeat(80)))?;
        prompter.say("Enter lead information (or 'quit' to exit):")?;
        prompter.say(&format!("{}\n", "-".repeat(80)))?;

        let sender_name = match prompter.ask("Sender Name: ")? {
            None => return Ok(None),
            Some(name) if name.eq_ignore_ascii_case("quit") => return Ok(None),
            Some(name) => name,
        };
        let company = prompter.ask_optional("Company Name (optional): ")?;
        let familiarity =
            prompter.choose("Lead Temperature:", &FAMILIARITY_MENU, FamiliarityTier::Warm)?;
        let source = prompter.choose("Message Source:", &SOURCE_MENU, LeadSource::Email)?;

        prompter.say("\nLead's Message:")?;
        prompter.say("(Enter message, then a blank line when done)")?;
        let message = prompter.read_block()?;
        if message.is_empty() {
            prompter.say("No message entered. Try again.")?;
            continue;
        }

        let mut lead = LeadRecord::new(sender_name, message, source, familiarity);
        if let Some(company) = company {
            lead = lead.with_company(company);
        }
        if let Some(revenue) = prompter.ask_optional("\nCompany Revenue (optional, e.g., $200M): ")? {
            lead = lead.with_revenue(revenue);
        }
        if let Some(role) = prompter.ask_optional("Sender Role (optional, e.g., VP Supply Chain): ")? {
            lead = lead.with_role(role);
        }
        if let Some(note) =
            prompter.ask_optional("Engagement Context (optional, e.g., clicked email 2x): ")?
        {
            lead = lead.with_engagement_note(note);
        }
        return Ok(Some(lead));
    }
}

async fn interactive_mode() -> anyhow::Result<()> {
    println!("{}", header("CauSelf Lead Response Agent"));
    println!("Generate personalized sales responses for your leads.\n");

    let agent = build_agent()?;
    println!("Agent initialized successfully");

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    while let Some(lead) = read_lead(&mut prompter)? {
        println!("\nAnalyzing lead and generating response...\n");
        match agent.respond(&lead).await {
            Ok(package) => println!("{}", render_response_package(&package)),
            Err(e) => {
                tracing::error!("Response generation failed: {}", e);
                println!("Error generating response: {}", e);
            }
        }
    }

    println!("\nThanks for using CauSelf Lead Response Agent!");
    Ok(())
}

async fn quick_test_mode() -> anyhow::Result<()> {
    println!("{}", header("CauSelf Lead Response Agent - Quick Test Mode"));

    let agent = build_agent()?;
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    let leads = sample_leads();
    for (i, lead) in leads.iter().enumerate() {
        println!("{}", render_lead_summary(i + 1, lead));
        println!("\nGenerating response...\n");
        match agent.respond(lead).await {
            Ok(package) => println!("{}", render_response_package(&package)),
            Err(e) => println!("Error: {}", e),
        }

        if i + 1 < leads.len() {
            prompter.ask("\n[Press Enter for next test lead...]")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rust_sales_agents::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Test) => quick_test_mode().await,
        None => interactive_mode().await,
    }
}
