//! Sales automation agents.
//!
//! Two pipelines share this library:
//!
//! - The lead response agent classifies an inbound sales message with a hosted
//!   model, drafts a reply and recommends the next step from a fixed rule table.
//! - The market research agent turns a free-text business description into an
//!   opportunity report with process-level cost and savings estimates.
//!
//! # Modules
//!
//! - `actions`: Next-step decision table.
//! - `classifier`: Classification prompt and parsing of the model's verdict.
//! - `config`: Environment-driven configuration for both agents.
//! - `drafting`: Guidance, pricing and prompt for the reply draft.
//! - `errors`: Error handling types.
//! - `estimator`: Rule-based opportunity and ROI estimate.
//! - `export`: JSON report export.
//! - `extractor`: Industry, size and revenue heuristics.
//! - `formatting`: Number and currency formatting.
//! - `lead_agent`: Lead response workflow.
//! - `llm_client`: Anthropic and OpenAI text generation clients.
//! - `models`: Core data models.
//! - `outcome`: Success-or-fallback results.
//! - `prompt`: Terminal prompting helper.
//! - `render`: Text rendering for the CLIs.
//! - `research_agent`: Three-role research pipeline.

pub mod actions;
pub mod classifier;
pub mod config;
pub mod drafting;
pub mod errors;
pub mod estimator;
pub mod export;
pub mod extractor;
pub mod formatting;
pub mod lead_agent;
pub mod llm_client;
pub mod models;
pub mod outcome;
pub mod prompt;
pub mod render;
pub mod research_agent;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_sales_agents=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
