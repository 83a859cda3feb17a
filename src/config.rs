use std::time::Duration;

const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_LEAD_MODEL: &str = "claude-3-5-sonnet-20241022";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_RESEARCH_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Value shipped in the sample `.env`; treated as "not configured".
const OPENAI_KEY_PLACEHOLDER: &str = "sk-your-key-here";

/// Settings for the lead response agent.
#[derive(Debug, Clone)]
pub struct LeadAgentConfig {
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

/// Settings for the market research agent.
#[derive(Debug, Clone)]
pub struct ResearchAgentConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub report_dir: String,
}

impl LeadAgentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY")
                .ok_or_else(|| anyhow::anyhow!("ANTHROPIC_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("ANTHROPIC_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            anthropic_base_url: base_url(
                &lookup,
                "ANTHROPIC_BASE_URL",
                DEFAULT_ANTHROPIC_BASE_URL,
            )?,
            model: lookup("LEAD_AGENT_MODEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LEAD_MODEL.to_string()),
            request_timeout_secs: timeout_secs(&lookup)?,
        };

        tracing::debug!("Anthropic Base URL: {}", config.anthropic_base_url);
        tracing::debug!("Lead agent model: {}", config.model);

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ResearchAgentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            openai_api_key: lookup("OPENAI_API_KEY")
                .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("OPENAI_API_KEY cannot be empty");
                    }
                    if key.trim() == OPENAI_KEY_PLACEHOLDER {
                        anyhow::bail!("OPENAI_API_KEY is still set to the placeholder value");
                    }
                    Ok(key)
                })?,
            openai_base_url: base_url(&lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)?,
            model: lookup("RESEARCH_AGENT_MODEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RESEARCH_MODEL.to_string()),
            request_timeout_secs: timeout_secs(&lookup)?,
            report_dir: lookup("REPORT_DIR")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| ".".to_string()),
        };

        tracing::debug!("OpenAI Base URL: {}", config.openai_base_url);
        tracing::debug!("Research agent model: {}", config.model);
        tracing::debug!("Report directory: {}", config.report_dir);

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn base_url<F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup(key)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", key);
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn timeout_secs<F>(lookup: &F) -> anyhow::Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("LLM_TIMEOUT_SECS").filter(|s| !s.trim().is_empty()) {
        None => Ok(DEFAULT_TIMEOUT_SECS),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| anyhow::anyhow!("LLM_TIMEOUT_SECS must be a positive number of seconds")),
    }
}
