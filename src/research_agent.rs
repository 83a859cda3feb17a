//! Three-role market research pipeline.
//!
//! An analyst, a process specialist and an ROI analyst run one after another,
//! each seeing the earlier outputs. Their prose findings are kept alongside the
//! report, but the numbers in the report always come from the rule-based
//! estimator so the result is reproducible whatever the model says.

use crate::errors::{AppError, ResultExt};
use crate::estimator::estimate_opportunity;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::models::OpportunityReport;
use serde::Serialize;

const TASK_MAX_TOKENS: u32 = 1500;
const TASK_TEMPERATURE: f32 = 0.3;

/// Persona one pipeline step runs under.
#[derive(Debug, Clone, Copy)]
pub struct AgentRole {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentRole {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a {}.\nYour goal: {}\n\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

pub const MARKET_ANALYST: AgentRole = AgentRole {
    role: "Senior Market Research Analyst",
    goal: "Analyze business operations and identify AI automation opportunities",
    backstory: "You are an expert business analyst with 15+ years experience in operational \
                efficiency and technology implementations. You specialize in identifying \
                high-impact automation opportunities and quantifying business value.",
};

pub const PROCESS_SPECIALIST: AgentRole = AgentRole {
    role: "Business Process Optimization Specialist",
    goal: "Evaluate current processes and design automation solutions",
    backstory: "You are a certified Six Sigma Black Belt with extensive experience in process \
                improvement and automation. You can quickly identify bottlenecks, \
                inefficiencies, and automation opportunities in any business process.",
};

pub const ROI_ANALYST: AgentRole = AgentRole {
    role: "Financial ROI Analyst",
    goal: "Calculate accurate ROI projections and business impact",
    backstory: "You are a financial analyst specializing in technology ROI calculations. You \
                have deep experience in cost-benefit analysis, payback period calculations, and \
                business case development for automation projects.",
};

fn research_task(description: &str) -> String {
    format!(
        "Analyze this business and identify automation opportunities:\n\n\
         Business Description: {}\n\n\
         Your analysis should include:\n\
         1. Business classification (industry, size, revenue estimate)\n\
         2. Identification of 3-5 most time-consuming manual processes\n\
         3. Assessment of current operational costs and inefficiencies\n\
         4. Preliminary automation opportunity assessment\n\n\
         Focus on quantifiable, high-impact areas where AI agents could provide immediate value.\n\
         Be specific about time spent on each process and current business impact.",
        description
    )
}

const PROCESS_TASK: &str = "Based on the business analysis, perform detailed process evaluation:\n\n\
For each identified process, analyze:\n\
1. Current time investment (hours/week, cost/year)\n\
2. Complexity level (1-5 scale)\n\
3. Automation potential (High/Medium/Low)\n\
4. Specific AI solutions that could address this process\n\
5. Implementation complexity and timeline\n\n\
Prioritize processes by ROI potential and implementation feasibility.";

const ROI_TASK: &str = "Calculate comprehensive ROI analysis for the identified opportunities:\n\n\
For the top 3 processes, calculate:\n\
1. Current annual cost (time * hourly rate + opportunity cost)\n\
2. Potential automation savings (% reduction in time/cost)\n\
3. Implementation investment required\n\
4. Payback period and 3-year ROI\n\
5. Risk factors and mitigation strategies\n\n\
Provide conservative, realistic, and optimistic scenarios.\n\
Include specific dollar amounts and percentages.";

/// Prose output of each pipeline step, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFindings {
    pub business_analysis: String,
    pub process_analysis: String,
    pub roi_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineStatus {
    Completed { findings: AgentFindings },
    Failed { reason: String },
}

/// Report plus agent findings; saved to disk as one JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutcome {
    #[serde(flatten)]
    pub report: OpportunityReport,
    pub pipeline: PipelineStatus,
}

/// Runs the research pipeline and the estimator for a business description.
pub struct MarketResearchAgent {
    generator: Box<dyn TextGenerator>,
}

impl MarketResearchAgent {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn run_task(
        &self,
        role: &AgentRole,
        task: &str,
        context: &[&str],
    ) -> Result<String, AppError> {
        let mut prompt = task.to_string();
        if !context.is_empty() {
            prompt.push_str("\n\nContext from previous analysis:\n");
            for previous in context {
                prompt.push_str("\n---\n");
                prompt.push_str(previous);
            }
        }

        tracing::debug!("Running research task as {}", role.role);
        let request = GenerationRequest::new(prompt, TASK_MAX_TOKENS, TASK_TEMPERATURE)
            .with_system(role.system_prompt());
        let output = self
            .generator
            .generate(&request)
            .await
            .with_context(|| format!("{} task failed", role.role))?;
        Ok(output.trim().to_string())
    }

    /// Runs the three steps in order; the first failure stops the pipeline.
    pub async fn run_pipeline(&self, description: &str) -> Result<AgentFindings, AppError> {
        let business_analysis = self
            .run_task(&MARKET_ANALYST, &research_task(description), &[])
            .await?;
        let process_analysis = self
            .run_task(&PROCESS_SPECIALIST, PROCESS_TASK, &[business_analysis.as_str()])
            .await?;
        let roi_analysis = self
            .run_task(
                &ROI_ANALYST,
                ROI_TASK,
                &[business_analysis.as_str(), process_analysis.as_str()],
            )
            .await?;

        Ok(AgentFindings {
            business_analysis,
            process_analysis,
            roi_analysis,
        })
    }

    /// Analyzes a business description.
    ///
    /// Pipeline failures are recorded in [`ResearchOutcome::pipeline`] and never
    /// prevent the report. Only an empty description is an error.
    pub async fn analyze_business(&self, description: &str) -> Result<ResearchOutcome, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::InvalidInput(
                "Business description is empty".to_string(),
            ));
        }

        tracing::info!(
            "Starting market research analysis with {}",
            self.generator.name()
        );

        let pipeline = match self.run_pipeline(description).await {
            Ok(findings) => {
                tracing::info!("Research pipeline completed");
                PipelineStatus::Completed { findings }
            }
            Err(e) => {
                tracing::warn!("Research pipeline failed, using rule-based estimate: {}", e);
                PipelineStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let report = estimate_opportunity(description);
        tracing::info!(
            "Opportunity report ready: industry={}, roi={:.1}%",
            report.business_profile.industry,
            report.overall_roi
        );

        Ok(ResearchOutcome { report, pipeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_includes_persona() {
        let prompt = ROI_ANALYST.system_prompt();
        assert!(prompt.starts_with("You are a Financial ROI Analyst."));
        assert!(prompt.contains("payback period calculations"));
    }

    #[test]
    fn test_research_task_embeds_description() {
        let task = research_task("A small bakery");
        assert!(task.contains("Business Description: A small bakery"));
    }
}
