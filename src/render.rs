//! Plain-text rendering of response packages and opportunity reports for the terminal.

use crate::models::{LeadRecord, OpportunityReport, ResponsePackage};
use crate::research_agent::{AgentFindings, PipelineStatus, ResearchOutcome};

pub use crate::formatting::format_currency;

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Boxed section header used by both CLIs.
pub fn header(text: &str) -> String {
    format!("\n{rule}\n  {text}\n{rule}\n", rule = rule(), text = text)
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

/// Short summary of a lead printed before it is processed.
pub fn render_lead_summary(index: usize, lead: &LeadRecord) -> String {
    let company = lead.company_name.as_deref().unwrap_or("Unknown");
    let mut out = header(&format!(
        "TEST LEAD #{}: {} - {}",
        index, lead.sender_name, company
    ));
    out.push_str(&format!("Message: {}\n", lead.message));
    out.push_str(&format!("Temperature: {}\n", lead.familiarity));
    out.push_str(&format!("Source: {}\n", lead.source));
    out
}

pub fn render_response_package(package: &ResponsePackage) -> String {
    let mut out = header("GENERATED RESPONSE");
    out.push_str(&package.reply);
    out.push('\n');

    out.push_str(&header("NEXT ACTION RECOMMENDATION"));
    out.push_str(&format!("Action: {}\n", package.recommendation.action.label()));
    out.push_str(&format!("Details: {}\n", package.recommendation.detail));
    out.push_str(&format!("\nReasoning: {}\n", package.recommendation.rationale));

    out.push_str(&header("METADATA"));
    out.push_str(&format!(
        "Intent: {}\nQualified: {}\n",
        package.assessment.intent, package.assessment.is_qualified
    ));
    if package.assessment_fallback {
        out.push_str("Note: classifier output was unreadable, default assessment used\n");
    }
    out.push_str(&format!(
        "Generated: {}\n",
        package.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Confidence: {:.0}%\n",
        package.confidence * 100.0
    ));
    out
}

pub fn render_report(report: &OpportunityReport) -> String {
    let profile = &report.business_profile;
    let mut lines = vec![String::new(), rule(), "BUSINESS ANALYSIS REPORT".to_string(), rule()];

    section(&mut lines, "BUSINESS PROFILE");
    lines.push(format!("Industry: {}", profile.industry));
    lines.push(format!("Size: {}", profile.size));
    lines.push(format!("Revenue Range: {}", profile.revenue_range));

    section(&mut lines, "AUTOMATION OPPORTUNITIES");
    for (i, process) in report.process_estimates.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {}", i + 1, process.name));
        lines.push(format!(
            "   * Time Investment: {:.0}% of operations",
            process.time_percentage
        ));
        lines.push(format!(
            "   * Current Annual Cost: {}",
            format_currency(process.current_cost_annual)
        ));
        lines.push(format!(
            "   * Potential Savings: {}",
            format_currency(process.potential_savings)
        ));
        lines.push(format!(
            "   * Automation Potential: {}",
            process.automation_potential
        ));
        lines.push(format!("   * ROI: {:.0}%", process.roi_percentage));
    }

    section(&mut lines, "FINANCIAL IMPACT SUMMARY");
    lines.push(format!(
        "Total Current Annual Cost: {}",
        format_currency(report.total_current_cost())
    ));
    lines.push(format!(
        "Projected Annual Savings: {}",
        format_currency(report.total_savings())
    ));
    lines.push(format!("Overall ROI: {:.0}%", report.overall_roi));
    lines.push(format!("Payback Period: {} months", report.payback_months));

    let solution = &report.recommended_solution;
    section(&mut lines, "RECOMMENDED SOLUTION");
    lines.push(format!("Approach: {}", solution.approach));
    lines.push(format!("Components: {}", solution.components.join(", ")));
    lines.push(format!("Timeline: {}", solution.timeline));
    lines.push(format!("Investment Range: {}", report.investment_range));

    section(&mut lines, "IMPLEMENTATION ROADMAP");
    lines.extend(report.implementation_roadmap.iter().map(|s| format!("   * {}", s)));

    section(&mut lines, "RECOMMENDED NEXT STEPS");
    lines.extend(report.next_steps.iter().map(|s| format!("   * {}", s)));

    lines.push(String::new());
    lines.push(rule());
    lines.push(format!(
        "Report Generated: {}",
        report.generated_at.format("%B %d, %Y at %I:%M %p")
    ));
    lines.push(rule());

    lines.join("\n")
}

/// Prose written by the three research roles.
pub fn render_findings(findings: &AgentFindings) -> String {
    let mut lines = vec![String::new(), rule(), "AI AGENT FINDINGS".to_string(), rule()];

    for (title, text) in [
        ("BUSINESS ANALYSIS", &findings.business_analysis),
        ("PROCESS ANALYSIS", &findings.process_analysis),
        ("ROI ANALYSIS", &findings.roi_analysis),
    ] {
        section(&mut lines, title);
        lines.push(text.clone());
    }

    lines.join("\n")
}

/// Agent findings when the pipeline completed, otherwise a note, then the report.
pub fn render_outcome(outcome: &ResearchOutcome) -> String {
    let mut out = match &outcome.pipeline {
        PipelineStatus::Completed { findings } => render_findings(findings),
        PipelineStatus::Failed { reason } => format!(
            "\nAI analysis unavailable ({}), using rule-based estimate.",
            reason
        ),
    };
    out.push('\n');
    out.push_str(&render_report(&outcome.report));
    out
}
