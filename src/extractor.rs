//! Keyword and numeric-pattern heuristics over free-text business descriptions.
//!
//! Every function here is a pure function of its input string. Tables are
//! evaluated top-down and the first match wins; there is no scoring.

use crate::formatting::{format_amount, format_currency, group_thousands};
use crate::models::Industry;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered industry keyword table. Keywords match case-insensitively at the
/// start of a word, so "bank" also covers "banker" and "banks".
const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::Banking,
        &["bank", "financial services", "finance", "credit union", "lending"],
    ),
    (
        Industry::Legal,
        &["law", "legal", "attorney", "lawyer", "court", "litigation"],
    ),
    (
        Industry::Consulting,
        &["consultant", "consulting", "advisory", "strategy"],
    ),
    (
        Industry::RealEstate,
        &["real estate", "property", "properties", "realtor", "housing"],
    ),
    (
        Industry::Healthcare,
        &["medical", "healthcare", "clinic", "doctor", "patient", "hospital"],
    ),
    (
        Industry::Manufacturing,
        &["manufacturing", "production", "factory", "factories", "assembly"],
    ),
    (
        Industry::Marketing,
        &["marketing", "advertising", "digital", "social media"],
    ),
    (
        Industry::Accounting,
        &["accounting", "bookkeeping", "tax", "cpa"],
    ),
    (
        Industry::Insurance,
        &["insurance", "underwriting", "claims", "actuarial"],
    ),
    (
        Industry::Retail,
        &["retail", "store", "shopping", "merchandise"],
    ),
    (
        Industry::Technology,
        &["software", "tech", "development", "saas"],
    ),
    (
        Industry::Education,
        &["education", "school", "university", "universities", "training"],
    ),
];

fn keyword_regex(keywords: &[&str]) -> Regex {
    let alternatives = keywords
        .iter()
        .map(|kw| regex::escape(kw).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})", alternatives)).expect("keyword regex is valid")
}

static INDUSTRY_PATTERNS: LazyLock<Vec<(Industry, Regex)>> = LazyLock::new(|| {
    INDUSTRY_KEYWORDS
        .iter()
        .map(|(industry, keywords)| {
            let mut pattern = keyword_regex(keywords).as_str().to_string();
            // "it" as a pronoun is everywhere; only the upper-case acronym counts.
            if *industry == Industry::Technology {
                pattern.push_str(r"|(?-i:\bIT\b)");
            }
            let regex = Regex::new(&pattern).expect("industry regex is valid");
            (*industry, regex)
        })
        .collect()
});

static EMPLOYEE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d{1,6})\s*(?:employees|people|staff)")
        .expect("employee regex is valid")
});

static SOLO_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&["solo", "freelance", "independent"]));
static SMALL_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&["small", "startup"]));
static MID_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&["mid-size", "medium"]));
static LARGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&["large", "enterprise", "corporation"])
});

// Amount must not be glued to a preceding word ("B2B" is not two billion).
static BILLION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w.])\$?(\d+(?:\.\d+)?)\s*(?:billion|bn|b)\b")
        .expect("billion regex is valid")
});
static MILLION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w.])\$?(\d+(?:\.\d+)?)\s*(?:million|mm|m)\b")
        .expect("million regex is valid")
});
static DOLLAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+(?:\.\d{2})?)")
        .expect("dollar regex is valid")
});

static COST_MILLIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)M").expect("cost regex is valid"));
static COST_DOLLARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d{1,3}(?:,\d{3})*)").expect("cost regex is valid"));

/// Returns the first industry whose keywords appear in the text.
pub fn extract_industry(description: &str) -> Industry {
    INDUSTRY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(description))
        .map(|(industry, _)| *industry)
        .unwrap_or(Industry::ProfessionalServices)
}

/// Buckets an employee count into a named size bracket.
pub fn size_bracket_for_headcount(count: u64) -> String {
    let label = if count >= 10_000 {
        "Large Enterprise"
    } else if count >= 1_000 {
        "Mid-Large Enterprise"
    } else if count >= 500 {
        "Mid-Market"
    } else if count >= 100 {
        "Small-Mid Market"
    } else {
        "Small Business"
    };
    format!("{} ({} employees)", label, group_thousands(count))
}

/// Explicit "<n> employees/people/staff" first, then size keywords.
pub fn estimate_business_size(description: &str) -> String {
    let headcount = EMPLOYEE_RE
        .captures(description)
        .and_then(|caps| caps[1].replace(',', "").parse::<u64>().ok());

    if let Some(count) = headcount {
        return size_bracket_for_headcount(count);
    }

    if SOLO_RE.is_match(description) {
        "Solo/Freelance".to_string()
    } else if SMALL_RE.is_match(description) {
        "Small Business (2-50 employees)".to_string()
    } else if MID_RE.is_match(description) {
        "Mid-Market (51-500 employees)".to_string()
    } else if LARGE_RE.is_match(description) {
        "Large Enterprise (1000+ employees)".to_string()
    } else {
        "Small-Medium Business".to_string()
    }
}

/// Unit a revenue figure was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueUnit {
    Billion,
    Million,
    Dollars,
}

/// A revenue figure found in free text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueFigure {
    /// Number as written, before applying the unit.
    pub amount: f64,
    pub unit: RevenueUnit,
    /// Amount in dollars.
    pub amount_usd: f64,
}

/// Scans billion forms, then million forms, then `$` amounts; first hit wins.
pub fn find_revenue_figure(text: &str) -> Option<RevenueFigure> {
    let scans: [(&Regex, RevenueUnit, f64); 3] = [
        (&*BILLION_RE, RevenueUnit::Billion, 1_000_000_000.0),
        (&*MILLION_RE, RevenueUnit::Million, 1_000_000.0),
        (&*DOLLAR_RE, RevenueUnit::Dollars, 1.0),
    ];

    scans.into_iter().find_map(|(pattern, unit, multiplier)| {
        let caps = pattern.captures(text)?;
        let amount = caps[1].replace(',', "").parse::<f64>().ok()?;
        Some(RevenueFigure {
            amount,
            unit,
            amount_usd: amount * multiplier,
        })
    })
}

fn bracket_for_figure(figure: &RevenueFigure) -> String {
    let amount = figure.amount;
    match figure.unit {
        RevenueUnit::Billion => {
            if amount >= 10.0 {
                format!("${}B+ (Large Enterprise)", format_amount(amount))
            } else if amount >= 1.0 {
                format!("${}B (Enterprise)", format_amount(amount))
            } else {
                format!("${}M (Large Corporate)", format_amount(amount * 1000.0))
            }
        }
        RevenueUnit::Million => {
            let shown = format_amount(amount);
            if amount >= 500.0 {
                format!("${}M+ (Large Corporate)", shown)
            } else if amount >= 100.0 {
                format!("${}M (Mid-Large Market)", shown)
            } else if amount >= 10.0 {
                format!("${}M (Mid-Market)", shown)
            } else {
                format!("${}M (Small-Mid Market)", shown)
            }
        }
        RevenueUnit::Dollars => {
            if amount >= 1_000_000_000.0 {
                format!("${:.1}B (Enterprise)", amount / 1_000_000_000.0)
            } else if amount >= 1_000_000.0 {
                format!("${:.0}M (Corporate)", amount / 1_000_000.0)
            } else {
                format!("{} (Small Business)", format_currency(amount))
            }
        }
    }
}

/// Canonical revenue bracket label for a description.
pub fn estimate_revenue_bracket(description: &str) -> String {
    if let Some(figure) = find_revenue_figure(description) {
        return bracket_for_figure(&figure);
    }

    if SOLO_RE.is_match(description) {
        "$100K - $500K".to_string()
    } else if SMALL_RE.is_match(description) {
        "$500K - $10M".to_string()
    } else if LARGE_RE.is_match(description) {
        "$100M+".to_string()
    } else {
        "$1M - $50M".to_string()
    }
}

/// Annual revenue in dollars, with size-keyword defaults when no figure is stated.
pub fn extract_revenue_amount(description: &str) -> f64 {
    if let Some(figure) = find_revenue_figure(description) {
        return figure.amount_usd;
    }

    if LARGE_RE.is_match(description) {
        500_000_000.0
    } else if SMALL_RE.is_match(description) {
        2_000_000.0
    } else {
        10_000_000.0
    }
}

/// Reads the low bound out of an investment range string.
///
/// `"$45.0M - $75.0M"` gives 45,000,000; `"$25,000 - $40,000"` gives 25,000.
/// Anything unrecognised costs 100,000.
pub fn extract_implementation_cost(investment: &str) -> f64 {
    if let Some(caps) = COST_MILLIONS_RE.captures(investment) {
        if let Ok(millions) = caps[1].parse::<f64>() {
            return millions * 1_000_000.0;
        }
    }

    if let Some(caps) = COST_DOLLARS_RE.captures(investment) {
        if let Ok(dollars) = caps[1].replace(',', "").parse::<f64>() {
            return dollars;
        }
    }

    100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_first_match_wins() {
        // Banking precedes consulting in the table.
        assert_eq!(
            extract_industry("Strategy advisory for regional banks"),
            Industry::Banking
        );
        assert_eq!(
            extract_industry("We run three dental clinics"),
            Industry::Healthcare
        );
    }

    #[test]
    fn test_industry_ignores_embedded_words() {
        // "with" contains "it", "tax" sits inside "syntax".
        assert_eq!(
            extract_industry("A firm with syntax-heavy documents"),
            Industry::ProfessionalServices
        );
        assert_eq!(
            extract_industry("Our IT department is overloaded"),
            Industry::Technology
        );
        assert_eq!(
            extract_industry("it is hard to keep up"),
            Industry::ProfessionalServices
        );
    }

    #[test]
    fn test_headcount_brackets() {
        assert_eq!(
            estimate_business_size("We have 500 employees"),
            "Mid-Market (500 employees)"
        );
        assert_eq!(
            estimate_business_size("about 999 staff"),
            "Mid-Market (999 employees)"
        );
        assert_eq!(
            estimate_business_size("12,500 people worldwide"),
            "Large Enterprise (12,500 employees)"
        );
        assert_eq!(
            estimate_business_size("a team of 8 people"),
            "Small Business (8 employees)"
        );
    }

    #[test]
    fn test_size_keyword_fallback() {
        assert_eq!(estimate_business_size("Freelance designer"), "Solo/Freelance");
        assert_eq!(
            estimate_business_size("A small bakery"),
            "Small Business (2-50 employees)"
        );
        assert_eq!(
            estimate_business_size("mid-size logistics company"),
            "Mid-Market (51-500 employees)"
        );
        assert_eq!(
            estimate_business_size("global corporation"),
            "Large Enterprise (1000+ employees)"
        );
        assert_eq!(estimate_business_size("a bakery"), "Small-Medium Business");
    }

    #[test]
    fn test_revenue_figure_priority() {
        let figure = find_revenue_figure("$4.39 billion revenue, 300 million users").unwrap();
        assert_eq!(figure.unit, RevenueUnit::Billion);
        assert!((figure.amount_usd - 4_390_000_000.0).abs() < 1.0);

        let figure = find_revenue_figure("revenue of $1,000,000,000").unwrap();
        assert_eq!(figure.unit, RevenueUnit::Dollars);
        assert_eq!(figure.amount_usd, 1_000_000_000.0);

        assert!(find_revenue_figure("a B2B agency").is_none());
    }

    #[test]
    fn test_revenue_brackets() {
        assert_eq!(
            estimate_revenue_bracket("$4.39 billion in assets"),
            "$4.39B (Enterprise)"
        );
        assert_eq!(
            estimate_revenue_bracket("$12B revenue"),
            "$12B+ (Large Enterprise)"
        );
        assert_eq!(
            estimate_revenue_bracket("$0.5 billion"),
            "$500M (Large Corporate)"
        );
        assert_eq!(
            estimate_revenue_bracket("$150 million"),
            "$150M (Mid-Large Market)"
        );
        assert_eq!(estimate_revenue_bracket("$5M"), "$5M (Small-Mid Market)");
        assert_eq!(
            estimate_revenue_bracket("about $750,000 a year"),
            "$750,000 (Small Business)"
        );
        assert_eq!(estimate_revenue_bracket("a startup"), "$500K - $10M");
        assert_eq!(estimate_revenue_bracket("enterprise"), "$100M+");
        assert_eq!(estimate_revenue_bracket("a bakery"), "$1M - $50M");
    }

    #[test]
    fn test_revenue_amount_defaults() {
        assert_eq!(extract_revenue_amount("large enterprise"), 500_000_000.0);
        assert_eq!(extract_revenue_amount("small shop"), 2_000_000.0);
        assert_eq!(extract_revenue_amount("a bakery"), 10_000_000.0);
        assert_eq!(extract_revenue_amount("$2.5 million"), 2_500_000.0);
    }

    #[test]
    fn test_implementation_cost() {
        assert_eq!(extract_implementation_cost("$45.0M - $75.0M"), 45_000_000.0);
        assert_eq!(extract_implementation_cost("$25,000 - $40,000"), 25_000.0);
        assert_eq!(extract_implementation_cost("to be scoped"), 100_000.0);
    }
}
