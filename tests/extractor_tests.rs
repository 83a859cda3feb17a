/// Extraction heuristics over realistic business descriptions
use rust_sales_agents::extractor::{
    estimate_business_size, estimate_revenue_bracket, extract_implementation_cost,
    extract_industry, extract_revenue_amount, find_revenue_figure, RevenueUnit,
};
use rust_sales_agents::models::Industry;

#[test]
fn test_industry_table_covers_every_industry() {
    let cases = [
        ("Community credit union serving farmers", Industry::Banking),
        ("Boutique law firm, 6 attorneys", Industry::Legal),
        ("Independent management consultants", Industry::Consulting),
        ("We manage rental properties downtown", Industry::RealEstate),
        ("Two hospitals and a network of clinics", Industry::Healthcare),
        ("Contract manufacturing of plastic parts", Industry::Manufacturing),
        ("Social media advertising agency", Industry::Marketing),
        ("Bookkeeping and payroll for restaurants", Industry::Accounting),
        ("Regional insurance broker handling claims", Industry::Insurance),
        ("Three retail stores selling shoes", Industry::Retail),
        ("B2B SaaS for warehouses", Industry::Technology),
        ("Private school with 400 students", Industry::Education),
        ("Family-owned landscaping company", Industry::ProfessionalServices),
    ];

    for (description, expected) in cases {
        assert_eq!(extract_industry(description), expected, "{}", description);
    }
}

#[test]
fn test_no_industry_keyword_defaults_to_professional_services() {
    let description = "An enterprise with $4.39 billion in annual revenue";
    assert_eq!(
        extract_industry(description),
        Industry::ProfessionalServices
    );
    assert_eq!(
        estimate_business_size(description),
        "Large Enterprise (1000+ employees)"
    );
}

#[test]
fn test_industry_keywords_match_word_prefixes() {
    let cases = [
        ("We are a technology company", Industry::Technology),
        ("A regional retailer of shoes", Industry::Retail),
        ("Investment banker boutique", Industry::Banking),
        ("Educational services provider", Industry::Education),
        ("Courthouse filing service", Industry::Legal),
    ];

    for (description, expected) in cases {
        assert_eq!(extract_industry(description), expected, "{}", description);
    }
}

#[test]
fn test_industry_keywords_start_at_a_word() {
    // "tax" inside "syntax" and "it" inside "with" do not count.
    assert_eq!(
        extract_industry("Syntax checking with care for homeowners"),
        Industry::ProfessionalServices
    );
    assert_eq!(extract_industry("Managed IT services"), Industry::Technology);
}

#[test]
fn test_industry_label_is_human_readable() {
    assert_eq!(extract_industry("real estate brokerage").label(), "Real Estate");
    assert_eq!(
        Industry::ProfessionalServices.to_string(),
        "Professional Services"
    );
}

#[test]
fn test_business_size_boundaries() {
    assert_eq!(
        estimate_business_size("10,000 employees"),
        "Large Enterprise (10,000 employees)"
    );
    assert_eq!(
        estimate_business_size("9999 employees"),
        "Mid-Large Enterprise (9,999 employees)"
    );
    assert_eq!(
        estimate_business_size("1000 staff"),
        "Mid-Large Enterprise (1,000 employees)"
    );
    assert_eq!(
        estimate_business_size("500 people"),
        "Mid-Market (500 employees)"
    );
    assert_eq!(
        estimate_business_size("100 employees"),
        "Small-Mid Market (100 employees)"
    );
    assert_eq!(
        estimate_business_size("99 employees"),
        "Small Business (99 employees)"
    );
}

#[test]
fn test_headcount_wins_over_keywords() {
    assert_eq!(
        estimate_business_size("Large firm with 40 employees"),
        "Small Business (40 employees)"
    );
}

#[test]
fn test_revenue_bracket_for_bank_assets() {
    assert_eq!(
        estimate_revenue_bracket("A bank with $4.39 billion in assets"),
        "$4.39B (Enterprise)"
    );
    assert_eq!(
        estimate_revenue_bracket("Revenue: $1,000,000,000"),
        "$1.0B (Enterprise)"
    );
    assert_eq!(
        estimate_revenue_bracket("Revenue: $25,000,000"),
        "$25M (Corporate)"
    );
    assert_eq!(
        estimate_revenue_bracket("$600 million"),
        "$600M+ (Large Corporate)"
    );
    assert_eq!(estimate_revenue_bracket("$45M"), "$45M (Mid-Market)");
}

#[test]
fn test_revenue_unit_is_bound_to_the_match() {
    // A stray "b" elsewhere in the text must not turn millions into billions.
    let figure = find_revenue_figure("About $40M revenue, based in Boston").unwrap();
    assert_eq!(figure.unit, RevenueUnit::Million);
    assert_eq!(figure.amount_usd, 40_000_000.0);
    assert_eq!(
        estimate_revenue_bracket("About $40M revenue, based in Boston"),
        "$40M (Mid-Market)"
    );
}

#[test]
fn test_revenue_bracket_is_stable_on_its_own_output() {
    for text in ["$4.39 billion", "$150 million", "$12B", "$750,000"] {
        let bracket = estimate_revenue_bracket(text);
        assert_eq!(estimate_revenue_bracket(&bracket), bracket, "{}", text);
    }
}

#[test]
fn test_revenue_amount() {
    assert_eq!(extract_revenue_amount("$3.5 billion"), 3_500_000_000.0);
    assert_eq!(extract_revenue_amount("$250,000 per year"), 250_000.0);
    assert_eq!(extract_revenue_amount("an enterprise"), 500_000_000.0);
}

#[test]
fn test_implementation_cost_formats() {
    assert_eq!(extract_implementation_cost("$1.5M - $2.5M"), 1_500_000.0);
    assert_eq!(extract_implementation_cost("$150,000 - $240,000"), 150_000.0);
    assert_eq!(extract_implementation_cost(""), 100_000.0);
}
