// Prompt template for the Business Analytics view.

use crate::analytics::metrics::{BusinessCategory, DerivedMetrics};
use crate::llm_client::prompts::{fill_template, numbered_sections};

/// Replace: {business_type}, {revenue_growth}, {profit_margin}, {cac}, {clv}, {roi}, {sections}
pub const BUSINESS_INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze the following business metrics for a {business_type} business and provide strategic insights:

Metrics:
- Revenue Growth: {revenue_growth}%
- Profit Margin: {profit_margin}%
- Customer Acquisition Cost: ${cac}
- Customer Lifetime Value: ${clv}
- ROI: {roi}%

Please provide:
{sections}"#;

pub const BUSINESS_INSIGHTS_SECTIONS: [&str; 4] = [
    "Key insights and trends",
    "Specific recommendations for improvement",
    "Potential risks and opportunities",
    "Strategic action items",
];

pub fn build_business_insights_prompt(
    metrics: &DerivedMetrics,
    business_type: BusinessCategory,
) -> String {
    let revenue_growth = format!("{:.2}", metrics.revenue_growth);
    let profit_margin = format!("{:.2}", metrics.profit_margin);
    let cac = format!("{:.2}", metrics.customer_acquisition_cost);
    let clv = format!("{:.2}", metrics.customer_lifetime_value);
    let roi = format!("{:.2}", metrics.roi);
    let sections = numbered_sections(&BUSINESS_INSIGHTS_SECTIONS);

    fill_template(
        BUSINESS_INSIGHTS_PROMPT_TEMPLATE,
        &[
            ("business_type", business_type.label()),
            ("revenue_growth", &revenue_growth),
            ("profit_margin", &profit_margin),
            ("cac", &cac),
            ("clv", &clv),
            ("roi", &roi),
            ("sections", &sections),
        ],
    )
}
