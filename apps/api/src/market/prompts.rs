// Prompt templates and form enums for the Market Analysis view.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{fill_template, numbered_sections};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Retail,
    Manufacturing,
    Other,
}

impl Industry {
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Retail => "Retail",
            Industry::Manufacturing => "Manufacturing",
            Industry::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPosition {
    #[serde(rename = "Market Leader")]
    MarketLeader,
    #[serde(rename = "Strong Competitor")]
    StrongCompetitor,
    #[serde(rename = "Growing Player")]
    GrowingPlayer,
    #[serde(rename = "New Entrant")]
    NewEntrant,
}

impl MarketPosition {
    pub fn label(&self) -> &'static str {
        match self {
            MarketPosition::MarketLeader => "Market Leader",
            MarketPosition::StrongCompetitor => "Strong Competitor",
            MarketPosition::GrowingPlayer => "Growing Player",
            MarketPosition::NewEntrant => "New Entrant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl Timeframe {
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::ShortTerm => "Short-term",
            Timeframe::MediumTerm => "Medium-term",
            Timeframe::LongTerm => "Long-term",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    #[serde(rename = "Consumer Behavior")]
    ConsumerBehavior,
    #[serde(rename = "Technology Trends")]
    TechnologyTrends,
    #[serde(rename = "Economic Factors")]
    EconomicFactors,
    #[serde(rename = "Regulatory Changes")]
    RegulatoryChanges,
    #[serde(rename = "Market Size")]
    MarketSize,
    #[serde(rename = "Growth Potential")]
    GrowthPotential,
}

impl FocusArea {
    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::ConsumerBehavior => "Consumer Behavior",
            FocusArea::TechnologyTrends => "Technology Trends",
            FocusArea::EconomicFactors => "Economic Factors",
            FocusArea::RegulatoryChanges => "Regulatory Changes",
            FocusArea::MarketSize => "Market Size",
            FocusArea::GrowthPotential => "Growth Potential",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    #[serde(rename = "Market Risk")]
    MarketRisk,
    #[serde(rename = "Financial Risk")]
    FinancialRisk,
    #[serde(rename = "Operational Risk")]
    OperationalRisk,
    #[serde(rename = "Strategic Risk")]
    StrategicRisk,
    #[serde(rename = "Compliance Risk")]
    ComplianceRisk,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::MarketRisk => "Market Risk",
            RiskFactor::FinancialRisk => "Financial Risk",
            RiskFactor::OperationalRisk => "Operational Risk",
            RiskFactor::StrategicRisk => "Strategic Risk",
            RiskFactor::ComplianceRisk => "Compliance Risk",
        }
    }
}

fn join_labels<T>(items: &[T], label: impl Fn(&T) -> &'static str) -> String {
    items.iter().map(label).collect::<Vec<_>>().join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Competitor analysis
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {market_position}, {industry}, {competitors}, {sections}
pub const COMPETITOR_PROMPT_TEMPLATE: &str = r#"Analyze the competitive landscape for a {market_position} in the {industry} industry.

Competitors:
{competitors}

Please provide:
{sections}"#;

pub const COMPETITOR_SECTIONS: [&str; 4] = [
    "Detailed competitor analysis",
    "Market positioning strategy",
    "Competitive advantages and disadvantages",
    "Recommendations for market positioning",
];

pub fn build_competitor_prompt(
    competitors: &str,
    market_position: MarketPosition,
    industry: Industry,
) -> String {
    let sections = numbered_sections(&COMPETITOR_SECTIONS);
    fill_template(
        COMPETITOR_PROMPT_TEMPLATE,
        &[
            ("market_position", market_position.label()),
            ("industry", industry.label()),
            ("competitors", competitors),
            ("sections", &sections),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Market trends
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {industry}, {timeframe}, {focus_areas}, {sections}
pub const MARKET_TRENDS_PROMPT_TEMPLATE: &str = r#"Analyze market trends for the {industry} industry over a {timeframe} period.

Focus Areas:
{focus_areas}

Please provide:
{sections}"#;

pub const MARKET_TRENDS_SECTIONS: [&str; 4] = [
    "Current market trends",
    "Future projections",
    "Impact analysis",
    "Strategic recommendations",
];

pub fn build_market_trends_prompt(
    industry: Industry,
    timeframe: Timeframe,
    focus_areas: &[FocusArea],
) -> String {
    let focus = join_labels(focus_areas, FocusArea::label);
    let sections = numbered_sections(&MARKET_TRENDS_SECTIONS);
    fill_template(
        MARKET_TRENDS_PROMPT_TEMPLATE,
        &[
            ("industry", industry.label()),
            ("timeframe", timeframe.label()),
            ("focus_areas", &focus),
            ("sections", &sections),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// SWOT
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {industry}, {strengths}, {weaknesses}, {opportunities}, {threats}, {sections}
pub const SWOT_PROMPT_TEMPLATE: &str = r#"Perform a SWOT analysis for a company in the {industry} industry.

Strengths:
{strengths}

Weaknesses:
{weaknesses}

Opportunities:
{opportunities}

Threats:
{threats}

Please provide:
{sections}"#;

pub const SWOT_SECTIONS: [&str; 3] = [
    "Detailed SWOT analysis",
    "Strategic implications",
    "Recommended actions",
];

pub struct SwotInputs<'a> {
    pub strengths: &'a str,
    pub weaknesses: &'a str,
    pub opportunities: &'a str,
    pub threats: &'a str,
}

pub fn build_swot_prompt(inputs: &SwotInputs<'_>, industry: Industry) -> String {
    let sections = numbered_sections(&SWOT_SECTIONS);
    fill_template(
        SWOT_PROMPT_TEMPLATE,
        &[
            ("industry", industry.label()),
            ("strengths", inputs.strengths),
            ("weaknesses", inputs.weaknesses),
            ("opportunities", inputs.opportunities),
            ("threats", inputs.threats),
            ("sections", &sections),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Risk assessment
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {industry}, {risk_factors}, {sections}
pub const RISK_PROMPT_TEMPLATE: &str = r#"Assess risks for a company in the {industry} industry.

Risk Factors:
{risk_factors}

Please provide:
{sections}"#;

pub const RISK_SECTIONS: [&str; 4] = [
    "Risk analysis for each factor",
    "Risk mitigation strategies",
    "Monitoring recommendations",
    "Contingency planning",
];

pub fn build_risk_prompt(risk_factors: &[RiskFactor], industry: Industry) -> String {
    let factors = join_labels(risk_factors, RiskFactor::label);
    let sections = numbered_sections(&RISK_SECTIONS);
    fill_template(
        RISK_PROMPT_TEMPLATE,
        &[
            ("industry", industry.label()),
            ("risk_factors", &factors),
            ("sections", &sections),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_prompt_embeds_list_verbatim() {
        let competitors = "Acme Corp\nGlobex {industry}";
        let prompt =
            build_competitor_prompt(competitors, MarketPosition::NewEntrant, Industry::Finance);
        assert!(prompt.contains("for a New Entrant in the Finance industry"));
        assert!(prompt.contains(competitors));
        assert!(prompt.contains("4. Recommendations for market positioning"));
    }

    #[test]
    fn test_market_trends_joins_focus_areas() {
        let prompt = build_market_trends_prompt(
            Industry::Healthcare,
            Timeframe::LongTerm,
            &[FocusArea::MarketSize, FocusArea::RegulatoryChanges],
        );
        assert!(prompt.contains("over a Long-term period"));
        assert!(prompt.contains("Market Size, Regulatory Changes"));
    }

    #[test]
    fn test_swot_prompt_keeps_each_list() {
        let inputs = SwotInputs {
            strengths: "Brand",
            weaknesses: "Cash",
            opportunities: "Exports",
            threats: "Tariffs",
        };
        let prompt = build_swot_prompt(&inputs, Industry::Retail);
        for value in ["Brand", "Cash", "Exports", "Tariffs", "Retail industry"] {
            assert!(prompt.contains(value), "missing {value}");
        }
        assert!(prompt.ends_with("3. Recommended actions"));
    }

    #[test]
    fn test_risk_prompt_with_no_factors() {
        let prompt = build_risk_prompt(&[], Industry::Other);
        assert!(prompt.contains("Risk Factors:\n\n"));
    }

    #[test]
    fn test_enum_labels_round_trip_through_serde() {
        let parsed: Timeframe = serde_json::from_str("\"Medium-term\"").unwrap();
        assert_eq!(parsed.label(), "Medium-term");
        let parsed: RiskFactor = serde_json::from_str("\"Compliance Risk\"").unwrap();
        assert_eq!(parsed.label(), "Compliance Risk");
    }
}
