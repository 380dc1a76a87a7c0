//! Generation requests: the tagged union of every prompt kind the dashboard sends.
//!
//! Flow: handler builds a `GenerationRequest` → `build_prompt()` (pure) →
//!       `params()` (fixed per kind) → `dispatch()` hands both to the injected
//!       `Completer`. Prompt builders never call the completion service.
//!
//! User text is embedded into prompts verbatim; nothing is escaped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analytics::metrics::{BusinessCategory, DerivedMetrics};
use crate::analytics::prompts::build_business_insights_prompt;
use crate::contracts::prompts::{build_contract_prompt, ContractDetails};
use crate::documents::prompts::{build_document_prompt, ProcessType};
use crate::llm_client::{Completer, CompletionError, GenerationParams, DEFAULT_MAX_TOKENS};
use crate::market::prompts::{
    build_competitor_prompt, build_market_trends_prompt, build_risk_prompt, build_swot_prompt,
    FocusArea, Industry, MarketPosition, RiskFactor, SwotInputs, Timeframe,
};

/// Contracts run longer than analyses.
const CONTRACT_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    BusinessInsights {
        metrics: DerivedMetrics,
        business_type: BusinessCategory,
    },
    DocumentProcessing {
        text_content: String,
        process_type: ProcessType,
    },
    ContractGeneration {
        details: ContractDetails,
    },
    CompetitorAnalysis {
        competitors: String,
        market_position: MarketPosition,
        industry: Industry,
    },
    MarketTrends {
        industry: Industry,
        timeframe: Timeframe,
        focus_areas: Vec<FocusArea>,
    },
    SwotAnalysis {
        strengths: String,
        weaknesses: String,
        opportunities: String,
        threats: String,
        industry: Industry,
    },
    RiskAssessment {
        risk_factors: Vec<RiskFactor>,
        industry: Industry,
    },
}

/// Text returned by the completion service, displayed as-is.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedText {
    pub kind: &'static str,
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::BusinessInsights { .. } => "business_insights",
            GenerationRequest::DocumentProcessing { .. } => "document_processing",
            GenerationRequest::ContractGeneration { .. } => "contract_generation",
            GenerationRequest::CompetitorAnalysis { .. } => "competitor_analysis",
            GenerationRequest::MarketTrends { .. } => "market_trends",
            GenerationRequest::SwotAnalysis { .. } => "swot_analysis",
            GenerationRequest::RiskAssessment { .. } => "risk_assessment",
        }
    }

    pub fn build_prompt(&self) -> String {
        match self {
            GenerationRequest::BusinessInsights {
                metrics,
                business_type,
            } => build_business_insights_prompt(metrics, *business_type),
            GenerationRequest::DocumentProcessing {
                text_content,
                process_type,
            } => build_document_prompt(text_content, *process_type),
            GenerationRequest::ContractGeneration { details } => build_contract_prompt(details),
            GenerationRequest::CompetitorAnalysis {
                competitors,
                market_position,
                industry,
            } => build_competitor_prompt(competitors, *market_position, *industry),
            GenerationRequest::MarketTrends {
                industry,
                timeframe,
                focus_areas,
            } => build_market_trends_prompt(*industry, *timeframe, focus_areas),
            GenerationRequest::SwotAnalysis {
                strengths,
                weaknesses,
                opportunities,
                threats,
                industry,
            } => build_swot_prompt(
                &SwotInputs {
                    strengths,
                    weaknesses,
                    opportunities,
                    threats,
                },
                *industry,
            ),
            GenerationRequest::RiskAssessment {
                risk_factors,
                industry,
            } => build_risk_prompt(risk_factors, *industry),
        }
    }

    pub fn params(&self) -> GenerationParams {
        match self {
            GenerationRequest::ContractGeneration { .. } => {
                GenerationParams::with_max_tokens(CONTRACT_MAX_TOKENS)
            }
            _ => GenerationParams::with_max_tokens(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Builds the prompt for `request` and sends it through `completer` once.
pub async fn dispatch(
    completer: &dyn Completer,
    request: &GenerationRequest,
) -> Result<GeneratedText, CompletionError> {
    let prompt = request.build_prompt();
    let params = request.params();
    info!(
        "Dispatching {} prompt ({} chars, max_tokens={})",
        request.kind(),
        prompt.len(),
        params.max_tokens
    );

    let content = completer.complete(&prompt, &params).await?;

    Ok(GeneratedText {
        kind: request.kind(),
        content,
        generated_at: Utc::now(),
    })
}
