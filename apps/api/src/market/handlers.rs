//! Axum route handler for the Market Analysis view.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::{dispatch, GeneratedText, GenerationRequest};
use crate::market::prompts::{FocusArea, Industry, MarketPosition, RiskFactor, Timeframe};
use crate::state::AppState;

/// Body of `POST /api/v1/market/analysis`, discriminated by `analysis_type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum MarketAnalysisRequest {
    CompetitorAnalysis {
        industry: Industry,
        competitors: String,
        market_position: MarketPosition,
    },
    MarketTrends {
        industry: Industry,
        timeframe: Timeframe,
        #[serde(default)]
        focus_areas: Vec<FocusArea>,
    },
    SwotAnalysis {
        industry: Industry,
        #[serde(default)]
        strengths: String,
        #[serde(default)]
        weaknesses: String,
        #[serde(default)]
        opportunities: String,
        #[serde(default)]
        threats: String,
    },
    RiskAssessment {
        industry: Industry,
        #[serde(default)]
        risk_factors: Vec<RiskFactor>,
    },
}

impl From<MarketAnalysisRequest> for GenerationRequest {
    fn from(request: MarketAnalysisRequest) -> Self {
        match request {
            MarketAnalysisRequest::CompetitorAnalysis {
                industry,
                competitors,
                market_position,
            } => GenerationRequest::CompetitorAnalysis {
                competitors,
                market_position,
                industry,
            },
            MarketAnalysisRequest::MarketTrends {
                industry,
                timeframe,
                focus_areas,
            } => GenerationRequest::MarketTrends {
                industry,
                timeframe,
                focus_areas,
            },
            MarketAnalysisRequest::SwotAnalysis {
                industry,
                strengths,
                weaknesses,
                opportunities,
                threats,
            } => GenerationRequest::SwotAnalysis {
                strengths,
                weaknesses,
                opportunities,
                threats,
                industry,
            },
            MarketAnalysisRequest::RiskAssessment {
                industry,
                risk_factors,
            } => GenerationRequest::RiskAssessment {
                risk_factors,
                industry,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarketAnalysisResponse {
    pub analysis_type: &'static str,
    pub analysis: GeneratedText,
}

/// POST /api/v1/market/analysis
pub async fn handle_market_analysis(
    State(state): State<AppState>,
    Json(request): Json<MarketAnalysisRequest>,
) -> Result<Json<MarketAnalysisResponse>, AppError> {
    let generation = GenerationRequest::from(request);
    let analysis_type = generation.kind();
    info!("Running {analysis_type}");

    let analysis = dispatch(state.completer.as_ref(), &generation).await?;
    Ok(Json(MarketAnalysisResponse {
        analysis_type,
        analysis,
    }))
}
