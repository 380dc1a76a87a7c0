//! Axum route handlers for the Business Analytics view.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::analytics::metrics::{evaluate, BusinessMetricsInput, DerivedMetrics};
use crate::analytics::widgets::{build_dashboard, DashboardView};
use crate::errors::AppError;
use crate::generation::{dispatch, GeneratedText, GenerationRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: DerivedMetrics,
    pub dashboard: DashboardView,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub metrics: DerivedMetrics,
    pub dashboard: DashboardView,
    pub insights: GeneratedText,
}

/// POST /api/v1/analytics/metrics
///
/// Evaluates the derived metrics and dashboard widgets. No completion call.
pub async fn handle_metrics(
    Json(input): Json<BusinessMetricsInput>,
) -> Result<Json<MetricsResponse>, AppError> {
    let metrics = evaluate(&input)?;
    Ok(Json(MetricsResponse {
        dashboard: build_dashboard(&metrics),
        metrics,
    }))
}

/// POST /api/v1/analytics/insights
///
/// Evaluates metrics, then asks the completion service for strategic insights.
/// Fails as a whole if either step fails.
pub async fn handle_insights(
    State(state): State<AppState>,
    Json(input): Json<BusinessMetricsInput>,
) -> Result<Json<InsightsResponse>, AppError> {
    let metrics = evaluate(&input)?;
    info!(
        "Generating insights for {} business",
        input.business_type.label()
    );

    let request = GenerationRequest::BusinessInsights {
        metrics,
        business_type: input.business_type,
    };
    let insights = dispatch(state.completer.as_ref(), &request).await?;

    Ok(Json(InsightsResponse {
        dashboard: build_dashboard(&metrics),
        metrics,
        insights,
    }))
}
