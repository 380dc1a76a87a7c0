//! Axum route handlers for the Contract Generator view.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::contracts::prompts::ContractDetails;
use crate::errors::AppError;
use crate::generation::{dispatch, GeneratedText, GenerationRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateContractResponse {
    pub contract_type: &'static str,
    pub contract: GeneratedText,
}

/// POST /api/v1/contracts/generate
///
/// Body: `{"contract_type": "service_agreement", "service_type": ..., ...}`.
/// The returned text is shown as-is and can be sent to `/api/v1/export/*`.
pub async fn handle_generate_contract(
    State(state): State<AppState>,
    Json(details): Json<ContractDetails>,
) -> Result<Json<GenerateContractResponse>, AppError> {
    let contract_type = details.label();
    info!("Generating {contract_type} contract");

    let generation = GenerationRequest::ContractGeneration { details };
    let contract = dispatch(state.completer.as_ref(), &generation).await?;

    Ok(Json(GenerateContractResponse {
        contract_type,
        contract,
    }))
}
