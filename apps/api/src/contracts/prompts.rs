// Prompt template and request types for the Contract Generator view.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{fill_template, numbered_sections};

/// Contract type plus the form fields that type collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contract_type", rename_all = "snake_case")]
pub enum ContractDetails {
    ServiceAgreement {
        service_type: String,
        payment_terms: String,
        duration: String,
        #[serde(default)]
        additional_requirements: String,
    },
    EmploymentContract,
    Nda,
    CustomContract {
        requirements: String,
    },
}

impl ContractDetails {
    pub fn label(&self) -> &'static str {
        match self {
            ContractDetails::ServiceAgreement { .. } => "Service Agreement",
            ContractDetails::EmploymentContract => "Employment Contract",
            ContractDetails::Nda => "NDA",
            ContractDetails::CustomContract { .. } => "Custom Contract",
        }
    }

    /// The requirement lines shown to the model, empty entries dropped.
    pub fn requirements_text(&self) -> String {
        let lines: Vec<String> = match self {
            ContractDetails::ServiceAgreement {
                service_type,
                payment_terms,
                duration,
                additional_requirements,
            } => vec![
                format!("Service Type: {service_type}"),
                format!("Payment Terms: {payment_terms}"),
                format!("Duration: {duration}"),
                format!("Additional Requirements: {additional_requirements}"),
            ],
            ContractDetails::CustomContract { requirements } => vec![requirements.clone()],
            ContractDetails::EmploymentContract | ContractDetails::Nda => Vec::new(),
        };
        lines
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub const CONTRACT_SECTIONS: [&str; 7] = [
    "Parties involved",
    "Terms and conditions",
    "Payment terms (if applicable)",
    "Duration",
    "Termination clauses",
    "Governing law",
    "Signature blocks",
];

/// Replace: {contract_type}, {requirements}, {sections}
pub const CONTRACT_PROMPT_TEMPLATE: &str = r#"Generate a professional {contract_type} contract with the following requirements:
{requirements}

Please include all standard legal sections including:
{sections}

Format in proper legal contract style with clear sections and numbering."#;

pub fn build_contract_prompt(details: &ContractDetails) -> String {
    let requirements = details.requirements_text();
    let sections = numbered_sections(&CONTRACT_SECTIONS);
    fill_template(
        CONTRACT_PROMPT_TEMPLATE,
        &[
            ("contract_type", details.label()),
            ("requirements", &requirements),
            ("sections", &sections),
        ],
    )
}
