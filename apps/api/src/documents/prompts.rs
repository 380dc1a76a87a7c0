// Prompt template for the Document Processing view.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::fill_template;

/// What to do with an uploaded document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessType {
    #[serde(rename = "Smart Summary")]
    SmartSummary,
    #[serde(rename = "Key Points Extraction")]
    KeyPointsExtraction,
    #[serde(rename = "Action Items")]
    ActionItems,
    #[serde(rename = "Full Analysis")]
    FullAnalysis,
}

impl ProcessType {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessType::SmartSummary => "Smart Summary",
            ProcessType::KeyPointsExtraction => "Key Points Extraction",
            ProcessType::ActionItems => "Action Items",
            ProcessType::FullAnalysis => "Full Analysis",
        }
    }

    /// Parses the label sent as a multipart text field.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            ProcessType::SmartSummary,
            ProcessType::KeyPointsExtraction,
            ProcessType::ActionItems,
            ProcessType::FullAnalysis,
        ]
        .into_iter()
        .find(|p| p.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Replace: {process_type}, {text_content}
pub const DOCUMENT_PROCESS_PROMPT_TEMPLATE: &str = r#"Process the following document content based on {process_type}:

{text_content}

Provide a detailed {process_type} focusing on the main points and key takeaways."#;

pub fn build_document_prompt(text_content: &str, process_type: ProcessType) -> String {
    fill_template(
        DOCUMENT_PROCESS_PROMPT_TEMPLATE,
        &[
            ("process_type", process_type.label()),
            ("text_content", text_content),
        ],
    )
}
