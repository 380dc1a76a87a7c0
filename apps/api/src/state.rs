use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageGeometry;
use crate::llm_client::Completer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing in here is mutated after startup; every request builds its own
/// prompts and documents from its inputs.
#[derive(Clone)]
pub struct AppState {
    /// The single completion client, built once in `main`. Tests swap in a stub.
    pub completer: Arc<dyn Completer>,
    pub config: Config,
    /// Page geometry used for PDF export. Defaults to US letter, 50pt margins.
    pub page_geometry: PageGeometry,
}
