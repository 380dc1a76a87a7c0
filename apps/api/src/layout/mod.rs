// Document layout: text measurement, greedy pagination, PDF serialization.
// Pagination and rendering are CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod paginator;
pub mod pdf;

pub use font_metrics::{Helvetica, PageGeometry};
pub use paginator::paginate;

use crate::errors::AppError;

/// Paginates `content` with Helvetica at the geometry's font size and renders it to PDF bytes.
pub async fn export_pdf(content: String, geometry: PageGeometry) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || {
        let metrics = Helvetica::new(geometry.font_size);
        let doc = paginate(&content, &geometry, &metrics);
        tracing::debug!(
            "Paginated {} chars into {} line(s) on {} page(s)",
            content.len(),
            doc.lines().count(),
            doc.page_count()
        );
        pdf::render_pdf(&doc)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;
    Ok(bytes)
}
