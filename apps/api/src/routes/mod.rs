pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analytics, contracts, documents, export, market};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Business Analytics
        .route(
            "/api/v1/analytics/metrics",
            post(analytics::handlers::handle_metrics),
        )
        .route(
            "/api/v1/analytics/insights",
            post(analytics::handlers::handle_insights),
        )
        // Document Processing
        .route(
            "/api/v1/documents/extract",
            post(documents::handlers::handle_extract),
        )
        .route(
            "/api/v1/documents/process",
            post(documents::handlers::handle_process),
        )
        // Contract Generator
        .route(
            "/api/v1/contracts/generate",
            post(contracts::handlers::handle_generate_contract),
        )
        // Market Analysis
        .route(
            "/api/v1/market/analysis",
            post(market::handlers::handle_market_analysis),
        )
        // Export
        .route("/api/v1/export/pdf", post(export::handlers::handle_export_pdf))
        .route(
            "/api/v1/export/markdown",
            post(export::handlers::handle_export_markdown),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::testing::StubCompleter;
    use crate::layout::PageGeometry;
    use crate::llm_client::{Completer, GROQ_API_URL};

    const BOUNDARY: &str = "bisuite-test-boundary";

    fn test_config() -> Config {
        Config {
            completion_api_key: None,
            completion_api_url: GROQ_API_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn app_with(stub: Arc<StubCompleter>) -> Router {
        let completer: Arc<dyn Completer> = stub;
        build_router(AppState {
            completer,
            config: test_config(),
            page_geometry: PageGeometry::default(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_upload(uri: &str, filename: &str, contents: &str, process_type: Option<&str>) -> Request<Body> {
        let mut body = String::new();
        if let Some(label) = process_type {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"process_type\"\r\n\r\n{label}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{contents}\r\n--{BOUNDARY}--\r\n"
        ));
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn saas_metrics() -> Value {
        json!({
            "business_type": "SaaS",
            "current_revenue": 120000.0,
            "previous_revenue": 100000.0,
            "net_profit": 30000.0,
            "marketing_spend": 10000.0,
            "new_customers": 50.0,
            "average_order_value": 80.0,
            "purchase_frequency": 4.0,
            "customer_lifespan": 3.0,
            "total_investment": 20000.0,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "bisuite-api");
    }

    #[tokio::test]
    async fn test_metrics_returns_dashboard_without_completion() {
        let stub = Arc::new(StubCompleter::failing());
        let app = app_with(stub.clone());
        let response = app
            .oneshot(post_json("/api/v1/analytics/metrics", saas_metrics()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["metrics"]["revenue_growth"], 20.0);
        assert_eq!(body["metrics"]["customer_lifetime_value"], 960.0);
        assert_eq!(body["dashboard"]["cards"][0]["display"], "20.00%");
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_zero_previous_revenue_is_422() {
        let mut input = saas_metrics();
        input["previous_revenue"] = json!(0.0);
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_json("/api/v1/analytics/metrics", input))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COMPUTATION_ERROR");
    }

    #[tokio::test]
    async fn test_insights_calls_completer_once() {
        let stub = Arc::new(StubCompleter::replying("Grow the SaaS tier."));
        let app = app_with(stub.clone());
        let response = app
            .oneshot(post_json("/api/v1/analytics/insights", saas_metrics()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["insights"]["content"], "Grow the SaaS tier.");
        assert_eq!(body["insights"]["kind"], "business_insights");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("Revenue Growth: 20.00%"));
    }

    #[tokio::test]
    async fn test_insights_without_key_is_bad_gateway() {
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_json("/api/v1/analytics/insights", saas_metrics()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COMPLETION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_txt_upload() {
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_upload(
                "/api/v1/documents/extract",
                "notes.TXT",
                "Q3 revenue is up.",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["text"], "Q3 revenue is up.");
        assert_eq!(body["char_count"], 17);
    }

    #[tokio::test]
    async fn test_extract_unsupported_format_is_415() {
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_upload("/api/v1/documents/extract", "sheet.xls", "x", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_process_embeds_document_text() {
        let stub = Arc::new(StubCompleter::replying("- Revenue is up"));
        let app = app_with(stub.clone());
        let response = app
            .oneshot(post_upload(
                "/api/v1/documents/process",
                "notes.txt",
                "Q3 revenue is up.",
                Some("Key Points Extraction"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["process_type"], "Key Points Extraction");
        assert_eq!(body["result"]["content"], "- Revenue is up");
        assert!(stub.calls.lock().unwrap()[0].0.contains("Q3 revenue is up."));
    }

    #[tokio::test]
    async fn test_process_requires_process_type() {
        let app = app_with(Arc::new(StubCompleter::replying("unused")));
        let response = app
            .oneshot(post_upload(
                "/api/v1/documents/process",
                "notes.txt",
                "text",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_contract_uses_contract_budget() {
        let stub = Arc::new(StubCompleter::replying("SERVICE AGREEMENT"));
        let app = app_with(stub.clone());
        let response = app
            .oneshot(post_json(
                "/api/v1/contracts/generate",
                json!({
                    "contract_type": "service_agreement",
                    "service_type": "Consulting",
                    "payment_terms": "Net 30",
                    "duration": "12 months",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["contract_type"], "Service Agreement");
        assert_eq!(body["contract"]["content"], "SERVICE AGREEMENT");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls[0].1.max_tokens, 2000);
        assert!(calls[0].0.contains("Payment Terms: Net 30"));
    }

    #[tokio::test]
    async fn test_market_risk_assessment() {
        let stub = Arc::new(StubCompleter::replying("Risk matrix"));
        let app = app_with(stub.clone());
        let response = app
            .oneshot(post_json(
                "/api/v1/market/analysis",
                json!({
                    "analysis_type": "risk_assessment",
                    "industry": "Healthcare",
                    "risk_factors": ["Market Risk", "Compliance Risk"],
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis_type"], "risk_assessment");
        assert!(stub.calls.lock().unwrap()[0]
            .0
            .contains("Market Risk, Compliance Risk"));
    }

    #[tokio::test]
    async fn test_export_pdf_is_attachment() {
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_json(
                "/api/v1/export/pdf",
                json!({ "content": "NON-DISCLOSURE AGREEMENT\n\nParties", "file_stem": "nda" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"nda.pdf\""
        );
        let bytes = body_bytes(response).await;
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_export_markdown_returns_text_unchanged() {
        let content = "# Title\n\n* café item\n";
        let app = app_with(Arc::new(StubCompleter::failing()));
        let response = app
            .oneshot(post_json(
                "/api/v1/export/markdown",
                json!({ "content": content }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"document.md\""
        );
        assert_eq!(body_bytes(response).await, content.as_bytes());
    }
}
