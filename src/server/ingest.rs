//! Page ingestion endpoint
//!
//! Accepts a URL or raw markup, runs the analyzer, and records the capture.
//! Capture persistence is best-effort: a store failure is logged and
//! reported via `meta.stored`, never turned into a failed ingestion.

use crate::analyzer::{AgentInsight, analyze_page};
use crate::fetch::fetch_page;
use crate::server::AppState;
use crate::server::error::ApiError;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Ingestion payload; unknown fields are rejected
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestRequest {
    /// URL to fetch and analyze
    #[serde(default)]
    pub url: Option<String>,

    /// Raw markup to analyze instead of fetching
    #[serde(default)]
    pub html: Option<String>,
}

/// Ingestion result
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// The derived insight
    pub insight: AgentInsight,

    /// Request bookkeeping
    pub meta: IngestMeta,
}

/// Bookkeeping returned alongside the insight
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestMeta {
    /// Byte length of the markup that was analyzed
    pub html_length: usize,

    /// Whether the capture was persisted
    pub stored: bool,
}

/// `POST /api/ingest`
#[instrument(skip(state, payload), fields(url = payload.url.as_deref().unwrap_or("-")))]
pub async fn ingest(
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let IngestRequest { url, html } = payload;

    let html = match html.filter(|html| !html.is_empty()) {
        Some(html) => html,
        None => {
            let url = url
                .as_deref()
                .ok_or_else(|| {
                    ApiError::BadRequest("Provide a url or page html to analyze.".to_string())
                })?;
            fetch_page(url)
                .await
                .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?
        }
    };

    let insight = analyze_page(&html, url.as_deref());

    let stored = match serde_json::to_string(&insight) {
        Ok(insight_json) => {
            match state
                .db
                .record_capture(url.as_deref(), &html, &insight_json)
                .await
            {
                Ok(_) => true,
                Err(e) => {
                    warn!("Failed to store page capture: {}", e);
                    false
                }
            }
        }
        Err(e) => {
            warn!("Failed to serialize insight for storage: {}", e);
            false
        }
    };

    Ok(Json(IngestResponse {
        insight,
        meta: IngestMeta {
            html_length: html.len(),
            stored,
        },
    }))
}
