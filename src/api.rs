//! HTTP surface: `/health` and `/analyze` over a shared [`SentimentAnalyzer`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::aggregate::AnalysisSummary;
use crate::analyzer::{Analysis, SentimentAnalyzer};
use crate::classify::Label;
use crate::config::{validate_threshold, AnalyzerConfig, DEFAULT_MAX_TEXT_CHARS};
use crate::error::ConfigError;
use crate::scoring::{DocumentScore, ScoringMode, WordScore};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
    pub defaults: AnalyzerConfig,
    pub max_text_chars: usize,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer, defaults: AnalyzerConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            defaults,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }

    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.max_text_chars = max;
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeReq {
    pub text: String,
    #[serde(default)]
    pub confidence_threshold: Option<f64>,
    #[serde(default)]
    pub show_details: Option<bool>,
    #[serde(default)]
    pub scoring_mode: Option<ScoringMode>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResp {
    pub words: Vec<WordScore>,
    pub summary: AnalysisSummary,
    pub document: DocumentScore,
    pub confidence_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<WordScore>>,
}

#[derive(Debug)]
pub enum ApiError {
    Invalid(ConfigError),
    TooLarge { limit: usize },
    /// Body could not be decoded into [`AnalyzeReq`].
    Body(JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Invalid(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::TooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("text exceeds {limit} characters"),
            ),
            ApiError::Body(rej) => (rej.status(), rej.body_text()),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalyzeResp>, ApiError> {
    let Json(req) = payload.map_err(|rej| {
        counter!("sentiment_rejected_total").increment(1);
        ApiError::Body(rej)
    })?;
    let threshold = req
        .confidence_threshold
        .unwrap_or(state.defaults.confidence_threshold);
    let threshold = validate_threshold(threshold).map_err(|e| {
        counter!("sentiment_rejected_total").increment(1);
        ApiError::Invalid(e)
    })?;
    if req.text.chars().count() > state.max_text_chars {
        counter!("sentiment_rejected_total").increment(1);
        return Err(ApiError::TooLarge {
            limit: state.max_text_chars,
        });
    }
    let show_details = req.show_details.unwrap_or(state.defaults.show_details);
    let mode = req.scoring_mode.unwrap_or(state.analyzer.mode());

    let analysis = state.analyzer.analyze_with_mode(&req.text, mode);
    record_metrics(&analysis.summary);

    log_analysis(&req.text, &analysis);

    let details = (show_details && !analysis.summary.no_content)
        .then(|| analysis.details(threshold).into_iter().cloned().collect());

    Ok(Json(AnalyzeResp {
        words: analysis.words,
        summary: analysis.summary,
        document: analysis.document,
        confidence_threshold: threshold,
        details,
    }))
}

fn log_analysis(text: &str, analysis: &Analysis) {
    let id = anon_hash(text);
    if analysis.summary.no_content {
        debug!(%id, "no analyzable content");
    } else {
        // Never log raw text. Only hashed id + counts.
        info!(
            %id,
            tokens = analysis.summary.total,
            positive = analysis.summary.counts.positive,
            negative = analysis.summary.counts.negative,
            neutral = analysis.summary.counts.neutral,
            compound = analysis.document.compound,
            "analysis complete"
        );
    }
}

fn record_metrics(summary: &AnalysisSummary) {
    counter!("sentiment_requests_total").increment(1);
    counter!("sentiment_tokens_total").increment(summary.total as u64);
    histogram!("sentiment_request_tokens").record(summary.total as f64);
    for label in Label::ALL {
        let n = summary.count(label) as u64;
        if n > 0 {
            counter!("sentiment_words_total", "label" => label.as_str()).increment(n);
        }
    }
}

/// Short, stable, non-reversible id for log correlation.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
