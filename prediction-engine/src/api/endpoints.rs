use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tracing::{debug, instrument};

use crate::api::errors::PredictionError;
use crate::api::types::{
    ChatRequest, ChatResponse, HomeResponse, ModelStatusResponse, RankResponse, UploadRequest,
    UploadResponse,
};
use crate::category::Category;
use crate::chat::{
    classify_prompt, compose_reply, no_data_reply, EMPTY_PROMPT_REPLY, TOP_OFFER_NAME,
};
use crate::confidence::confidence_level;
use crate::metrics_consts::{CHAT_INTENT_COUNTER, PREDICTIONS_SERVED_COUNTER};
use crate::prediction::Prediction;
use crate::router::AppState;

pub async fn index() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Prediction Engine API is live".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        status: "working".to_owned(),
    })
}

pub async fn model_status(
    State(state): State<AppState>,
) -> Result<Json<ModelStatusResponse>, PredictionError> {
    Ok(Json(ModelStatusResponse {
        data_counts: state.store.counts()?,
    }))
}

/// An empty body behaves like `{}`, anything else must be valid JSON.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Result<Json<UploadResponse>, PredictionError> {
    let category: Category = segment.parse()?;

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        UploadRequest::default()
    } else {
        serde_json::from_slice::<UploadRequest>(&body)?
    };

    let total = state.store.upload(category, request.data)?;

    Ok(Json(UploadResponse {
        message: format!("{} data uploaded", capitalize(category.label())),
        total,
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Prediction>, PredictionError> {
    let category: Category = segment.parse()?;
    let prediction = state.store.predict(category, &state.policy)?;

    metrics::counter!(PREDICTIONS_SERVED_COUNTER, "category" => category.as_str()).increment(1);
    debug!(%category, records = prediction.based_on_records, "prediction served");

    Ok(Json(prediction))
}

pub async fn rank(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<RankResponse>, PredictionError> {
    let category: Category = segment.parse()?;
    let ranked = state.store.rank(category)?;

    Ok(Json(RankResponse {
        confidence: confidence_level(ranked.count),
        based_on_records: ranked.count,
        best: ranked.best,
        median: ranked.median,
        worst: ranked.worst,
    }))
}

/// Conversational endpoint. Missing data is answered with a friendly reply
/// and a 200, not an error status.
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, PredictionError> {
    // Unparseable bodies are treated like an empty prompt.
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "unparseable chat body, treating as empty prompt");
            ChatRequest::default()
        }
    };

    let category = match request.category.as_deref() {
        Some(segment) => segment.parse()?,
        None => Category::Offers,
    };

    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Ok(Json(ChatResponse::text(EMPTY_PROMPT_REPLY)));
    }

    let ranked = match state.store.rank(category) {
        Ok(ranked) => ranked,
        Err(PredictionError::NoData(_)) => {
            return Ok(Json(ChatResponse::text(no_data_reply(category))))
        }
        Err(e) => return Err(e),
    };

    let intent = classify_prompt(prompt);
    let confidence = confidence_level(ranked.count);
    metrics::counter!(CHAT_INTENT_COUNTER, "intent" => intent.as_str()).increment(1);
    debug!(%category, intent = intent.as_str(), "chat prompt classified");

    Ok(Json(ChatResponse {
        reply: compose_reply(intent, category, &ranked, confidence),
        intent: Some(intent),
        top_offer: Some(ranked.best.name_or(TOP_OFFER_NAME).to_owned()),
        confidence: Some(confidence),
    }))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
