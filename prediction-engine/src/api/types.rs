use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::Intent;
use crate::confidence::ConfidenceLevel;
use crate::record::Record;
use crate::store::DataCounts;

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatusResponse {
    pub data_counts: DataCounts,
}

/// Body of an upload request. A missing `data` key uploads nothing.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default = "empty_list")]
    pub data: Value,
}

impl Default for UploadRequest {
    fn default() -> Self {
        Self { data: empty_list() }
    }
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub best: Record,
    pub median: Record,
    pub worst: Record,
    pub confidence: ConfidenceLevel,
    pub based_on_records: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
    /// Defaults to offers.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_offer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLevel>,
}

impl ChatResponse {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            intent: None,
            top_offer: None,
            confidence: None,
        }
    }
}
