use serde::Serialize;
use uuid::Uuid;

/// Result of a successful screening run.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category_id: i64,
    pub category: &'static str,
}

impl Prediction {
    pub fn message(&self) -> String {
        format!("Predicted Job Category: {}", self.category)
    }
}

/// Body of a successful `POST /api/v1/classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub request_id: Uuid,
    pub filename: String,
    pub category_id: i64,
    pub category: &'static str,
    pub message: String,
}

impl ClassifyResponse {
    pub fn new(request_id: Uuid, filename: String, prediction: Prediction) -> Self {
        Self {
            request_id,
            filename,
            category_id: prediction.category_id,
            category: prediction.category,
            message: prediction.message(),
        }
    }
}
