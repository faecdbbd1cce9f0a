use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single disease-classification result for one submitted image.
///
/// Records are immutable once produced: the backend creates one per upload
/// and the only destructive operation is a bulk clear of the history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub prediction: String,
    /// Percentage in [0, 100], as reported by the inference backend.
    pub confidence: f64,
    /// "low", "medium", "high" or a disease-specific synonym.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
