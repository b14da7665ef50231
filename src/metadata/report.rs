//! Sobre de respuesta que entrega el resultado completo a quien llama.

use crate::metadata::MetadataMap;
use crate::privacy::PrivacyFinding;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataMap>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub privacy_concerns: Vec<PrivacyFinding>,
}

impl AnalysisReport {
    pub fn success(
        filename: impl Into<String>,
        metadata: MetadataMap,
        privacy_concerns: Vec<PrivacyFinding>,
    ) -> Self {
        Self {
            status: ReportStatus::Success,
            filename: Some(filename.into()),
            message: None,
            metadata: Some(metadata),
            privacy_concerns,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Error,
            filename: None,
            message: Some(message.into()),
            metadata: None,
            privacy_concerns: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
