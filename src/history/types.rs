use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::api::AnalysisResponse;

pub const DEFAULT_TIMESTAMP: &str = "--";
pub const DEFAULT_LOCATION: &str = "Unknown";
pub const DEFAULT_SITUATION: &str = "Unknown";
pub const DEFAULT_CONFIDENCE: &str = "--%";
pub const DEFAULT_SOUND_TYPE: &str = "Audio Analysis";
pub const DEFAULT_FILE_NAME: &str = "Unnamed file";
pub const DEFAULT_TRANSCRIPTION: &str = "No transcription available";

/// One saved analysis outcome as persisted in the history log.
///
/// Every field is optional so that records written by older builds, or with
/// fields dropped, still load. Defaults are applied when reading through the
/// accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl HistoryRecord {
    /// Build a record from a backend response, stamped with the current local time.
    pub fn from_analysis(response: &AnalysisResponse, file_name: &str) -> Self {
        Self::from_analysis_at(response, file_name, &Local::now())
    }

    pub fn from_analysis_at<Tz>(
        response: &AnalysisResponse,
        file_name: &str,
        at: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: Some(format_timestamp(at)),
            location: non_empty(&response.location),
            situation: non_empty(&response.situation),
            confidence: Some(format_confidence(response.confidence)),
            sound_type: Some(sound_type_from_evidence(&response.evidence)),
            file_name: non_empty(file_name),
            transcription: non_empty(&response.transcription),
        }
    }

    pub fn timestamp(&self) -> &str {
        field_or(&self.timestamp, DEFAULT_TIMESTAMP)
    }

    pub fn location(&self) -> &str {
        field_or(&self.location, DEFAULT_LOCATION)
    }

    pub fn situation(&self) -> &str {
        field_or(&self.situation, DEFAULT_SITUATION)
    }

    pub fn confidence(&self) -> &str {
        field_or(&self.confidence, DEFAULT_CONFIDENCE)
    }

    pub fn sound_type(&self) -> &str {
        field_or(&self.sound_type, DEFAULT_SOUND_TYPE)
    }

    pub fn file_name(&self) -> &str {
        field_or(&self.file_name, DEFAULT_FILE_NAME)
    }

    pub fn transcription(&self) -> &str {
        field_or(&self.transcription, DEFAULT_TRANSCRIPTION)
    }
}

/// Format a 0..=1 confidence score as a whole percentage, e.g. `0.87` -> `"87%"`.
/// Out-of-range and non-finite scores are clamped.
pub fn format_confidence(score: f32) -> String {
    let clamped = if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("{}%", (clamped * 100.0).round() as u32)
}

/// Display timestamp, e.g. `Jan 1, 2025, 10:00 AM`.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// The record's sound label: the first non-empty evidence entry.
pub fn sound_type_from_evidence(evidence: &[String]) -> String {
    evidence
        .iter()
        .map(|e| e.trim())
        .find(|e| !e.is_empty())
        .unwrap_or(DEFAULT_SOUND_TYPE)
        .to_string()
}

fn field_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
