//! Display card for one saved analysis.
//!
//! Record text only ever reaches the page as text nodes, so markup inside a
//! stored field is shown literally.

use leptos::prelude::*;

use crate::components::confidence_badge::ConfidenceBadge;
use crate::history::HistoryRecord;

/// A history record with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub timestamp: String,
    pub confidence: String,
    pub location: String,
    pub situation: String,
    pub sound_type: String,
    pub file_name: String,
    pub transcription: String,
}

impl From<&HistoryRecord> for HistoryCard {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            timestamp: record.timestamp().to_string(),
            confidence: record.confidence().to_string(),
            location: record.location().to_string(),
            situation: record.situation().to_string(),
            sound_type: record.sound_type().to_string(),
            file_name: record.file_name().to_string(),
            transcription: record.transcription().to_string(),
        }
    }
}

#[component]
pub fn HistoryCardView(card: HistoryCard) -> impl IntoView {
    let HistoryCard {
        timestamp,
        confidence,
        location,
        situation,
        sound_type,
        file_name,
        transcription,
    } = card;

    view! {
        <article class="history-card">
            <header class="history-card-header">
                <span class="history-date">{timestamp}</span>
                <ConfidenceBadge confidence=confidence />
            </header>
            <dl class="history-card-fields">
                <dt>"Location"</dt>
                <dd class="history-location">{location}</dd>
                <dt>"Situation"</dt>
                <dd class="history-situation">{situation}</dd>
                <dt>"Sound"</dt>
                <dd class="history-sound">{sound_type}</dd>
                <dt>"File"</dt>
                <dd class="history-file">{file_name}</dd>
            </dl>
            <blockquote class="history-transcription">{transcription}</blockquote>
        </article>
    }
}
