//! Analysis page.
//!
//! Users pick an audio file, send it to the analysis backend, review the
//! result and optionally save it to the Dashboard history.

use leptos::prelude::*;
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, AnalysisResponse};
use crate::components::confidence_badge::ConfidenceBadge;
use crate::components::toast::{ToastKind, Toasts};
use crate::config::AppConfig;
use crate::history::types::format_confidence;
use crate::history::{HistoryRecord, HistoryStore};
use crate::storage::{BrowserStorage, STORAGE_HISTORY};

/// File chosen for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum AnalysisState {
    /// Waiting for a file
    Idle,
    /// File loaded, ready to analyze
    Ready,
    /// Request in flight
    Analyzing,
    Complete(AnalysisResponse),
    Error(String),
}

#[component]
pub fn AnalyzePage() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let (state, set_state) = signal(AnalysisState::Idle);
    let (selected, set_selected) = signal::<Option<SelectedFile>>(None);
    let (saved, set_saved) = signal(false);

    let on_analyze = move |_| {
        if !matches!(state.get_untracked(), AnalysisState::Ready) {
            return;
        }
        let Some(file) = selected.get_untracked() else {
            return;
        };

        set_state.set(AnalysisState::Analyzing);
        set_saved.set(false);
        let config = AppConfig::load(&BrowserStorage);
        spawn_local(async move {
            match api::analyze(&config, &file.name, &file.bytes).await {
                Ok(response) => set_state.set(AnalysisState::Complete(response)),
                Err(e) => {
                    error!("Analysis of {} failed: {}", file.name, e);
                    set_state.set(AnalysisState::Error(e.into()));
                }
            }
        });
    };

    let on_save = move |_| {
        let AnalysisState::Complete(response) = state.get_untracked() else {
            return;
        };
        let file_name = selected
            .with_untracked(|f| f.as_ref().map(|f| f.name.clone()))
            .unwrap_or_default();

        let store = HistoryStore::new(BrowserStorage, STORAGE_HISTORY);
        match store.append(HistoryRecord::from_analysis(&response, &file_name)) {
            Ok(records) => {
                set_saved.set(true);
                toasts.show(
                    format!("Saved to Dashboard ({} stored)", records.len()),
                    ToastKind::Success,
                );
            }
            Err(e) => {
                error!("Failed to save analysis: {}", e);
                toasts.show(format!("Could not save: {}", e), ToastKind::Error);
            }
        }
    };

    let on_reset = move |_| {
        set_state.set(AnalysisState::Idle);
        set_selected.set(None);
        set_saved.set(false);
    };

    let on_retry = move |_| {
        let next = if selected.with_untracked(Option::is_some) {
            AnalysisState::Ready
        } else {
            AnalysisState::Idle
        };
        set_state.set(next);
    };

    view! {
        <div class="page analyze-page">
            <style>{include_str!("analyze.css")}</style>

            <h2>"Analyze Audio"</h2>
            <p class="page-description">
                "Upload a recording to identify where it was captured and what is happening."
            </p>

            {move || match state.get() {
                AnalysisState::Idle => view! {
                    <FilePicker set_state=set_state set_selected=set_selected />
                }.into_any(),

                AnalysisState::Ready => view! {
                    <div class="analysis-ready">
                        <p class="selected-file">
                            {move || selected.with(|f| f.as_ref().map(|f| f.name.clone()).unwrap_or_default())}
                        </p>
                        <div class="action-buttons">
                            <button class="btn btn-primary" on:click=on_analyze>
                                "Analyze"
                            </button>
                            <button class="btn btn-secondary" on:click=on_reset>
                                "Choose Different File"
                            </button>
                        </div>
                    </div>
                }.into_any(),

                AnalysisState::Analyzing => view! {
                    <div class="analyzing-state">
                        <div class="spinner"></div>
                        <p>"Analyzing audio..."</p>
                        <p class="hint">"Transcription and sound classification can take a while"</p>
                    </div>
                }.into_any(),

                AnalysisState::Complete(response) => view! {
                    <div class="analysis-results">
                        <AnalysisResult response=response />
                        <div class="action-buttons">
                            <button
                                class="btn btn-primary"
                                disabled=move || saved.get()
                                on:click=on_save
                            >
                                {move || if saved.get() { "Saved" } else { "Save to Dashboard" }}
                            </button>
                            <button class="btn btn-secondary" on:click=on_reset>
                                "Analyze Another File"
                            </button>
                        </div>
                    </div>
                }.into_any(),

                AnalysisState::Error(msg) => view! {
                    <div class="error-state">
                        <div class="error-message">
                            <h3>"Analysis Failed"</h3>
                            <p>{msg}</p>
                        </div>
                        <button class="btn btn-secondary" on:click=on_retry>
                            "Try Again"
                        </button>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

/// Fields returned by the backend.
#[component]
fn AnalysisResult(response: AnalysisResponse) -> impl IntoView {
    let AnalysisResponse {
        location,
        situation,
        confidence,
        confidence_reason,
        evidence,
        summary,
        transcription,
    } = response;

    view! {
        <div class="result-card">
            <div class="result-header">
                <h3>"Result"</h3>
                <ConfidenceBadge confidence=format_confidence(confidence) />
            </div>
            {confidence_reason.map(|reason| view! { <p class="result-reason">{reason}</p> })}
            <dl class="result-fields">
                <dt>"Location"</dt>
                <dd>{location}</dd>
                <dt>"Situation"</dt>
                <dd>{situation}</dd>
            </dl>
            <h4>"Evidence"</h4>
            {if evidence.is_empty() {
                view! { <p class="result-empty">"No supporting sounds detected"</p> }.into_any()
            } else {
                view! {
                    <ul class="result-evidence">
                        {evidence.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                }.into_any()
            }}
            <h4>"Transcription"</h4>
            <blockquote class="result-transcription">{transcription}</blockquote>
            <h4>"Summary"</h4>
            <p class="result-summary">{summary}</p>
        </div>
    }
}

/// File chooser for audio clips.
#[component]
fn FilePicker(
    set_state: WriteSignal<AnalysisState>,
    set_selected: WriteSignal<Option<SelectedFile>>,
) -> impl IntoView {
    let (is_loading, set_is_loading) = signal(false);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let file_input_id = "audio-file-input";

    let on_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_is_loading.set(true);
        set_load_error.set(None);
        spawn_local(async move {
            let name = file.name();
            match read_file_bytes(file).await {
                Ok(bytes) => {
                    set_selected.set(Some(SelectedFile { name, bytes }));
                    set_state.set(AnalysisState::Ready);
                }
                Err(e) => {
                    error!("Failed to read {}: {}", name, e);
                    set_load_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="file-picker">
            <Show
                when=move || is_loading.get()
                fallback=move || view! {
                    <div class="file-picker-content">
                        <p class="file-picker-main">"Choose an audio file to analyze"</p>
                        <label for=file_input_id class="btn btn-secondary">
                            "Browse Files"
                        </label>
                        <input
                            type="file"
                            id=file_input_id
                            accept="audio/*,video/*"
                            style="display: none"
                            on:change=on_input_change
                        />
                        <p class="file-picker-formats">"Supports WAV, MP3, OGG, WebM, M4A"</p>
                    </div>
                }
            >
                <div class="file-picker-loading">
                    <div class="spinner"></div>
                    <p>"Loading file..."</p>
                </div>
            </Show>
            {move || load_error.get().map(|msg| view! { <p class="error-text">{msg}</p> })}
        </div>
    }
}

async fn read_file_bytes(file: web_sys::File) -> Result<Vec<u8>, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer")?;

    Ok(Uint8Array::new(&array_buffer).to_vec())
}
