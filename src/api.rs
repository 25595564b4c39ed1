//! HTTP client for the analysis backend.

use gloo_net::http::Request;
use log::{error, info};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::AuralisError;

/// Analysis result returned by `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub location: String,
    pub situation: String,
    /// Score in 0..=1.
    pub confidence: f32,
    pub confidence_reason: Option<String>,
    pub evidence: Vec<String>,
    pub summary: String,
    #[serde(alias = "transcribe")]
    pub transcription: String,
}

/// Upload `bytes` as multipart field `file` and decode the analysis.
pub async fn analyze(
    config: &AppConfig,
    file_name: &str,
    bytes: &[u8],
) -> Result<AnalysisResponse, AuralisError> {
    let url = config.analyze_endpoint();
    info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

    let form = multipart_form(file_name, bytes)?;
    let response = Request::post(&url).body(form)?.send().await.map_err(|e| {
        error!("Analysis request to {} failed: {}", url, e);
        AuralisError::from(e)
    })?;

    if !response.ok() {
        error!("Analysis backend returned {}", response.status());
        return Err(AuralisError::Api(format!(
            "Backend returned {} {}",
            response.status(),
            response.status_text()
        )));
    }

    response
        .json::<AnalysisResponse>()
        .await
        .map_err(|e| AuralisError::Api(format!("Failed to parse analysis response: {}", e)))
}

fn multipart_form(file_name: &str, bytes: &[u8]) -> Result<web_sys::FormData, AuralisError> {
    let js_err = |what: &str, e: wasm_bindgen::JsValue| {
        AuralisError::Api(format!("Failed to {}: {:?}", what, e))
    };

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_for(file_name));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_err("build upload blob", e))?;

    let form = web_sys::FormData::new().map_err(|e| js_err("create form", e))?;
    form.append_with_blob_and_filename("file", &blob, file_name)
        .map_err(|e| js_err("attach file", e))?;
    Ok(form)
}

/// Content type guessed from the file extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_response() {
        let json = r#"{
            "location": "Airport",
            "situation": "Boarding",
            "confidence": 0.85,
            "evidence": ["Flight-related speech", "Public crowd sounds"],
            "summary": "This audio likely comes from a airport during boarding.",
            "transcribe": "flight 22 now boarding at gate 4"
        }"#;

        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.location, "Airport");
        assert_eq!(response.confidence, 0.85);
        assert_eq!(response.evidence.len(), 2);
        assert_eq!(response.transcription, "flight 22 now boarding at gate 4");
        assert!(response.confidence_reason.is_none());
    }

    #[test]
    fn test_decode_emergency_response() {
        let json = r#"{
            "location": "Unknown",
            "situation": "Emergency",
            "confidence": 0.95,
            "confidence_reason": "High confidence due to emergency signals.",
            "evidence": ["siren"],
            "summary": "Emergency situation detected based on distress signals.",
            "transcription": "help"
        }"#;

        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.situation, "Emergency");
        assert_eq!(
            response.confidence_reason.as_deref(),
            Some("High confidence due to emergency signals.")
        );
        assert_eq!(response.transcription, "help");
    }

    #[test]
    fn test_decode_sparse_response() {
        let response: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, AnalysisResponse::default());
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("clip.WAV"), "audio/wav");
        assert_eq!(mime_for("voice.m4a"), "audio/mp4");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }
}
