//! Client for the remote sentiment-classification service.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http_client;

/// Path of the prediction endpoint, joined onto the configured base URL.
pub const PREDICT_PATH: &str = "/api/predict";

const MAX_PREDICT_RESPONSE_BYTES: usize = 64 * 1024;

/// Model variant the service can run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentModel {
    /// Simple recurrent network.
    Rnn,
    /// Long short-term memory network.
    #[default]
    Lstm,
}

impl SentimentModel {
    /// Short display name used in the model picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rnn => "RNN",
            Self::Lstm => "LSTM",
        }
    }

    /// One-line description shown under the display name.
    pub fn description(self) -> &'static str {
        match self {
            Self::Rnn => "Simple recurrent network",
            Self::Lstm => "Long short-term memory",
        }
    }
}

/// Classification produced by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Display text for the label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

/// Body of one prediction request.
#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest {
    pub text: String,
    pub model: SentimentModel,
}

/// Parsed payload of a successful prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub label: SentimentLabel,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Model the service actually ran; may differ from the requested one.
    pub model: String,
    /// Server-reported processing latency in milliseconds.
    pub time_ms: u64,
}

/// Terminal outcome of a structurally valid service response.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictOutcome {
    Success(AnalysisResult),
    /// The service answered but declined to produce a result.
    Rejected { message: Option<String> },
}

/// Failures to obtain a structurally valid response.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid predict URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
}

/// Run one prediction against the service. Exactly one attempt is made; the
/// shared agent's timeouts are the only bound on its duration.
pub fn predict(base_url: &Url, request: &PredictRequest) -> Result<PredictOutcome, PredictError> {
    let url = base_url
        .join(PREDICT_PATH)
        .map_err(|err| PredictError::InvalidUrl(err.to_string()))?;
    let req = http_client::agent()
        .post(url.as_str())
        .set("Accept", "application/json")
        .set("Content-Type", "application/json");

    let response = match req.send_json(request) {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body =
                read_body_limited(response, MAX_PREDICT_RESPONSE_BYTES).unwrap_or_else(|err| err);
            return status_outcome(code, &body);
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };

    let body =
        read_body_limited(response, MAX_PREDICT_RESPONSE_BYTES).map_err(PredictError::Json)?;
    parse_predict_response(&body)
}

#[derive(Clone, Debug, Deserialize)]
struct PredictResponseWire {
    success: Option<bool>,
    data: Option<AnalysisPayloadWire>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct AnalysisPayloadWire {
    label: SentimentLabel,
    confidence: f32,
    meta: AnalysisMetaWire,
}

#[derive(Clone, Debug, Deserialize)]
struct AnalysisMetaWire {
    model: String,
    time_ms: u64,
}

fn parse_predict_response(body: &str) -> Result<PredictOutcome, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Json("Empty response body".to_string()));
    }
    let wire: PredictResponseWire = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::Json(format!("{err}: {trimmed}")))?;
    outcome_from_wire(wire)
}

/// A non-2xx body that still carries the success envelope is a service
/// rejection; anything else is a transport failure.
fn status_outcome(code: u16, body: &str) -> Result<PredictOutcome, PredictError> {
    match serde_json::from_str::<PredictResponseWire>(body.trim()) {
        Ok(wire) if wire.success.is_some() => outcome_from_wire(wire),
        _ => Err(PredictError::Transport(format!("HTTP {code}: {}", body.trim()))),
    }
}

fn outcome_from_wire(wire: PredictResponseWire) -> Result<PredictOutcome, PredictError> {
    if wire.success == Some(true) {
        let Some(data) = wire.data else {
            return Err(PredictError::Json(
                "Success response missing data payload".to_string(),
            ));
        };
        return Ok(PredictOutcome::Success(AnalysisResult {
            label: data.label,
            confidence: data.confidence,
            model: data.meta.model,
            time_ms: data.meta.time_ms,
        }));
    }
    Ok(PredictOutcome::Rejected {
        message: wire.error.or(wire.message),
    })
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes =
        http_client::read_response_bytes(response, max_bytes).map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_payload() {
        let body = r#"{
            "success": true,
            "data": {
                "label": "Positive",
                "confidence": 0.92,
                "meta": { "model": "lstm", "time_ms": 15 }
            }
        }"#;
        let outcome = parse_predict_response(body).unwrap();
        let PredictOutcome::Success(result) = outcome else {
            panic!("expected success");
        };
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.92);
        assert_eq!(result.model, "lstm");
        assert_eq!(result.time_ms, 15);
    }

    #[test]
    fn explicit_failure_maps_to_rejection_with_message() {
        let outcome =
            parse_predict_response(r#"{ "success": false, "error": "unknown model" }"#).unwrap();
        assert_eq!(
            outcome,
            PredictOutcome::Rejected {
                message: Some("unknown model".to_string())
            }
        );
    }

    #[test]
    fn absent_success_flag_maps_to_rejection() {
        let outcome = parse_predict_response(r#"{ "message": "warming up" }"#).unwrap();
        assert_eq!(
            outcome,
            PredictOutcome::Rejected {
                message: Some("warming up".to_string())
            }
        );
    }

    #[test]
    fn success_without_data_is_a_parse_error() {
        let err = parse_predict_response(r#"{ "success": true }"#).unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let err = parse_predict_response("<html>nope</html>").unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn empty_body_is_a_parse_error() {
        let err = parse_predict_response("   ").unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn status_body_with_envelope_is_a_rejection() {
        let outcome =
            status_outcome(422, r#"{ "success": false, "error": "text too long" }"#).unwrap();
        assert_eq!(
            outcome,
            PredictOutcome::Rejected {
                message: Some("text too long".to_string())
            }
        );
    }

    #[test]
    fn status_body_without_envelope_is_transport() {
        let err = status_outcome(502, "Bad Gateway").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("502"), "missing status code in {text}");
        assert!(matches!(err, PredictError::Transport(_)));
    }

    #[test]
    fn request_serializes_to_contract_shape() {
        let request = PredictRequest {
            text: "Great film!".to_string(),
            model: SentimentModel::Lstm,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text"], "Great film!");
        assert_eq!(json["model"], "lstm");
    }
}
