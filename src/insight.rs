use crate::config::InsightConfig;
use crate::error::AppError;
use serde_json::{json, Value};

/// Turns an assembled prompt into narrative text.
///
/// Failures are reported as [`AppError::BackendUnavailable`], which callers
/// treat as recoverable.
pub trait InsightBackend {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError>;
}

/// A Messages-style HTTP text generation endpoint.
pub struct MessagesApiBackend {
    url: String,
    api_key: String,
    model: String,
}

const API_VERSION: &str = "2023-06-01";
const TEMPERATURE: f64 = 0.7;

impl MessagesApiBackend {
    pub fn new(url: &str, api_key: &str, model: &str) -> Self {
        MessagesApiBackend {
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn request_body(&self, prompt: &str, max_tokens: u32) -> Value {
        json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

/// First text block of a Messages response.
pub fn extract_text(body: &Value) -> Result<String, AppError> {
    body["content"]
        .as_array()
        .and_then(|blocks| blocks.iter().find_map(|b| b["text"].as_str()))
        .map(str::to_string)
        .ok_or_else(|| AppError::BackendUnavailable("response has no text content".to_string()))
}

impl InsightBackend for MessagesApiBackend {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError> {
        let response = ureq::post(&self.url)
            .set("User-Agent", "rift_recap/0.1.0")
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", API_VERSION)
            .send_json(self.request_body(prompt, max_tokens));

        let body: Value = match response {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| AppError::BackendUnavailable(format!("unreadable response: {}", e)))?,
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                return Err(AppError::BackendUnavailable(format!("status {}: {}", code, detail)));
            }
            Err(e) => return Err(AppError::BackendUnavailable(e.to_string())),
        };

        extract_text(&body)
    }
}

/// Stand-in when no backend is configured.
pub struct DisabledBackend;

impl InsightBackend for DisabledBackend {
    fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AppError> {
        Err(AppError::BackendUnavailable(
            "INSIGHT_API_KEY and INSIGHT_MODEL are not configured".to_string(),
        ))
    }
}

pub fn backend_from_config(config: &InsightConfig) -> Box<dyn InsightBackend> {
    match (&config.api_key, &config.model) {
        (Some(key), Some(model)) => Box::new(MessagesApiBackend::new(&config.url, key, model)),
        _ => Box::new(DisabledBackend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_text_block() {
        let body = json!({ "content": [ { "type": "text", "text": "Great season!" } ] });
        assert_eq!(extract_text(&body).unwrap(), "Great season!");
    }

    #[test]
    fn missing_text_is_unavailable() {
        let body = json!({ "error": { "message": "overloaded" } });
        assert!(matches!(extract_text(&body), Err(AppError::BackendUnavailable(_))));
    }

    #[test]
    fn request_carries_prompt_and_limit() {
        let backend = MessagesApiBackend::new("http://localhost", "k", "m");
        let body = backend.request_body("hello", 512);
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["model"], "m");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn disabled_backend_is_recoverable() {
        let err = DisabledBackend.generate("p", 10).unwrap_err();
        assert!(matches!(err, AppError::BackendUnavailable(_)));
    }
}
