use super::{GenerateContentRequest, GenerateContentResponse, LlmClient, LlmError};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub api_key: String,
    pub request: GenerateContentRequest,
}

/// Replays canned outcomes in order and records every request it receives.
pub struct MockLlmClient {
    outcomes: Mutex<Vec<Result<GenerateContentResponse, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    hang: bool,
}

impl MockLlmClient {
    pub fn new(outcomes: Vec<Result<GenerateContentResponse, LlmError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            calls: Mutex::new(Vec::new()),
            hang: false,
        }
    }

    /// A client whose request never completes.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new(Vec::new())
        }
    }

    /// A client whose next answer is a single candidate carrying `text` and `sources`.
    pub fn answering(text: &str, sources: &[(&str, &str)]) -> Self {
        Self::new(vec![Ok(response_with(text, sources))])
    }

    pub fn failing(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn response_with(text: &str, sources: &[(&str, &str)]) -> GenerateContentResponse {
    let chunks: Vec<serde_json::Value> = sources
        .iter()
        .map(|(uri, title)| serde_json::json!({"web": {"uri": uri, "title": title}}))
        .collect();

    serde_json::from_value(serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "groundingMetadata": {"groundingChunks": chunks}
        }]
    }))
    .unwrap()
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            request: request.clone(),
        });

        if self.hang {
            std::future::pending::<()>().await;
        }

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Err(LlmError::Transport("no canned response left".to_string()));
        }
        outcomes.remove(0)
    }
}
