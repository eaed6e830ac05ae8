use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::CompletionError;

/// Sampling knobs for one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl SamplingParams {
    /// Fixed settings used for every killmail story.
    pub fn story(max_tokens: u32) -> Self {
        Self {
            temperature: 0.95,
            max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.5,
            presence_penalty: 0.0,
        }
    }
}

/// Turns a prompt into generated text.
pub trait CompletionBackend {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CompletionError>;
}

impl<T: CompletionBackend + ?Sized> CompletionBackend for &T {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CompletionError> {
        (**self).complete(prompt, params)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(flatten)]
    params: &'a SamplingParams,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

/// OpenAI-compatible `/completions` endpoint.
pub struct OpenAiCompletions {
    config: CompletionConfig,
    client: Client,
}

impl OpenAiCompletions {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Asks the backend which models it serves.
    pub fn test_connection(&self) -> Result<String, CompletionError> {
        let mut req = self.client.get(self.url("models"));
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let body: serde_json::Value = resp
            .json()
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        Ok(format!(
            "Connected ({} models available)",
            body["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}

impl CompletionBackend for OpenAiCompletions {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CompletionError> {
        let body = CompletionRequest {
            model: &self.config.model,
            prompt,
            params,
        };

        let mut req = self.client.post(self.url("completions")).json(&body);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let completion: CompletionResponse = resp
            .json()
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(CompletionError::EmptyResponse)
    }
}
