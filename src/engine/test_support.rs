use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::engine::esi::{EveClient, JsonSource};
use crate::engine::llm_client::{CompletionBackend, SamplingParams};
use crate::error::{CompletionError, LookupError};

pub const ZKILL: &str = "https://zkb.test/api";
pub const ESI: &str = "https://esi.test/latest";

/// Canned JSON by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub fn with_character(self, id: u64, name: &str) -> Self {
        self.with(
            &format!("{ESI}/characters/{id}/?datasource=tranquility"),
            json!({ "name": name }),
        )
    }

    pub fn with_corporation(self, id: u64, name: &str) -> Self {
        self.with(
            &format!("{ESI}/corporations/{id}/?datasource=tranquility"),
            json!({ "name": name }),
        )
    }

    pub fn with_type(self, id: u64, name: &str) -> Self {
        self.with(
            &format!("{ESI}/universe/types/{id}/?datasource=tranquility&language=en"),
            json!({ "name": name }),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(needle)).count()
    }
}

impl JsonSource for FakeSource {
    fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| LookupError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn services() -> ServiceConfig {
    ServiceConfig {
        zkill_base_url: ZKILL.to_string(),
        esi_base_url: ESI.to_string(),
        timeout_secs: None,
    }
}

pub fn client(source: &FakeSource) -> EveClient<&FakeSource> {
    EveClient::new(source, &services())
}

pub fn attacker(
    character_id: u64,
    corporation_id: u64,
    ship_type_id: u64,
    damage: u64,
    final_blow: bool,
) -> Value {
    json!({
        "character_id": character_id,
        "corporation_id": corporation_id,
        "ship_type_id": ship_type_id,
        "damage_done": damage,
        "final_blow": final_blow,
    })
}

/// Returns the same text for every prompt and remembers what it was sent.
pub struct CannedBackend {
    pub text: String,
    pub seen: Mutex<Vec<(String, SamplingParams)>>,
}

impl CannedBackend {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionBackend for CannedBackend {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CompletionError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((prompt.to_string(), params.clone()));
        }
        Ok(self.text.clone())
    }
}
