use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::engine::extract::killmail_id_from_link;
use crate::error::{LookupError, StoryError};
use crate::model::killmail::{Killmail, KillmailDetail};

/// Anything that can turn a URL into a JSON document.
pub trait JsonSource {
    fn get_json(&self, url: &str) -> Result<Value, LookupError>;
}

impl<T: JsonSource + ?Sized> JsonSource for &T {
    fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        (**self).get_json(url)
    }
}

/// Plain blocking HTTP, one request per lookup.
pub struct HttpJsonSource {
    client: Client,
}

impl HttpJsonSource {
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("zkill_story/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl JsonSource for HttpJsonSource {
    fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        let resp = self.client.get(url).send().map_err(|source| LookupError::Http {
            url: url.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            return Err(LookupError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|source| LookupError::Http {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| LookupError::Json {
            url: url.to_string(),
            source,
        })
    }
}

/// zKillboard + ESI endpoints on top of a [`JsonSource`].
pub struct EveClient<S> {
    source: S,
    zkill_base: String,
    esi_base: String,
}

impl<S: JsonSource> EveClient<S> {
    pub fn new(source: S, services: &ServiceConfig) -> Self {
        Self {
            source,
            zkill_base: services.zkill_base_url.trim_end_matches('/').to_string(),
            esi_base: services.esi_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Looks the killmail up on zKillboard and returns its hash.
    pub fn fetch_event(&self, killmail_id: &str) -> Result<String, StoryError> {
        tracing::debug!(killmail_id, "getting zkill data");
        let url = format!("{}/killID/{}/", self.zkill_base, killmail_id);
        let data = self.source.get_json(&url)?;

        let hash = data
            .pointer("/0/zkb/hash")
            .and_then(Value::as_str)
            .ok_or(LookupError::MissingField {
                url,
                field: "zkb.hash",
            })?;

        tracing::debug!(killmail_id, hash, "got zkill data");
        Ok(hash.to_string())
    }

    pub fn fetch_detail(
        &self,
        hash: &str,
        killmail_id: &str,
    ) -> Result<KillmailDetail, StoryError> {
        tracing::debug!(killmail_id, "getting ESI data");
        let url = format!(
            "{}/killmails/{}/{}/?datasource=tranquility",
            self.esi_base, killmail_id, hash
        );
        let data = self.source.get_json(&url)?;

        let detail: KillmailDetail = serde_json::from_value(data)
            .map_err(|source| StoryError::Schema { what: "killmail", source })?;

        tracing::debug!(
            killmail_id,
            attackers = detail.attackers.len(),
            "got ESI data"
        );
        Ok(detail)
    }

    pub fn fetch_killmail(&self, link: &str) -> Result<Killmail, StoryError> {
        let id = killmail_id_from_link(link);
        let hash = self.fetch_event(&id)?;
        let detail = self.fetch_detail(&hash, &id)?;
        Ok(Killmail { id, hash, detail })
    }

    pub fn character_name(&self, character_id: u64) -> Result<String, LookupError> {
        let url = format!(
            "{}/characters/{}/?datasource=tranquility",
            self.esi_base, character_id
        );
        self.name_at(url)
    }

    pub fn corporation_name(&self, corporation_id: u64) -> Result<String, LookupError> {
        let url = format!(
            "{}/corporations/{}/?datasource=tranquility",
            self.esi_base, corporation_id
        );
        self.name_at(url)
    }

    pub fn type_name(&self, type_id: u64) -> Result<String, LookupError> {
        let url = format!(
            "{}/universe/types/{}/?datasource=tranquility&language=en",
            self.esi_base, type_id
        );
        self.name_at(url)
    }

    fn name_at(&self, url: String) -> Result<String, LookupError> {
        let data = self.source.get_json(&url)?;
        match data.get("name").and_then(Value::as_str) {
            Some(name) => Ok(name.to_string()),
            None => Err(LookupError::MissingField { url, field: "name" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{client, FakeSource};
    use serde_json::json;

    #[test]
    fn hash_comes_from_first_entry() {
        let source = FakeSource::new().with(
            "https://zkb.test/api/killID/106739819/",
            json!([{ "killmail_id": 106739819, "zkb": { "hash": "abc123" } }]),
        );
        let eve = client(&source);
        assert_eq!(eve.fetch_event("106739819").unwrap(), "abc123");
    }

    #[test]
    fn missing_hash_is_fatal() {
        let source = FakeSource::new().with("https://zkb.test/api/killID/5/", json!([]));
        let eve = client(&source);
        let err = eve.fetch_event("5").unwrap_err();
        assert!(matches!(
            err,
            StoryError::Lookup(LookupError::MissingField { field: "zkb.hash", .. })
        ));
    }

    #[test]
    fn detail_without_attackers_is_a_schema_error() {
        let source = FakeSource::new().with(
            "https://esi.test/latest/killmails/5/h/?datasource=tranquility",
            json!({ "victim": { "character_id": 1 } }),
        );
        let eve = client(&source);
        let err = eve.fetch_detail("h", "5").unwrap_err();
        assert!(matches!(err, StoryError::Schema { what: "killmail", .. }));
    }

    #[test]
    fn name_lookup_requires_name_field() {
        let source = FakeSource::new().with(
            "https://esi.test/latest/characters/9/?datasource=tranquility",
            json!({ "error": "Character not found" }),
        );
        let eve = client(&source);
        assert!(matches!(
            eve.character_name(9),
            Err(LookupError::MissingField { field: "name", .. })
        ));
    }
}
