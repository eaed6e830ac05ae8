use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::resolver::DEFAULT_ATTACKER_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Attackers named individually before the rest become "and N others".
    /// Must be at least 1.
    pub attacker_limit: usize,
    pub services: ServiceConfig,
    pub completion: CompletionConfig,
    pub logging: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            attacker_limit: DEFAULT_ATTACKER_LIMIT,
            services: ServiceConfig::default(),
            completion: CompletionConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub zkill_base_url: String,
    pub esi_base_url: String,
    /// Unset means requests wait forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            zkill_base_url: "https://zkillboard.com/api".to_string(),
            esi_base_url: "https://esi.evetech.net/latest".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: PathBuf,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("debug.log"),
            filter: "zkill_story=debug".to_string(),
        }
    }
}

/// `<config dir>/zkill_story/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("zkill_story");
    path.push("config.toml");
    Some(path)
}

impl AppConfig {
    /// Reads the given file, or the default location if it exists, then
    /// applies overrides from the environment and from the nearest `.env`.
    /// Variables already set in the environment beat the `.env` file.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        let dotenv = dotenvy::dotenv_iter().map(collect_vars).unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()));

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.attacker_limit >= 1, "attacker_limit must be at least 1");
        Ok(())
    }

    /// `OPENAI_SECRET` wins over `OPENAI_API_KEY`; `ZKILL_STORY_LOG` replaces
    /// the log filter.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("OPENAI_SECRET").or_else(|| var("OPENAI_API_KEY")) {
            self.completion.api_key = Some(key);
        }
        if let Some(filter) = var("ZKILL_STORY_LOG") {
            self.logging.filter = filter;
        }
    }
}

/// Variables from a dotenv file, for layering under the real environment.
pub fn dotenv_vars(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("reading env file {}", path.display()))?;
    Ok(collect_vars(iter))
}

fn collect_vars<R: Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    iter.filter_map(Result::ok).collect()
}
