//! Killmail stories: fetch a zKillboard kill, resolve everyone involved
//! through ESI and have a completion model write it up.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;

pub use config::AppConfig;
pub use engine::esi::{EveClient, HttpJsonSource, JsonSource};
pub use engine::llm_client::{CompletionBackend, OpenAiCompletions, SamplingParams};
pub use engine::pipeline::StoryPipeline;
pub use error::{CommandError, CompletionError, LookupError, StoryError};
pub use model::story::{Narrative, StoryRequest};
