use crate::engine::esi::{EveClient, JsonSource};
use crate::engine::llm_client::{CompletionBackend, SamplingParams};
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::summary_builder::build_summary;
use crate::error::StoryError;
use crate::model::story::{Narrative, StoryRequest};

/// One killmail link in, one story out.
///
/// Holds no per-request state, so a single pipeline can serve many
/// concurrent requests.
pub struct StoryPipeline<S, B> {
    eve: EveClient<S>,
    backend: B,
    attacker_limit: usize,
}

impl<S: JsonSource, B: CompletionBackend> StoryPipeline<S, B> {
    pub fn new(eve: EveClient<S>, backend: B, attacker_limit: usize) -> Self {
        Self {
            eve,
            backend,
            attacker_limit,
        }
    }

    pub fn narrate(&self, request: &StoryRequest) -> Result<Narrative, StoryError> {
        let killmail = self.eve.fetch_killmail(&request.link)?;
        let summary = build_summary(&self.eve, &killmail, self.attacker_limit)?;

        let prompt = PromptBuilder::build(&summary, &request.topic);
        tracing::info!(killmail_id = %killmail.id, %prompt, "AI prompt");

        let text = self
            .backend
            .complete(&prompt, &SamplingParams::story(request.tokens))?;

        Ok(Narrative { text })
    }

    /// The user-facing message: narrative plus sign-off.
    pub fn tell(&self, request: &StoryRequest) -> Result<String, StoryError> {
        Ok(self.narrate(request)?.into_message())
    }
}
