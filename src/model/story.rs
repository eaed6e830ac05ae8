pub const DEFAULT_TOKENS: u32 = 500;
pub const DEFAULT_TOPIC: &str = "An EVE Online story";
pub const CLOSING_LINE: &str = "And that was just another day in New Eden";

/// What the caller asks for: one killmail link plus generation knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub link: String,
    pub tokens: u32,
    pub topic: String,
}

impl StoryRequest {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            tokens: DEFAULT_TOKENS,
            topic: DEFAULT_TOPIC.to_string(),
        }
    }

    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }
}

/// Text returned by the completion backend, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub text: String,
}

impl Narrative {
    /// The message shown to the user: the story plus the sign-off.
    pub fn into_message(self) -> String {
        format!("{}\n\n{}", self.text, CLOSING_LINE)
    }
}
