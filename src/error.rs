/// Failure of a single JSON lookup against zKillboard or ESI.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned invalid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} response has no `{field}` field")]
    MissingField { url: String, field: &'static str },
}

/// Failure talking to the completion backend.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("empty response from completion backend")]
    EmptyResponse,
}

/// Everything that can stop a story from being told.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("unexpected {what} layout: {source}")]
    Schema {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{role} has no {field}")]
    MissingId {
        role: &'static str,
        field: &'static str,
    },

    #[error("killmail has no attackers")]
    NoAttackers,

    #[error("no attacker is credited with the final blow")]
    NoFinalBlow,

    #[error("summary is missing {0}")]
    IncompleteSummary(&'static str),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// A chat line that looked like a command but could not be parsed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("usage: !zkillstory <url> [tokens] [topic]")]
    MissingLink,

    #[error("tokens must be a whole number, got `{0}`")]
    BadTokens(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}
