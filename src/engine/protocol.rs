use crate::model::story::StoryRequest;

pub enum EngineCommand {
    ZkillStory {
        request_id: u64,
        request: StoryRequest,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineResponse {
    Story { request_id: u64, message: String },

    Failed { request_id: u64, reason: String },
}

impl EngineResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            EngineResponse::Story { request_id, .. }
            | EngineResponse::Failed { request_id, .. } => *request_id,
        }
    }
}
