use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::engine::esi::JsonSource;
use crate::engine::llm_client::CompletionBackend;
use crate::engine::pipeline::StoryPipeline;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Command loop behind the chat front end. Every story request runs on its
/// own thread; requests share nothing but the pipeline itself.
pub struct Engine<S, B> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    pipeline: Arc<StoryPipeline<S, B>>,
}

impl<S, B> Engine<S, B>
where
    S: JsonSource + Send + Sync + 'static,
    B: CompletionBackend + Send + Sync + 'static,
{
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        pipeline: Arc<StoryPipeline<S, B>>,
    ) -> Self {
        Self { rx, tx, pipeline }
    }

    /// Runs until `Shutdown` arrives or every sender is dropped, then waits
    /// for the stories still being written.
    pub fn run(self) {
        let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::ZkillStory { request_id, request } => {
                    tracing::debug!(request_id, link = %request.link, "zkillstory command");

                    let pipeline = Arc::clone(&self.pipeline);
                    let tx = self.tx.clone();

                    in_flight.retain(|handle| !handle.is_finished());
                    in_flight.push(std::thread::spawn(move || {
                        let response = match pipeline.tell(&request) {
                            Ok(message) => EngineResponse::Story { request_id, message },
                            Err(err) => {
                                tracing::error!(request_id, error = %err, "zkillstory failed");
                                EngineResponse::Failed {
                                    request_id,
                                    reason: err.to_string(),
                                }
                            }
                        };

                        let _ = tx.send(response);
                    }));
                }

                EngineCommand::Shutdown => break,
            }
        }

        for handle in in_flight {
            if handle.join().is_err() {
                tracing::error!("story task panicked");
            }
        }
    }
}
