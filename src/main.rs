use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use clap::{Parser, Subcommand};

use zkill_story::engine::command_parser::parse_command;
use zkill_story::engine::engine::Engine;
use zkill_story::engine::protocol::{EngineCommand, EngineResponse};
use zkill_story::model::story::{DEFAULT_TOKENS, DEFAULT_TOPIC};
use zkill_story::{
    logging, AppConfig, EveClient, HttpJsonSource, OpenAiCompletions, StoryPipeline, StoryRequest,
};

#[derive(Parser, Debug)]
#[command(name = "zkill_story")]
#[command(about = "Turn a zKillboard killmail into a short story")]
struct Args {
    /// Config file (defaults to <config dir>/zkill_story/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one story and print it
    Story {
        /// zKillboard link, e.g. https://zkillboard.com/kill/106739819/
        link: String,

        /// Maximum tokens the model may generate
        #[arg(short, long, default_value_t = DEFAULT_TOKENS)]
        tokens: u32,

        /// Topic line handed to the model
        #[arg(long, default_value = DEFAULT_TOPIC)]
        topic: String,
    },

    /// Read `!zkillstory <url> [tokens] [topic]` lines from stdin and answer each
    Listen,

    /// Check that the completion backend is reachable
    Check,
}

type LivePipeline = StoryPipeline<HttpJsonSource, OpenAiCompletions>;

fn build_pipeline(config: &AppConfig) -> anyhow::Result<LivePipeline> {
    let source =
        HttpJsonSource::new(config.services.timeout_secs).context("building HTTP client")?;
    let backend = OpenAiCompletions::new(config.completion.clone())?;

    Ok(StoryPipeline::new(
        EveClient::new(source, &config.services),
        backend,
        config.attacker_limit,
    ))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    logging::init(&config.logging)?;

    match args.command {
        Command::Story {
            link,
            tokens,
            topic,
        } => {
            let pipeline = build_pipeline(&config)?;
            let request = StoryRequest::new(link).with_tokens(tokens).with_topic(topic);
            let message = pipeline.tell(&request)?;
            println!("{}", message);
        }

        Command::Listen => listen(build_pipeline(&config)?)?,

        Command::Check => {
            let backend = OpenAiCompletions::new(config.completion.clone())?;
            println!("{}", backend.test_connection()?);
        }
    }

    Ok(())
}

fn listen(pipeline: LivePipeline) -> anyhow::Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let engine = Engine::new(cmd_rx, resp_tx, Arc::new(pipeline));
    let engine_thread = thread::spawn(move || engine.run());

    let printer = thread::spawn(move || {
        for response in resp_rx {
            match response {
                EngineResponse::Story {
                    request_id,
                    message,
                } => println!("[{}] {}", request_id, message),
                EngineResponse::Failed { request_id, reason } => {
                    eprintln!("[{}] command failed: {}", request_id, reason)
                }
            }
        }
    });

    let mut next_id = 0u64;
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;

        match parse_command(&line) {
            None => continue,
            Some(Err(err)) => eprintln!("{}", err),
            Some(Ok(request)) => {
                next_id += 1;
                println!("[{}] writing story for {}", next_id, request.link);
                cmd_tx
                    .send(EngineCommand::ZkillStory {
                        request_id: next_id,
                        request,
                    })
                    .context("engine stopped")?;
            }
        }
    }

    let _ = cmd_tx.send(EngineCommand::Shutdown);
    if engine_thread.join().is_err() {
        anyhow::bail!("engine thread panicked");
    }
    if printer.join().is_err() {
        anyhow::bail!("printer thread panicked");
    }

    Ok(())
}
