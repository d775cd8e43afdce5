//! chatline: terminal client for a streaming chat server.
//!
//! Each line read from stdin is sent as a user message. The assistant's
//! reply is printed as it streams in. Logs go to stderr so they never
//! interleave with the conversation on stdout.

mod input;
mod render;
mod setup;

use std::path::PathBuf;

use chatline_client::ChatClient;
use chatline_config::ChatConfig;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::input::{Input, HELP};
use crate::render::Renderer;

#[derive(Parser)]
#[command(name = "chatline", about = "Terminal client for a streaming chat server")]
struct Args {
    /// Server base address, e.g. wss://chat.example.com (overrides config and environment).
    #[arg(long)]
    url: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `chatline_client=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// File that persists the session id.
    #[arg(long)]
    session_file: Option<PathBuf>,
}

fn load(args: &Args) -> chatline_common::Result<ChatConfig> {
    let config = chatline_config::load_config_with_url(args.config.as_deref(), args.url.clone())?;
    Ok(config)
}

fn init_logging(args: &Args, config: &ChatConfig) {
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> chatline_common::Result<()> {
    let args = Args::parse();
    let config = load(&args)?;
    init_logging(&args, &config);

    let store = setup::session_store(&config.session, args.session_file.as_deref())?;
    let client = ChatClient::websocket(setup::client_options(&config), store);
    tracing::info!(endpoint = %config.endpoint.base_url, "chatline started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut views = client.subscribe();
    let mut renderer = Renderer::new();
    let mut stdout = tokio::io::stdout();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Input::Message(text) => client.send_message(text).await?,
                    Input::Clear => client.clear_history().await?,
                    Input::Connect => client.connect().await?,
                    Input::Help => {
                        stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
                        stdout.flush().await?;
                    }
                    Input::Quit => break,
                    Input::Empty => {}
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                let out = renderer.render(&view);
                if !out.is_empty() {
                    stdout.write_all(out.as_bytes()).await?;
                    stdout.flush().await?;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    if let Err(e) = client.shutdown().await {
        tracing::debug!(error = %e, "client already stopped");
    }
    tracing::info!("chatline exiting");
    Ok(())
}
