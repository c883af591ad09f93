use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use catalog::Catalog;
use clap::Parser;
use shared::protocol::EnvironmentSignals;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer_core::{load_settings, DispatchOutcome, SessionEvent, ViewerRuntime};

mod commands;
mod host;

use commands::{parse_line, ScriptCommand};
use host::{ConsoleHost, JsonSurface};

/// Drives a product viewer session from a command script, printing frames as JSON.
#[derive(Parser, Debug)]
struct Args {
    /// Command script; reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// JSON catalog replacing the built-in product list.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, default_value_t = 1280)]
    viewport_width: u32,
    #[arg(long, default_value = "http")]
    url_scheme: String,
    #[arg(long, default_value = "")]
    user_agent: String,
    /// Answer given to the immersive-AR support probe.
    #[arg(long)]
    xr_supported: bool,
    #[arg(long)]
    pretty: bool,
    /// Used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

enum Input {
    Line(Option<String>),
    Event(Option<SessionEvent>),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = load_settings();
    if let Some(path) = args.catalog.clone() {
        settings.catalog_path = Some(path);
    }
    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin(),
    };

    let environment = EnvironmentSignals {
        viewport_width: args.viewport_width,
        url_scheme: args.url_scheme.clone(),
        user_agent: args.user_agent.clone(),
    };
    let mut runtime = ViewerRuntime::new(
        catalog,
        settings,
        environment,
        Arc::new(ConsoleHost::new(args.xr_supported)),
        JsonSurface::new(std::io::stdout(), args.pretty),
    );

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line.context("failed to read command input")?),
            event = runtime.next_event() => Input::Event(event),
        };

        let line = match input {
            Input::Event(Some(event)) => {
                runtime.dispatch(event);
                continue;
            }
            Input::Event(None) | Input::Line(None) => break,
            Input::Line(Some(line)) => line,
        };
        line_no += 1;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                warn!(line = line_no, %error, "cli: skipping invalid command");
                continue;
            }
        };

        match command {
            ScriptCommand::Event(event) => {
                if let DispatchOutcome::Rejected(reason) = runtime.dispatch(event) {
                    warn!(line = line_no, %reason, "cli: request rejected");
                }
            }
            ScriptCommand::Wait { millis } => {
                runtime.run_for(Duration::from_millis(millis)).await;
            }
            ScriptCommand::Frame => {
                let frame = runtime.controller().frame();
                println!("{}", serde_json::to_string(&frame)?);
            }
            ScriptCommand::Quit => break,
        }
    }

    info!(commands = line_no, "cli: session finished");
    Ok(())
}
