//! page-assistant CLI
//!
//! Drives a Chrome tab for area selection and talks to the AI Scanner backend.

use anyhow::Context;
use clap::{Parser, Subcommand};
use page_assistant::{Assistant, AssistantConfig, BrowserSession, ConnectionOptions, LaunchOptions, ScannerBackend,
                     ScannerClient, SelectionOutcome, SelectionRect, extract, widget::Role};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "page-assistant")]
#[command(version)]
#[command(about = "Select part of a web page and ask an AI about it", long_about = None)]
struct Cli {
    /// Base URL of the AI Scanner backend
    #[arg(long, global = true, value_name = "URL", default_value = page_assistant::DEFAULT_API_BASE)]
    api_base: String,

    /// Launch browser in headed mode (selection is always headed)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, global = true, value_name = "PATH")]
    executable_path: Option<String>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, global = true, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Skip the /health probe before backend requests
    #[arg(long, global = true)]
    no_health_check: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a page, drag-select an area, then chat about it on stdin
    Select { url: String },

    /// Print the content of a fixed rectangle as JSON
    Extract {
        url: String,

        /// Selection edges in CSS pixels: LEFT,TOP,RIGHT,BOTTOM
        #[arg(long, value_parser = parse_rect)]
        rect: SelectionRect,
    },

    /// Ask a question, optionally about a scanned page
    Ask {
        question: String,

        /// Scan this page first and ask about it
        #[arg(long)]
        url: Option<String>,
    },

    /// Scan a whole page through the backend
    Scan { url: String },

    /// Check that the backend is reachable
    Health,
}

fn parse_rect(value: &str) -> Result<SelectionRect, String> {
    let edges = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| format!("invalid edge '{}': {}", part, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match edges.as_slice() {
        [left, top, right, bottom] => Ok(SelectionRect::from_points(
            page_assistant::selection::Point::new(*left, *top),
            page_assistant::selection::Point::new(*right, *bottom),
        )),
        _ => Err(format!("expected LEFT,TOP,RIGHT,BOTTOM, got {} values", edges.len())),
    }
}

impl Cli {
    fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig::new()
            .api_base(self.api_base.clone())
            .health_check(!self.no_health_check)
    }

    fn browser(&self, headless: bool) -> anyhow::Result<BrowserSession> {
        if let Some(ref endpoint) = self.ws_endpoint {
            eprintln!("Connecting to browser at {}", endpoint);
            return Ok(BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))?);
        }

        let mut options = LaunchOptions::new().headless(headless);
        if let Some(ref path) = self.executable_path {
            options = options.chrome_path(path);
        }
        BrowserSession::launch(options).context("Failed to launch browser")
    }
}

fn print_since<B: ScannerBackend>(assistant: &Assistant<B>, from: usize) -> usize {
    for message in assistant.conversation().since(from) {
        let who = match message.role {
            Role::User => "you",
            Role::Bot => "assistant",
        };
        println!("[{}] {}\n", who, message.content);
    }
    assistant.conversation().len()
}

async fn select(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let config = cli.assistant_config();
    let mut assistant = Assistant::new(&config, ScannerClient::new(&config)?)?;
    let session = cli.browser(false)?;
    session.open(url).with_context(|| format!("Failed to open {}", url))?;
    assistant.set_current_url(url);

    let mut printed = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprintln!("Drag over the page to select an area, then press Analyze Selection (Escape cancels).");
        assistant.start_selection()?;
        let outcome = {
            let overlay = session.start_overlay()?;
            tokio::task::block_in_place(|| overlay.run(assistant.tracker_mut(), POLL_INTERVAL))?
        };
        assistant.finish_selection(outcome);

        if let SelectionOutcome::Confirmed(_) = outcome {
            let snapshot = session.snapshot()?;
            if let Err(e) = assistant.confirm_selection(&snapshot).await {
                log::warn!("{}", e);
            }
        }
        printed = print_since(&assistant, printed);

        eprintln!("Ask a question, /select to select again, or an empty line to quit.");
        loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match line.trim() {
                "" | "/quit" => return Ok(()),
                "/select" => break,
                question => {
                    if let Err(e) = assistant.send_message(question).await {
                        log::warn!("{}", e);
                    }
                    printed = print_since(&assistant, printed);
                }
            }
        }
    }
}

fn extract_rect(cli: &Cli, url: &str, rect: &SelectionRect) -> anyhow::Result<()> {
    let session = cli.browser(!cli.headed)?;
    session.open(url).with_context(|| format!("Failed to open {}", url))?;
    let snapshot = session.snapshot()?;
    let result = extract(&snapshot, rect);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn ask(cli: &Cli, question: &str, url: Option<&str>) -> anyhow::Result<()> {
    let config = cli.assistant_config();
    let mut assistant = Assistant::new(&config, ScannerClient::new(&config)?)?;
    if let Some(url) = url {
        assistant.scan_page(url).await?;
    }
    let result = assistant.ask(question).await;
    print_since(&assistant, 0);
    Ok(result?)
}

async fn scan(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let config = cli.assistant_config();
    let mut assistant = Assistant::new(&config, ScannerClient::new(&config)?)?;
    let result = assistant.scan_page(url).await;
    print_since(&assistant, 0);
    result?;
    Ok(())
}

async fn health(cli: &Cli) -> anyhow::Result<()> {
    let client = ScannerClient::new(&cli.assistant_config())?;
    client.health().await?;
    println!("Backend is reachable at {}", client.base());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Select { url } => select(&cli, url).await,
        Command::Extract { url, rect } => extract_rect(&cli, url, rect),
        Command::Ask { question, url } => ask(&cli, question, url.as_deref()).await,
        Command::Scan { url } => scan(&cli, url).await,
        Command::Health => health(&cli).await,
    }
}
