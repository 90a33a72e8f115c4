use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::api::{DebateApi, HttpDebateApi};
use crate::config::ApiConfig;
use crate::index::{ConversationIndexFetcher, DEFAULT_PAGE_SIZE};
use crate::session::SessionStore;
use crate::tui;

#[derive(Parser)]
#[command(name = "debate-chat")]
#[command(version = "0.1.0")]
#[command(about = "Terminal client for the Debate Chatbot service", long_about = None)]
pub struct Cli {
    /// Service base URL (defaults to $DEBATE_API_URL, then localhost)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Open an existing conversation by id instead of starting fresh
    #[arg(long)]
    pub conversation: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an API key against the service and store it
    Login {
        /// Key to store; prompted for when omitted
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Forget the stored API key
    Logout,
    /// Print one page of the conversation history
    History {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Conversations per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ApiConfig::resolve(cli.api_url.as_deref());

    match cli.command {
        Some(Commands::Login { api_key }) => login(&config, api_key),
        Some(Commands::Logout) => logout(),
        Some(Commands::History { page, limit }) => history(&config, page, limit),
        None => chat(&config, cli.conversation.as_deref()),
    }
}

fn open_store() -> Result<SessionStore> {
    let mut store = SessionStore::open_default()?;
    store.init()?;
    Ok(store)
}

fn chat(config: &ApiConfig, conversation_id: Option<&str>) -> Result<()> {
    let store = open_store()?;
    tui::run_interactive(config.clone(), store, conversation_id)
}

fn login(config: &ApiConfig, api_key: Option<String>) -> Result<()> {
    let key = match api_key {
        Some(key) => key.trim().to_string(),
        None => prompt_for_key()?,
    };
    if key.is_empty() {
        bail!("Please enter an API key");
    }

    // Probe /health with the candidate key; any non-2xx means rejection
    let api = HttpDebateApi::new(config.clone(), Some(key.clone()))?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(api.check_health()).context("API key was rejected by the service")?;

    let mut store = open_store()?;
    store.set(&key)?;
    println!("API key validated and stored.");
    Ok(())
}

fn prompt_for_key() -> Result<String> {
    print!("API key: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut key = String::new();
    io::stdin().read_line(&mut key).context("Failed to read API key from stdin")?;
    Ok(key.trim().to_string())
}

fn logout() -> Result<()> {
    let mut store = open_store()?;
    store.clear()?;
    println!("Logged out.");
    Ok(())
}

fn history(config: &ApiConfig, page: usize, limit: usize) -> Result<()> {
    if page == 0 {
        bail!("Page numbers start at 1");
    }
    let store = open_store()?;
    let api = HttpDebateApi::new(config.clone(), store.get().map(str::to_string))?;

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let mut fetcher = ConversationIndexFetcher::new();
    runtime.block_on(fetcher.fetch_page(&api, page, limit));

    if let Some(err) = fetcher.error() {
        bail!("Failed to load conversations: {err}");
    }

    if fetcher.summaries().is_empty() {
        println!("No conversations yet. Start a new chat to begin.");
        return Ok(());
    }

    println!("Conversations (page {page})");
    println!("========================");
    for summary in fetcher.summaries() {
        println!(
            "{}  {} [{}] {} ({} msgs)",
            summary.updated_at.format("%Y-%m-%d %H:%M"),
            summary.id,
            summary.bot_stance,
            summary.title,
            summary.message_count,
        );
    }
    if fetcher.has_more() {
        println!();
        println!("More pages may exist; use --page {} to continue.", page + 1);
    }
    Ok(())
}
