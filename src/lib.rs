//! debate-chat - terminal client for the Debate Chatbot service
//!
//! This library implements the client-side state synchronization for a
//! turn-based debate chat:
//!
//! - Sending turns and reconciling the local message list against the
//!   service's authoritative reply, with optimistic-update rollback
//! - API-key session handling and credential-gated access
//! - Paginated retrieval of the conversation index
//! - Best-effort topic/stance extraction from bot reply text
//!
//! # Example
//!
//! ```no_run
//! use debate_chat::api::HttpDebateApi;
//! use debate_chat::config::ApiConfig;
//! use debate_chat::controller::{ConversationController, RefreshSignal};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = HttpDebateApi::new(ApiConfig::resolve(None), None)?;
//! let mut controller = ConversationController::new(RefreshSignal::new());
//! controller.send_turn(&api, "Should social media be regulated?").await;
//! println!("stance: {:?}", controller.stance());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod extract;
pub mod index;
pub mod models;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use api::{ApiError, ChatRequest, ChatResponse, DebateApi, HttpDebateApi};
pub use config::ApiConfig;
pub use controller::{ConversationController, RefreshSignal};
pub use extract::extract_topic_stance;
pub use index::ConversationIndexFetcher;
pub use models::{ConversationSummary, Message, Role};
pub use session::{Access, SessionStore};
