//! Conversation state machine.
//!
//! [`ConversationController`] owns the local view of one conversation and
//! keeps it consistent with the service across asynchronous turns. The core
//! transitions are synchronous and explicit: `begin_turn` applies the
//! optimistic append and produces the outgoing request, `complete_turn`
//! reconciles the authoritative reply or rolls back. The async `send_turn` /
//! `load_conversation` conveniences drive those transitions through a
//! [`DebateApi`]; event-loop callers instead issue the request themselves and
//! feed the outcome back when it arrives.
//!
//! Known race, kept on purpose: the in-flight flag only prevents overlapping
//! turns. A conversation load can still resolve while a turn is pending, and
//! whichever response arrives last wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{ApiError, ChatRequest, ChatResponse, ConversationDetail, DebateApi};
use crate::extract::extract_topic_stance;
use crate::models::Message;

/// Counter bumped when a new conversation is created, prompting the index
/// fetcher to reload its first page. Consumers remember the last version they
/// acted on.
#[derive(Debug, Clone, Default)]
pub struct RefreshSignal(Arc<AtomicU64>);

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn version(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct ConversationController {
    messages: Vec<Message>,
    conversation_id: Option<String>,
    topic: Option<String>,
    stance: Option<String>,
    error: Option<String>,
    turn_in_flight: bool,
    loading: bool,
    refresh: RefreshSignal,
}

impl ConversationController {
    pub fn new(refresh: RefreshSignal) -> Self {
        Self {
            messages: Vec::new(),
            conversation_id: None,
            topic: None,
            stance: None,
            error: None,
            turn_in_flight: false,
            loading: false,
            refresh,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn stance(&self) -> Option<&str> {
        self.stance.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A turn is awaiting its reply.
    pub fn is_turn_in_flight(&self) -> bool {
        self.turn_in_flight
    }

    /// A conversation load is awaiting its reply.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a turn: append the provisional user message and build the
    /// outgoing request. Returns `None` when the text is empty after trimming
    /// or another turn is already in flight.
    ///
    /// On the first turn of a fresh conversation (no id assigned) any stale
    /// topic/stance is cleared and the trimmed text doubles as the topic
    /// seed. Once an id exists it is sent instead and `topic` is never set
    /// again.
    pub fn begin_turn(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.turn_in_flight {
            return None;
        }

        if self.conversation_id.is_none() {
            self.topic = None;
            self.stance = None;
        }

        self.messages.push(Message::user_now(text));
        self.error = None;
        self.turn_in_flight = true;

        Some(ChatRequest {
            conversation_id: self.conversation_id.clone(),
            message: text.to_string(),
            topic: if self.conversation_id.is_none() { Some(text.to_string()) } else { None },
        })
    }

    /// Reconcile the outcome of the turn started by [`begin_turn`].
    ///
    /// Success replaces the whole local message list with the server's
    /// authoritative list (the provisional entry is discarded in favor of
    /// server truth), adopts the returned id on first contact and bumps the
    /// refresh signal. Failure rolls back exactly the provisional message and
    /// records a displayable error; nothing is retried.
    pub fn complete_turn(&mut self, outcome: Result<ChatResponse, ApiError>) {
        self.turn_in_flight = false;

        match outcome {
            Ok(response) => {
                if self.conversation_id.is_none() {
                    self.conversation_id = Some(response.conversation_id);
                    self.refresh.bump();
                }
                self.messages = response.messages;
                self.adopt_metadata(response.topic, response.stance);
            }
            Err(err) => {
                self.messages.pop();
                self.error = Some(err.to_string());
            }
        }
    }

    /// Mark a conversation load as started. Deliberately not guarded by the
    /// in-flight flag; see the module docs on the accepted race.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a conversation load. Success replaces messages,
    /// topic and stance and adopts `id` as current; failure records an error
    /// and leaves prior state untouched (nothing was optimistically mutated).
    pub fn apply_loaded(&mut self, id: &str, outcome: Result<ConversationDetail, ApiError>) {
        self.loading = false;

        match outcome {
            Ok(detail) => {
                self.messages = detail.messages;
                self.conversation_id = Some(id.to_string());
                self.adopt_metadata(detail.topic, detail.stance);
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Reset all local state for a fresh conversation. Does not contact the
    /// service.
    pub fn start_new(&mut self) {
        self.messages.clear();
        self.conversation_id = None;
        self.topic = None;
        self.stance = None;
        self.error = None;
    }

    /// Convenience driver: `begin_turn` -> remote call -> `complete_turn`.
    /// Returns whether a turn was actually issued.
    pub async fn send_turn(&mut self, api: &dyn DebateApi, text: &str) -> bool {
        let Some(request) = self.begin_turn(text) else {
            return false;
        };
        let outcome = api.send_chat(&request).await;
        self.complete_turn(outcome);
        true
    }

    /// Convenience driver for loading an existing conversation by id.
    pub async fn load_conversation(&mut self, api: &dyn DebateApi, id: &str) {
        if id.is_empty() {
            return;
        }
        self.begin_load();
        let outcome = api.get_conversation(id).await;
        self.apply_loaded(id, outcome);
    }

    /// Take structured metadata when the service sent it, fall back to
    /// scanning the bot reply otherwise. Empty strings count as absent, and
    /// a field with no new value keeps its previous one.
    fn adopt_metadata(&mut self, topic: Option<String>, stance: Option<String>) {
        let mut topic = topic.filter(|s| !s.trim().is_empty());
        let mut stance = stance.filter(|s| !s.trim().is_empty());

        if topic.is_none() || stance.is_none() {
            let extracted = extract_topic_stance(&self.messages);
            topic = topic.or(extracted.topic);
            stance = stance.or(extracted.stance);
        }

        if topic.is_some() {
            self.topic = topic;
        }
        if stance.is_some() {
            self.stance = stance;
        }
    }
}
