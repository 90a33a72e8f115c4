//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use debate_chat::api::{
    ApiError, ChatRequest, ChatResponse, ConversationDetail, ConversationPage, DebateApi,
};
use debate_chat::models::{ConversationSummary, Message, Role};

/// Scripted stand-in for the HTTP client. Each call pops the next queued
/// outcome for its endpoint and records the request it received.
pub struct MockApi {
    chat_outcomes: Mutex<VecDeque<Result<ChatResponse, ApiError>>>,
    detail_outcomes: Mutex<VecDeque<Result<ConversationDetail, ApiError>>>,
    page_outcomes: Mutex<VecDeque<Result<ConversationPage, ApiError>>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub detail_requests: Mutex<Vec<String>>,
    pub page_requests: Mutex<Vec<(usize, usize)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            chat_outcomes: Mutex::new(VecDeque::new()),
            detail_outcomes: Mutex::new(VecDeque::new()),
            page_outcomes: Mutex::new(VecDeque::new()),
            chat_requests: Mutex::new(Vec::new()),
            detail_requests: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_chat(&self, outcome: Result<ChatResponse, ApiError>) {
        self.chat_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn queue_detail(&self, outcome: Result<ConversationDetail, ApiError>) {
        self.detail_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn queue_page(&self, outcome: Result<ConversationPage, ApiError>) {
        self.page_outcomes.lock().unwrap().push_back(outcome);
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DebateApi for MockApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error("no chat outcome queued")))
    }

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ApiError> {
        self.detail_requests.lock().unwrap().push(id.to_string());
        self.detail_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error("no detail outcome queued")))
    }

    async fn list_conversations(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<ConversationPage, ApiError> {
        self.page_requests.lock().unwrap().push((limit, offset));
        self.page_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error("no page outcome queued")))
    }

    async fn check_health(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

pub fn server_error(body: &str) -> ApiError {
    ApiError::Status { status: 500, body: body.to_string() }
}

pub fn bot_message(text: &str) -> Message {
    Message { role: Role::Bot, text: text.to_string(), ts: 1_700_000_000_000 }
}

pub fn user_message(text: &str) -> Message {
    Message { role: Role::User, text: text.to_string(), ts: 1_700_000_000_000 }
}

/// A chat response carrying the full transcript plus optional metadata.
pub fn chat_response(
    id: &str,
    messages: Vec<Message>,
    topic: Option<&str>,
    stance: Option<&str>,
) -> ChatResponse {
    ChatResponse {
        conversation_id: id.to_string(),
        messages,
        topic: topic.map(str::to_string),
        stance: stance.map(str::to_string),
    }
}

pub fn detail(
    messages: Vec<Message>,
    topic: Option<&str>,
    stance: Option<&str>,
) -> ConversationDetail {
    ConversationDetail {
        messages,
        topic: topic.map(str::to_string),
        stance: stance.map(str::to_string),
    }
}

pub fn summary(id: &str, title: &str) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        topic_name: "climate policy".to_string(),
        bot_stance: "pro".to_string(),
        title: title.to_string(),
        message_count: 4,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn page_of(summaries: Vec<ConversationSummary>, total: usize) -> ConversationPage {
    ConversationPage {
        total,
        page: 1,
        limit: summaries.len(),
        conversations: summaries,
    }
}
