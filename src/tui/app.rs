//! TUI application state and event handling.
//!
//! The `App` struct owns the conversation controller, the index fetcher and
//! the session store, and runs the main event loop via `run()`. Network calls
//! are spawned on a background tokio runtime; their outcomes come back over a
//! channel as [`NetEvent`]s and are applied on the loop thread through the
//! explicit controller/fetcher transitions, so all state changes happen in
//! one place, in arrival order.
//!
//! Screens: a credential-gated login form and the chat view (sidebar +
//! message pane). Which one starts is the access gate's decision.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Runtime;

use super::events::{Action, poll_event};
use super::rendering::{ChatView, render_chat, render_login};
use crate::api::{ApiError, ChatRequest, ChatResponse, ConversationDetail, ConversationPage, DebateApi, HttpDebateApi};
use crate::config::ApiConfig;
use crate::controller::{ConversationController, RefreshSignal};
use crate::index::{ConversationIndexFetcher, DEFAULT_PAGE_SIZE};
use crate::session::{Access, SessionStore};

/// Outcomes of background network tasks, applied on the event-loop thread.
enum NetEvent {
    TurnFinished(Result<ChatResponse, ApiError>),
    ConversationLoaded { id: String, outcome: Result<ConversationDetail, ApiError> },
    PageFetched { page: usize, size: usize, outcome: Result<ConversationPage, ApiError> },
    KeyChecked { key: String, outcome: Result<(), ApiError> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Sidebar,
}

pub struct App {
    config: ApiConfig,
    store: SessionStore,
    api: Arc<HttpDebateApi>,
    runtime: Runtime,
    tx: Sender<NetEvent>,
    rx: Receiver<NetEvent>,

    screen: Screen,
    controller: ConversationController,
    fetcher: ConversationIndexFetcher,
    signal: RefreshSignal,

    // Chat screen state
    focus: Focus,
    input: String,
    selected_idx: usize,
    pending_conversation: Option<String>,

    // Login screen state
    login_input: String,
    login_error: Option<String>,
    login_pending: bool,

    should_quit: bool,
}

impl App {
    pub fn new(
        config: ApiConfig,
        mut store: SessionStore,
        conversation_id: Option<&str>,
    ) -> Result<Self> {
        store.init()?;

        let api = HttpDebateApi::new(config.clone(), store.get().map(str::to_string))?;
        let runtime = Runtime::new().context("Failed to start async runtime")?;
        let (tx, rx) = mpsc::channel();

        let screen = match Access::evaluate(&store, &config) {
            Access::Granted => Screen::Chat,
            Access::Loading | Access::LoginRequired => Screen::Login,
        };

        let signal = RefreshSignal::new();
        Ok(Self {
            config,
            store,
            api: Arc::new(api),
            runtime,
            tx,
            rx,
            screen,
            controller: ConversationController::new(signal.clone()),
            fetcher: ConversationIndexFetcher::new(),
            signal,
            focus: Focus::Input,
            input: String::new(),
            selected_idx: 0,
            pending_conversation: conversation_id.map(str::to_string),
            login_input: String::new(),
            login_error: None,
            login_pending: false,
            should_quit: false,
        })
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.screen == Screen::Chat {
            self.enter_chat();
        }

        while !self.should_quit {
            self.drain_net_events();

            // New-conversation signal: reload the sidebar's first page
            if self.screen == Screen::Chat && self.fetcher.take_refresh(&self.signal) {
                self.spawn_page_fetch(1);
            }

            terminal.draw(|frame| match self.screen {
                Screen::Login => render_login(
                    frame,
                    &self.login_input,
                    self.login_error.as_deref(),
                    self.login_pending,
                ),
                Screen::Chat => {
                    let view = ChatView {
                        summaries: self.fetcher.summaries(),
                        selected_idx: self.selected_idx,
                        sidebar_focused: self.focus == Focus::Sidebar,
                        sidebar_loading: self.fetcher.is_loading(),
                        sidebar_error: self.fetcher.error(),
                        has_more: self.fetcher.has_more(),
                        current_id: self.controller.conversation_id(),
                        topic: self.controller.topic(),
                        stance: self.controller.stance(),
                        messages: self.controller.messages(),
                        input: &self.input,
                        error: self.controller.error(),
                        thinking: self.controller.is_turn_in_flight()
                            || self.controller.is_loading(),
                    };
                    render_chat(frame, &view);
                }
            })?;

            let action = poll_event(Duration::from_millis(100))?;
            match self.screen {
                Screen::Login => self.handle_login_action(action),
                Screen::Chat => self.handle_chat_action(action),
            }
        }

        Ok(())
    }

    /// First things on entering the chat screen: load the sidebar and, when
    /// an id was passed on the command line, open that conversation.
    fn enter_chat(&mut self) {
        self.spawn_page_fetch(1);
        if let Some(id) = self.pending_conversation.take() {
            self.controller.begin_load();
            self.spawn_conversation_load(id);
        }
    }

    /// Apply completed network outcomes in arrival order.
    fn drain_net_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                NetEvent::TurnFinished(outcome) => self.controller.complete_turn(outcome),
                NetEvent::ConversationLoaded { id, outcome } => {
                    self.controller.apply_loaded(&id, outcome);
                }
                NetEvent::PageFetched { page, size, outcome } => {
                    self.fetcher.apply_page(page, size, outcome);
                    let len = self.fetcher.summaries().len();
                    if len > 0 && self.selected_idx >= len {
                        self.selected_idx = len - 1;
                    }
                }
                NetEvent::KeyChecked { key, outcome } => self.finish_login(key, outcome),
            }
        }
    }

    fn handle_login_action(&mut self, action: Action) {
        match action {
            Action::Quit | Action::Cancel => self.should_quit = true,
            Action::Input(c) if !self.login_pending => self.login_input.push(c),
            Action::DeleteChar if !self.login_pending => {
                self.login_input.pop();
            }
            Action::Submit if !self.login_pending => {
                if self.login_input.trim().is_empty() {
                    self.login_error = Some("Please enter an API key".to_string());
                } else {
                    self.login_pending = true;
                    self.login_error = None;
                    self.spawn_key_check(self.login_input.trim().to_string());
                }
            }
            _ => {}
        }
    }

    fn finish_login(&mut self, key: String, outcome: Result<(), ApiError>) {
        self.login_pending = false;
        match outcome {
            Ok(()) => {
                if let Err(err) = self.store.set(&key) {
                    self.login_error = Some(err.to_string());
                    return;
                }
                match HttpDebateApi::new(self.config.clone(), Some(key)) {
                    Ok(api) => {
                        self.api = Arc::new(api);
                        self.screen = Screen::Chat;
                        self.enter_chat();
                    }
                    Err(err) => self.login_error = Some(err.to_string()),
                }
            }
            Err(err) => self.login_error = Some(err.to_string()),
        }
    }

    fn handle_chat_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                if self.focus == Focus::Sidebar {
                    self.focus = Focus::Input;
                } else if !self.input.is_empty() {
                    self.input.clear();
                } else {
                    self.should_quit = true;
                }
            }
            Action::ToggleFocus => {
                self.focus =
                    if self.focus == Focus::Input { Focus::Sidebar } else { Focus::Input };
            }
            Action::NewChat => {
                self.controller.start_new();
                self.input.clear();
                self.focus = Focus::Input;
            }
            Action::Refresh => self.spawn_page_fetch(1),
            Action::LoadMore => {
                if self.fetcher.has_more() && !self.fetcher.is_loading() {
                    self.spawn_page_fetch(self.fetcher.next_page());
                }
            }
            Action::MoveUp if self.focus == Focus::Sidebar => {
                self.selected_idx = self.selected_idx.saturating_sub(1);
            }
            Action::MoveDown if self.focus == Focus::Sidebar => {
                let len = self.fetcher.summaries().len();
                if len > 0 && self.selected_idx + 1 < len {
                    self.selected_idx += 1;
                }
            }
            Action::Submit => match self.focus {
                Focus::Input => {
                    if let Some(request) = self.controller.begin_turn(&self.input) {
                        self.input.clear();
                        self.spawn_turn(request);
                    }
                }
                Focus::Sidebar => {
                    if let Some(summary) = self.fetcher.summaries().get(self.selected_idx) {
                        let id = summary.id.clone();
                        self.controller.begin_load();
                        self.spawn_conversation_load(id);
                        self.focus = Focus::Input;
                    }
                }
            },
            Action::Input(c) if self.focus == Focus::Input => self.input.push(c),
            Action::DeleteChar if self.focus == Focus::Input => {
                self.input.pop();
            }
            _ => {}
        }
    }

    fn spawn_turn(&self, request: ChatRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = api.send_chat(&request).await;
            let _ = tx.send(NetEvent::TurnFinished(outcome));
        });
    }

    fn spawn_conversation_load(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = api.get_conversation(&id).await;
            let _ = tx.send(NetEvent::ConversationLoaded { id, outcome });
        });
    }

    fn spawn_page_fetch(&mut self, page: usize) {
        self.fetcher.begin_fetch();
        let size = DEFAULT_PAGE_SIZE;
        let offset = page.saturating_sub(1) * size;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = api.list_conversations(size, offset).await;
            let _ = tx.send(NetEvent::PageFetched { page, size, outcome });
        });
    }

    fn spawn_key_check(&mut self, key: String) {
        let candidate = match HttpDebateApi::new(self.config.clone(), Some(key.clone())) {
            Ok(api) => api,
            Err(err) => {
                self.login_pending = false;
                self.login_error = Some(err.to_string());
                return;
            }
        };
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = candidate.check_health().await;
            let _ = tx.send(NetEvent::KeyChecked { key, outcome });
        });
    }
}
