//! Fallback extraction of topic/stance metadata from bot reply text.
//!
//! Newer service builds return `topic` and `stance` as structured response
//! fields; older ones only embed them in the opening bot message as
//! `Topic: ...` / `Stance: ...` lines. This module recovers them from that
//! text. Best-effort only: it never fails and never touches the messages, it
//! just derives display metadata.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Message, Role};

static TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Topic:\s*([^\n]+)").expect("topic pattern compiles"));
static STANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stance:\s*([^\n]+)").expect("stance pattern compiles"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StanceTopic {
    pub topic: Option<String>,
    pub stance: Option<String>,
}

/// Scan the first bot message for `Topic:` / `Stance:` markers. Without the
/// `Topic:` marker both fields stay unset; with it, each value is the rest of
/// its line, trimmed.
pub fn extract_topic_stance(messages: &[Message]) -> StanceTopic {
    let Some(first_bot) = messages.iter().find(|m| m.role == Role::Bot) else {
        return StanceTopic::default();
    };
    if !first_bot.text.contains("Topic:") {
        return StanceTopic::default();
    }

    let capture = |re: &Regex| {
        re.captures(&first_bot.text).map(|caps| caps[1].trim().to_string())
    };

    StanceTopic { topic: capture(&TOPIC_RE), stance: capture(&STANCE_RE) }
}
