use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a conversation used by the history index and the
/// sidebar. The client only fetches these, never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub topic_name: String,
    pub bot_stance: String,
    pub title: String,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
