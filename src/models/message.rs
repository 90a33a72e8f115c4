use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One entry in a conversation. The service serializes the text under the
/// `message` key and the timestamp as unix milliseconds under `ts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(rename = "message")]
    pub text: String,
    pub ts: i64,
}

impl Message {
    /// Create a user message stamped with the current time.
    pub fn user_now(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into(), ts: Utc::now().timestamp_millis() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_field_names() {
        let msg = Message { role: Role::Bot, text: "Hello".to_string(), ts: 1700000000000 };
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "bot");
        assert_eq!(json["message"], "Hello");
        assert_eq!(json["ts"], 1700000000000_i64);
    }

    #[test]
    fn test_message_deserializes_service_response() {
        let json = r#"{"role":"user","message":"Should cats vote?","ts":1700000000001}"#;
        let msg: Message = serde_json::from_str(json).unwrap();

        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "Should cats vote?");
        assert_eq!(msg.ts, 1700000000001);
    }

    #[test]
    fn test_user_now_sets_role_and_text() {
        let msg = Message::user_now("hi");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "hi");
        assert!(msg.ts > 0);
    }
}
