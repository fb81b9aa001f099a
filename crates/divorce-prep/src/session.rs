use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation key tying a visitor's tool results together in storage.
///
/// Generated ids take the form `session_<unix millis>_<random>`; ids supplied by
/// clients are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "session_{}_{}",
            Utc::now().timestamp_millis(),
            &random[..9]
        ))
    }

    /// Use the caller's id when it carries any content, otherwise mint a new one.
    pub fn or_generate(supplied: Option<String>) -> Self {
        match supplied.map(|raw| raw.trim().to_string()) {
            Some(raw) if !raw.is_empty() => Self(raw),
            _ => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
