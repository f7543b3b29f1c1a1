//! Session state derived from the refresh slot.

use serde::{Deserialize, Serialize};

/// Per-subject session state
///
/// There is no stored state machine: a session is `Authenticated` exactly
/// when the slot holds a refresh token equal to the one presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    /// Derive the state from the stored slot and the presented token
    pub fn from_slot(stored: Option<&str>, presented: &str) -> Self {
        match stored {
            Some(current) if current.as_bytes() == presented.as_bytes() => {
                SessionState::Authenticated
            }
            _ => SessionState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}
