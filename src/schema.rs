//! Persisted record types for the chain and the session registry.
//!
//! Optional fields carry serde defaults so partially written or older files
//! resolve once at load time instead of at every access site.

use serde::{Deserialize, Serialize};

/// One record in the chain.
///
/// `seq` equals 1 + the count of entries preceding it at append time and is
/// never reassigned. `session` is a label referencing a session by number,
/// not an ownership link; losing the registry leaves the chain intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub seq: u64,
    pub time: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<u64>,
}

impl Entry {
    #[must_use]
    pub fn new(
        seq: u64,
        time: impl Into<String>,
        message: impl Into<String>,
        session: Option<u64>,
    ) -> Self {
        Self {
            seq,
            time: time.into(),
            message: message.into(),
            session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNote {
    pub time: String,
    pub text: String,
}

/// One correlated run of invocations.
///
/// `number` is assigned at first appearance and never reassigned.
/// `message_count` counts write-operation resumes, not chain entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub number: u64,
    pub started_at: String,
    pub last_active_at: String,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub notes: Vec<SessionNote>,
}

/// Top-level persisted registry object. Sessions stay in order of first
/// appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRegistry {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub current: Option<String>,
}
