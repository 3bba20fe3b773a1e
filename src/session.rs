//! Session registry: heuristic process-identity correlation plus tolerant
//! persistence.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::StoreError;
use crate::schema::{Session, SessionNote, SessionRegistry};

/// Strategy for naming the invoking session.
///
/// The production strategy derives from the OS parent-process id, which is a
/// correlation heuristic rather than an identity: unrelated invocations that
/// share a parent collapse into one session, and a restarted parent splits
/// one logical session in two. Both outcomes are accepted.
pub trait SessionIdentity {
    fn current_id(&self) -> String;
}

/// Parent-pid-derived identity, stable for the lifetime of one parent
/// process (one terminal, one agent run).
#[derive(Debug, Default, Clone, Copy)]
pub struct ParentProcessIdentity;

impl SessionIdentity for ParentProcessIdentity {
    fn current_id(&self) -> String {
        format!("session-{}", parent_process_id())
    }
}

#[cfg(unix)]
fn parent_process_id() -> u32 {
    std::os::unix::process::parent_id()
}

#[cfg(not(unix))]
fn parent_process_id() -> u32 {
    // No portable parent-pid lookup; the own pid still changes per run.
    std::process::id()
}

/// Aggregates over the whole registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub total_messages: u64,
    pub first_session_started_at: Option<String>,
    pub last_session_started_at: Option<String>,
}

impl SessionRegistry {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == id)
    }

    /// `total_messages` sums per-session counts; notes-only invocations keep
    /// it independent from the chain length.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total_sessions: self.sessions.len(),
            total_messages: self.sessions.iter().map(|s| s.message_count).sum(),
            first_session_started_at: self.sessions.first().map(|s| s.started_at.clone()),
            last_session_started_at: self.sessions.last().map(|s| s.started_at.clone()),
        }
    }
}

pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry; absent, unreadable, or malformed files load as the
    /// default empty registry.
    #[must_use]
    pub fn load(&self) -> SessionRegistry {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) => {
                if source.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        "unreadable sessions file {}, starting fresh: {source}",
                        self.path.display()
                    );
                }
                return SessionRegistry::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(registry) => registry,
            Err(source) => {
                warn!(
                    "malformed sessions file {}, starting fresh: {source}",
                    self.path.display()
                );
                SessionRegistry::default()
            }
        }
    }

    pub fn persist(&self, registry: &SessionRegistry) -> Result<(), StoreError> {
        let rendered = serde_json::to_string_pretty(registry)
            .map_err(|source| StoreError::serialize("session registry", &self.path, source))?;
        fs::write(&self.path, rendered)
            .map_err(|source| StoreError::io("writing sessions file", &self.path, source))
    }

    /// Resume the session named by `id`, or create it.
    ///
    /// Resuming bumps `last_active_at` and counts one more message. Creation
    /// assigns the next 1-based number, marks the session current, and starts
    /// its count at one. Both paths persist before returning.
    pub fn resume_or_create(
        &self,
        registry: &mut SessionRegistry,
        id: &str,
        now: &str,
    ) -> Result<Session, StoreError> {
        if let Some(session) = registry
            .sessions
            .iter_mut()
            .find(|session| session.id == id)
        {
            session.last_active_at = now.to_string();
            session.message_count += 1;
            let resumed = session.clone();
            self.persist(registry)?;
            debug!("resumed session {} ({})", resumed.number, resumed.id);
            return Ok(resumed);
        }

        let session = Session {
            id: id.to_string(),
            number: registry.sessions.len() as u64 + 1,
            started_at: now.to_string(),
            last_active_at: now.to_string(),
            message_count: 1,
            notes: Vec::new(),
        };
        registry.sessions.push(session.clone());
        registry.current = Some(id.to_string());
        self.persist(registry)?;
        debug!("created session {} ({})", session.number, session.id);
        Ok(session)
    }

    /// Attach a note to `id`'s session.
    ///
    /// Returns `Ok(false)` when no such session exists; a note never creates
    /// a session implicitly. Callers wanting a note on a fresh session resume
    /// first.
    pub fn add_note(
        &self,
        registry: &mut SessionRegistry,
        id: &str,
        text: &str,
        now: &str,
    ) -> Result<bool, StoreError> {
        let Some(session) = registry
            .sessions
            .iter_mut()
            .find(|session| session.id == id)
        else {
            return Ok(false);
        };

        session.notes.push(SessionNote {
            time: now.to_string(),
            text: text.to_string(),
        });
        self.persist(registry)?;
        Ok(true)
    }
}
