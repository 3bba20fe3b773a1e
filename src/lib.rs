//! Append-only message chain with session memory.
//!
//! Two independent JSON files back the system: the chain, an ordered array
//! of entries, and the session registry. Both are read fully on every
//! invocation, rewritten fully on every mutation, and recover from absent or
//! corrupt files by starting empty. Invocations are correlated into sessions
//! through a parent-process-id heuristic.
//!
//! No locking, no atomic rename, no cross-store transaction: one invocation
//! at a time is the operating model, and an interruption between the two
//! store writes may leave them inconsistent.

pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod generate;
pub mod query;
pub mod schema;
pub mod session;

pub use chain::ChainStore;
pub use config::StoreConfig;
pub use error::StoreError;
pub use generate::{generate, workspace_state, Picker, RandomPicker};
pub use query::{
    chain_statistics, group_by_date, group_by_session, search, tail, ChainStats, UNKNOWN_DATE,
};
pub use schema::{Entry, Session, SessionNote, SessionRegistry};
pub use session::{ParentProcessIdentity, RegistryStore, SessionIdentity, SessionStats};
