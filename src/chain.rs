//! Chain persistence: tolerant full-file load, pretty-printed full-file
//! rewrite on every append.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::StoreError;
use crate::schema::Entry;

pub struct ChainStore {
    path: PathBuf,
}

impl ChainStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted chain.
    ///
    /// An absent, unreadable, or malformed file loads as an empty chain.
    /// Availability wins over strict validation for this store; recovery is
    /// logged, never surfaced.
    #[must_use]
    pub fn load(&self) -> Vec<Entry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) => {
                if source.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        "unreadable chain file {}, starting empty: {source}",
                        self.path.display()
                    );
                }
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(chain) => chain,
            Err(source) => {
                warn!(
                    "malformed chain file {}, starting empty: {source}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Append one entry and rewrite the whole file.
    ///
    /// The sequence number is assigned here: 1 + the current chain length.
    /// The write is a plain overwrite with no rename step; a crash mid-write
    /// leaves a file the next `load` treats as empty.
    pub fn append_and_persist(
        &self,
        chain: &mut Vec<Entry>,
        message: impl Into<String>,
        time: impl Into<String>,
        session: Option<u64>,
    ) -> Result<Entry, StoreError> {
        let entry = Entry::new(chain.len() as u64 + 1, time, message, session);
        chain.push(entry.clone());
        self.persist(chain)?;
        debug!(
            "appended entry {} to {}",
            entry.seq,
            self.path.display()
        );
        Ok(entry)
    }

    /// Serialize the full chain back to disk, pretty-printed so the file
    /// stays readable and diffable.
    pub fn persist(&self, chain: &[Entry]) -> Result<(), StoreError> {
        let rendered = serde_json::to_string_pretty(chain)
            .map_err(|source| StoreError::serialize("chain", &self.path, source))?;
        fs::write(&self.path, rendered)
            .map_err(|source| StoreError::io("writing chain file", &self.path, source))
    }
}
