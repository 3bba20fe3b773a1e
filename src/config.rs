//! Store locations.

use std::path::PathBuf;

pub const CHAIN_FILE_NAME: &str = ".chainlog-chain.json";
pub const SESSIONS_FILE_NAME: &str = ".chainlog-sessions.json";

/// File locations for the two stores, passed in at construction so tests can
/// point them at temporary paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub chain_path: PathBuf,
    pub sessions_path: PathBuf,
}

impl StoreConfig {
    /// Default locations under the user's home directory, or the current
    /// directory when no home is known.
    #[must_use]
    pub fn default_locations() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            chain_path: home.join(CHAIN_FILE_NAME),
            sessions_path: home.join(SESSIONS_FILE_NAME),
        }
    }

    /// Override the chain location. The sessions file stays where it is.
    #[must_use]
    pub fn with_chain_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chain_path = path.into();
        self
    }
}

/// Directory described by the message generator's workspace clause.
#[must_use]
pub fn default_workspace_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workspace")
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn chain_override_keeps_sessions_path() {
        let config = StoreConfig::default_locations();
        let sessions_path = config.sessions_path.clone();

        let overridden = config.with_chain_path("/tmp/other-chain.json");
        assert_eq!(
            overridden.chain_path,
            std::path::PathBuf::from("/tmp/other-chain.json")
        );
        assert_eq!(overridden.sessions_path, sessions_path);
    }
}
