//! Flag surface and command resolution.

use std::path::PathBuf;

use clap::Parser;

/// Fallback for `--last` when the value does not parse as a count.
pub const DEFAULT_LAST: usize = 5;

/// Cap on `--search` results.
pub const SEARCH_LIMIT: usize = 10;

/// chainlog — an append-only message chain with session memory.
///
/// With no arguments, appends a generated message. With message text,
/// appends it verbatim. Everything else is a read-only view.
#[derive(Debug, Parser)]
#[command(name = "chainlog", version)]
pub struct Cli {
    /// Message text to append; generated when omitted.
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,

    /// Print the entire chain.
    #[arg(long)]
    pub show: bool,

    /// Print the last N entries.
    #[arg(long, value_name = "N")]
    pub last: Option<String>,

    /// Print entries matching a case-insensitive substring, newest first.
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print the chain grouped by day, then by session.
    #[arg(long)]
    pub history: bool,

    /// Print every recorded session with its notes.
    #[arg(long)]
    pub sessions: bool,

    /// Attach a note to the current session.
    #[arg(long, value_name = "TEXT")]
    pub note: Option<String>,

    /// Print combined session and chain statistics.
    #[arg(long)]
    pub stats: bool,

    /// Use a different chain file for this invocation.
    #[arg(long, value_name = "PATH")]
    pub chain: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append { message: Option<String> },
    Show { last: Option<usize> },
    Search { query: String },
    History,
    Sessions,
    Note { text: String },
    Stats,
}

impl Cli {
    /// Which operation this invocation runs.
    ///
    /// Session commands win over chain views, chain views win over the
    /// default append. A `--last` value that is not a count falls back to
    /// [`DEFAULT_LAST`] rather than aborting.
    #[must_use]
    pub fn command(&self) -> Command {
        if self.sessions {
            return Command::Sessions;
        }
        if let Some(text) = &self.note {
            return Command::Note { text: text.clone() };
        }
        if self.stats {
            return Command::Stats;
        }
        if let Some(query) = &self.search {
            return Command::Search {
                query: query.clone(),
            };
        }
        if self.history {
            return Command::History;
        }
        if let Some(raw) = &self.last {
            let n = raw.parse().unwrap_or(DEFAULT_LAST);
            return Command::Show { last: Some(n) };
        }
        if self.show {
            return Command::Show { last: None };
        }

        let message = if self.message.is_empty() {
            None
        } else {
            Some(self.message.join(" "))
        };
        Command::Append { message }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, DEFAULT_LAST};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).expect("args should parse")
    }

    #[test]
    fn bare_invocation_appends_generated_message() {
        assert_eq!(
            parse(&["chainlog"]).command(),
            Command::Append { message: None }
        );
    }

    #[test]
    fn positional_words_join_into_one_message() {
        assert_eq!(
            parse(&["chainlog", "hello", "there"]).command(),
            Command::Append {
                message: Some("hello there".to_string())
            }
        );
    }

    #[test]
    fn show_prints_whole_chain() {
        assert_eq!(
            parse(&["chainlog", "--show"]).command(),
            Command::Show { last: None }
        );
    }

    #[test]
    fn last_parses_count() {
        assert_eq!(
            parse(&["chainlog", "--last", "3"]).command(),
            Command::Show { last: Some(3) }
        );
    }

    #[test]
    fn last_with_bad_value_falls_back() {
        assert_eq!(
            parse(&["chainlog", "--last", "soon"]).command(),
            Command::Show {
                last: Some(DEFAULT_LAST)
            }
        );
    }

    #[test]
    fn last_wins_over_show() {
        assert_eq!(
            parse(&["chainlog", "--show", "--last", "2"]).command(),
            Command::Show { last: Some(2) }
        );
    }

    #[test]
    fn search_wins_over_chain_views() {
        assert_eq!(
            parse(&["chainlog", "--show", "--search", "alpha"]).command(),
            Command::Search {
                query: "alpha".to_string()
            }
        );
    }

    #[test]
    fn sessions_wins_over_everything_else() {
        assert_eq!(
            parse(&["chainlog", "--sessions", "--stats", "--show"]).command(),
            Command::Sessions
        );
    }

    #[test]
    fn note_requires_text() {
        assert!(Cli::try_parse_from(["chainlog", "--note"]).is_err());
    }

    #[test]
    fn search_requires_query() {
        assert!(Cli::try_parse_from(["chainlog", "--search"]).is_err());
    }

    #[test]
    fn chain_override_is_carried() {
        let cli = parse(&["chainlog", "--chain", "/tmp/elsewhere.json", "--show"]);
        assert_eq!(
            cli.chain,
            Some(std::path::PathBuf::from("/tmp/elsewhere.json"))
        );
    }
}
