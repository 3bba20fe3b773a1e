//! Terminal views. Presentation only; nothing here mutates state.

use std::path::Path;

use chainlog::query::{self, ChainStats};
use chainlog::schema::{Entry, Session, SessionRegistry};
use chainlog::session::SessionStats;
use unicode_width::UnicodeWidthStr;

/// Display width for wrapped message text in the history view.
const WRAP_WIDTH: usize = 72;
const NOTE_PREVIEW_CHARS: usize = 50;
const NOTES_SHOWN: usize = 3;
const RECAP_ENTRIES: usize = 3;
const RULE_WIDTH: usize = 50;

const EMPTY_CHAIN: &str = "the chain is empty. nothing has been recorded yet.";

pub fn chain_view(chain: &[Entry], last: Option<usize>) {
    if chain.is_empty() {
        println!("{EMPTY_CHAIN}");
        return;
    }
    for entry in query::tail(chain, last) {
        print_entry(entry);
    }
}

pub fn search_view(hits: &[&Entry], query: &str) {
    if hits.is_empty() {
        println!("no entries match \"{query}\".");
        return;
    }

    println!("{} for \"{query}\", newest first:", count_label(hits.len(), "match", "matches"));
    println!();
    for entry in hits {
        print_entry(entry);
    }
}

pub fn history_view(chain: &[Entry]) {
    if chain.is_empty() {
        println!("{EMPTY_CHAIN}");
        return;
    }

    print_heading("HISTORY");
    println!();

    println!("by day:");
    for (day, entries) in query::group_by_date(chain) {
        println!(
            "  {day}: {}",
            count_label(entries.len(), "entry", "entries")
        );
    }
    println!();

    for (label, entries) in query::group_by_session(chain) {
        match label {
            Some(number) => println!("session {number}:"),
            None => println!("unlabeled:"),
        }
        for entry in entries {
            println!("  [{}] ({})", entry.seq, entry.time);
            for line in wrap(&entry.message, WRAP_WIDTH) {
                println!("      {line}");
            }
        }
        println!();
    }
}

pub fn sessions_view(registry: &SessionRegistry) {
    if registry.sessions.is_empty() {
        println!("no sessions recorded yet.");
        return;
    }

    print_heading("SESSION HISTORY");
    println!();

    for session in &registry.sessions {
        println!("session {}", session.number);
        println!("  started: {}", session.started_at);
        println!("  last active: {}", session.last_active_at);
        println!("  messages: {}", session.message_count);
        if !session.notes.is_empty() {
            println!("  notes:");
            for note in session.notes.iter().take(NOTES_SHOWN) {
                println!("    - {}", note_preview(&note.text));
            }
            if session.notes.len() > NOTES_SHOWN {
                println!("    ... and {} more", session.notes.len() - NOTES_SHOWN);
            }
        }
        println!();
    }

    let stats = registry.stats();
    println!("{}", "-".repeat(RULE_WIDTH));
    println!("total sessions: {}", stats.total_sessions);
    println!(
        "total messages across all sessions: {}",
        stats.total_messages
    );
}

pub fn stats_view(sessions: &SessionStats, chain: &ChainStats) {
    print_heading("STATISTICS");
    println!();

    println!("sessions: {}", sessions.total_sessions);
    println!("messages across sessions: {}", sessions.total_messages);
    if let Some(first) = &sessions.first_session_started_at {
        println!("first session: {first}");
    }
    if let Some(last) = &sessions.last_session_started_at {
        println!("last session: {last}");
    }
    println!();

    println!("chain entries: {}", chain.count);
    if let Some(first) = &chain.first_time {
        println!("first entry: {first}");
    }
    if let Some(last) = &chain.last_time {
        println!("last entry: {last}");
    }
    if chain.count > 0 {
        println!(
            "message length: avg {:.1}, min {}, max {} chars",
            chain.avg_length, chain.min_length, chain.max_length
        );
        println!(
            "words longer than 3 chars: {} total, {} distinct",
            chain.total_words, chain.distinct_words
        );
    }
    if !chain.common_words.is_empty() {
        println!("most common words:");
        for (word, count) in &chain.common_words {
            println!("  {count:>4}  {word}");
        }
    }
    if !chain.per_session.is_empty() {
        println!("entries per session:");
        for (number, entries) in &chain.per_session {
            println!("  session {number}: {entries}");
        }
    }
    if let Some((number, entries)) = chain.most_active_session {
        println!(
            "most active session: {number} ({})",
            count_label(entries, "entry", "entries")
        );
    }
}

/// Printed after a successful append: the trailing entries, the counters,
/// and where the chain lives.
pub fn append_recap(chain: &[Entry], session: &Session, path: &Path) {
    println!("--- recent chain ---");
    for entry in query::tail(chain, Some(RECAP_ENTRIES)) {
        print_entry(entry);
    }
    println!("chain length: {}", chain.len());
    println!(
        "session: {} (message #{} in this session)",
        session.number, session.message_count
    );
    println!("stored at: {}", path.display());
}

fn print_entry(entry: &Entry) {
    println!("[{}] ({})", entry.seq, entry.time);
    println!("    {}", entry.message);
    println!();
}

fn print_heading(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!(" {title}");
    println!("{rule}");
}

fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn note_preview(text: &str) -> String {
    text.chars().take(NOTE_PREVIEW_CHARS).collect()
}

/// Greedy word wrap on display width. A word wider than the limit gets a
/// line of its own rather than being split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if line_width == 0 {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
