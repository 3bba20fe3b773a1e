//! Read-only views over a loaded chain. Nothing here touches disk.

use std::collections::{BTreeMap, HashMap};

use crate::clock;
use crate::schema::Entry;

/// Bucket name for entries whose timestamp has no parseable calendar day.
pub const UNKNOWN_DATE: &str = "unknown";

/// Last `n` entries in original order; `None` means the whole chain.
#[must_use]
pub fn tail(chain: &[Entry], n: Option<usize>) -> &[Entry] {
    match n {
        Some(n) => &chain[chain.len().saturating_sub(n)..],
        None => chain,
    }
}

/// Case-insensitive substring match over messages: the last `limit` matches
/// in chain order, returned most recent first.
#[must_use]
pub fn search<'a>(chain: &'a [Entry], query: &str, limit: usize) -> Vec<&'a Entry> {
    let needle = query.to_lowercase();
    let mut matches: Vec<&Entry> = chain
        .iter()
        .filter(|entry| entry.message.to_lowercase().contains(&needle))
        .collect();

    let mut recent = matches.split_off(matches.len().saturating_sub(limit));
    recent.reverse();
    recent
}

/// Entries grouped by session label, append order preserved within each
/// group. Unlabeled entries group under `None`, which sorts first.
#[must_use]
pub fn group_by_session(chain: &[Entry]) -> BTreeMap<Option<u64>, Vec<&Entry>> {
    let mut groups: BTreeMap<Option<u64>, Vec<&Entry>> = BTreeMap::new();
    for entry in chain {
        groups.entry(entry.session).or_default().push(entry);
    }
    groups
}

/// Entries grouped by the calendar day of their timestamp; unparseable
/// timestamps fall into the [`UNKNOWN_DATE`] bucket.
#[must_use]
pub fn group_by_date(chain: &[Entry]) -> BTreeMap<String, Vec<&Entry>> {
    let mut groups: BTreeMap<String, Vec<&Entry>> = BTreeMap::new();
    for entry in chain {
        let day = clock::date_prefix(&entry.time).unwrap_or(UNKNOWN_DATE);
        groups.entry(day.to_string()).or_default().push(entry);
    }
    groups
}

/// Aggregate statistics over the whole chain.
///
/// Word accounting is deliberately approximate: split on whitespace,
/// lowercase, keep only words longer than 3 characters. No punctuation
/// stripping.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    pub count: usize,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    pub avg_length: f64,
    pub min_length: usize,
    pub max_length: usize,
    /// Up to ten `(word, count)` pairs, most frequent first; ties break
    /// lexicographically.
    pub common_words: Vec<(String, u64)>,
    pub distinct_words: usize,
    pub total_words: u64,
    pub per_session: BTreeMap<u64, usize>,
    /// `(session number, entry count)` of the busiest labeled session; ties
    /// go to the lower number.
    pub most_active_session: Option<(u64, usize)>,
}

#[must_use]
pub fn chain_statistics(chain: &[Entry]) -> ChainStats {
    let count = chain.len();
    let lengths: Vec<usize> = chain
        .iter()
        .map(|entry| entry.message.chars().count())
        .collect();
    let total_length: usize = lengths.iter().sum();
    let avg_length = if count == 0 {
        0.0
    } else {
        total_length as f64 / count as f64
    };

    let mut frequencies: HashMap<String, u64> = HashMap::new();
    let mut total_words = 0u64;
    for entry in chain {
        for word in entry.message.split_whitespace() {
            let folded = word.to_lowercase();
            if folded.chars().count() > 3 {
                *frequencies.entry(folded).or_insert(0) += 1;
                total_words += 1;
            }
        }
    }

    let distinct_words = frequencies.len();
    let mut common_words: Vec<(String, u64)> = frequencies.into_iter().collect();
    common_words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    common_words.truncate(10);

    let mut per_session: BTreeMap<u64, usize> = BTreeMap::new();
    for entry in chain {
        if let Some(number) = entry.session {
            *per_session.entry(number).or_insert(0) += 1;
        }
    }
    let most_active_session = per_session
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(number, entries)| (*number, *entries));

    ChainStats {
        count,
        first_time: chain.first().map(|entry| entry.time.clone()),
        last_time: chain.last().map(|entry| entry.time.clone()),
        avg_length,
        min_length: lengths.iter().copied().min().unwrap_or(0),
        max_length: lengths.iter().copied().max().unwrap_or(0),
        common_words,
        distinct_words,
        total_words,
        per_session,
        most_active_session,
    }
}
