//! Message generation: two clauses, each picked uniformly from a static
//! catalog, joined by a single space.

use std::path::Path;

use rand::Rng;
use walkdir::WalkDir;

/// First-clause catalog used when the chain is empty.
const OPENINGS: &[&str] = &[
    "the first mark goes here.",
    "nothing came before this.",
    "a record begins.",
    "whoever reads this: it started now.",
    "first link, placed.",
];

/// First-clause catalog once history exists. `{n}` is the chain length
/// before the new entry.
const RESPONSES: &[&str] = &[
    "{n} entries stand before this one.",
    "the chain holds {n} so far.",
    "i count {n} voices ahead of me.",
    "after {n} links, another.",
    "{n} came and went; this one stays too.",
];

/// Second-clause catalog. `{time}` and `{state}` are filled at selection.
const ADDITIONS: &[&str] = &[
    "adding: the clock reads {time}.",
    "adding: the workspace holds {state}.",
    "adding: someone will read this later.",
    "adding: nothing else changed.",
    "adding: the record keeps itself.",
    "adding: pass it on.",
    "adding: still here at {time}.",
    "adding: {state}, for the record.",
];

/// Sentinel workspace descriptor when the directory is absent.
pub const NO_WORKSPACE: &str = "no workspace";

/// Uniform choice over N options, injectable so generation is deterministic
/// under test.
pub trait Picker {
    /// Index into a catalog of `len` options. `len` is always nonzero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-rng backed picker used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

fn choose<'a>(picker: &mut dyn Picker, catalog: &'a [&'a str]) -> &'a str {
    catalog[picker.pick(catalog.len())]
}

/// Compose the message for the next entry from the chain length before the
/// append, the current timestamp, and a workspace descriptor.
#[must_use]
pub fn generate(
    chain_len: usize,
    now: &str,
    workspace: &str,
    picker: &mut dyn Picker,
) -> String {
    let first = if chain_len == 0 {
        choose(picker, OPENINGS).to_string()
    } else {
        choose(picker, RESPONSES).replace("{n}", &chain_len.to_string())
    };

    let addition = choose(picker, ADDITIONS)
        .replace("{time}", now)
        .replace("{state}", workspace);

    format!("{first} {addition}")
}

/// Describe a workspace directory as a recursive file/directory count, or
/// the sentinel when it does not exist.
#[must_use]
pub fn workspace_state(root: &Path) -> String {
    if !root.is_dir() {
        return NO_WORKSPACE.to_string();
    }

    let mut files = 0usize;
    let mut dirs = 0usize;
    for dirent in WalkDir::new(root).min_depth(1).into_iter().flatten() {
        if dirent.file_type().is_dir() {
            dirs += 1;
        } else {
            files += 1;
        }
    }

    format!("{files} files in {dirs} directories")
}
