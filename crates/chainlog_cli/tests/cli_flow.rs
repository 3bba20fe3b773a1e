use chainlog::{ChainStore, RegistryStore, SessionIdentity, StoreConfig};
use chainlog_cli::app;
use chainlog_cli::commands::Command;
use tempfile::TempDir;

struct FixedIdentity(&'static str);

impl SessionIdentity for FixedIdentity {
    fn current_id(&self) -> String {
        self.0.to_string()
    }
}

fn store_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        chain_path: dir.path().join("chain.json"),
        sessions_path: dir.path().join("sessions.json"),
    }
}

fn append(config: &StoreConfig, identity: &dyn SessionIdentity, message: &str) {
    app::run(
        &Command::Append {
            message: Some(message.to_string()),
        },
        config,
        identity,
    );
}

#[test]
fn append_writes_both_stores() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);

    append(&config, &FixedIdentity("session-1"), "hello there");

    let chain = ChainStore::new(&config.chain_path).load();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].seq, 1);
    assert_eq!(chain[0].message, "hello there");
    assert_eq!(chain[0].session, Some(1));

    let registry = RegistryStore::new(&config.sessions_path).load();
    assert_eq!(registry.sessions.len(), 1);
    assert_eq!(registry.sessions[0].message_count, 1);
    assert_eq!(registry.current.as_deref(), Some("session-1"));
}

#[test]
fn appends_from_same_identity_share_a_session() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);
    let identity = FixedIdentity("session-1");

    append(&config, &identity, "first");
    append(&config, &identity, "second");

    let chain = ChainStore::new(&config.chain_path).load();
    let seqs: Vec<u64> = chain.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
    assert!(chain.iter().all(|entry| entry.session == Some(1)));

    let registry = RegistryStore::new(&config.sessions_path).load();
    assert_eq!(registry.sessions.len(), 1);
    assert_eq!(registry.sessions[0].message_count, 2);
}

#[test]
fn appends_from_different_identities_get_new_numbers() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);

    append(&config, &FixedIdentity("session-1"), "from the first");
    append(&config, &FixedIdentity("session-2"), "from the second");

    let chain = ChainStore::new(&config.chain_path).load();
    assert_eq!(chain[0].session, Some(1));
    assert_eq!(chain[1].session, Some(2));
}

#[test]
fn generated_append_composes_two_clauses() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);

    app::run(
        &Command::Append { message: None },
        &config,
        &FixedIdentity("session-1"),
    );

    let chain = ChainStore::new(&config.chain_path).load();
    assert_eq!(chain.len(), 1);
    assert!(chain[0].message.contains("adding:"));
}

#[test]
fn note_attaches_to_the_current_session() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);

    app::run(
        &Command::Note {
            text: "remember the override flag".to_string(),
        },
        &config,
        &FixedIdentity("session-1"),
    );

    let registry = RegistryStore::new(&config.sessions_path).load();
    let session = registry
        .find("session-1")
        .expect("note should have created and resumed the session");
    assert_eq!(session.notes.len(), 1);
    assert_eq!(session.notes[0].text, "remember the override flag");

    // A note-only invocation counts a resume but appends nothing.
    assert_eq!(session.message_count, 1);
    assert!(ChainStore::new(&config.chain_path).load().is_empty());
}

#[test]
fn read_commands_leave_no_files_behind() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);
    let identity = FixedIdentity("session-1");

    for command in [
        Command::Show { last: None },
        Command::Show { last: Some(3) },
        Command::Search {
            query: "alpha".to_string(),
        },
        Command::History,
        Command::Sessions,
        Command::Stats,
    ] {
        app::run(&command, &config, &identity);
    }

    assert!(!config.chain_path.exists());
    assert!(!config.sessions_path.exists());
}

#[test]
fn chain_override_leaves_sessions_in_place() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir).with_chain_path(dir.path().join("elsewhere.json"));

    append(&config, &FixedIdentity("session-1"), "routed");

    let chain = ChainStore::new(&config.chain_path).load();
    assert_eq!(chain.len(), 1);
    assert!(RegistryStore::new(&config.sessions_path)
        .load()
        .find("session-1")
        .is_some());
}

#[test]
fn corrupt_stores_recover_to_empty_on_append() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = store_config(&dir);
    std::fs::write(&config.chain_path, "*** not json ***").expect("corrupt chain written");
    std::fs::write(&config.sessions_path, "*** not json ***").expect("corrupt sessions written");

    append(&config, &FixedIdentity("session-1"), "fresh start");

    let chain = ChainStore::new(&config.chain_path).load();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].seq, 1);

    let registry = RegistryStore::new(&config.sessions_path).load();
    assert_eq!(registry.sessions.len(), 1);
    assert_eq!(registry.sessions[0].number, 1);
}
