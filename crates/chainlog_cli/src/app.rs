//! Command dispatch against the stores.

use chainlog::config::{self, StoreConfig};
use chainlog::{clock, generate, query};
use chainlog::{ChainStore, RandomPicker, RegistryStore, SessionIdentity, StoreError};

use crate::commands::{Command, SEARCH_LIMIT};
use crate::render;

/// Run one command to completion.
///
/// Every path prints to stdout and returns. A store write failure surfaces
/// as one stderr line; there is no failing exit and no panic.
pub fn run(command: &Command, config: &StoreConfig, identity: &dyn SessionIdentity) {
    let chain_store = ChainStore::new(&config.chain_path);
    let registry_store = RegistryStore::new(&config.sessions_path);

    let outcome = match command {
        Command::Show { last } => {
            render::chain_view(&chain_store.load(), *last);
            Ok(())
        }
        Command::Search { query } => {
            let chain = chain_store.load();
            let hits = query::search(&chain, query, SEARCH_LIMIT);
            render::search_view(&hits, query);
            Ok(())
        }
        Command::History => {
            render::history_view(&chain_store.load());
            Ok(())
        }
        Command::Sessions => {
            render::sessions_view(&registry_store.load());
            Ok(())
        }
        Command::Stats => {
            let chain = chain_store.load();
            let registry = registry_store.load();
            render::stats_view(&registry.stats(), &query::chain_statistics(&chain));
            Ok(())
        }
        Command::Note { text } => note(&registry_store, identity, text),
        Command::Append { message } => {
            append(&chain_store, &registry_store, identity, message.as_deref())
        }
    };

    if let Err(err) = outcome {
        eprintln!("chainlog: {err}");
    }
}

fn append(
    chain_store: &ChainStore,
    registry_store: &RegistryStore,
    identity: &dyn SessionIdentity,
    message: Option<&str>,
) -> Result<(), StoreError> {
    let mut chain = chain_store.load();
    let now = clock::now_stamp()?;

    let mut registry = registry_store.load();
    let session = registry_store.resume_or_create(&mut registry, &identity.current_id(), &now)?;

    let message = match message {
        Some(text) => text.to_string(),
        None => {
            let workspace = generate::workspace_state(&config::default_workspace_root());
            generate::generate(chain.len(), &now, &workspace, &mut RandomPicker)
        }
    };

    chain_store.append_and_persist(&mut chain, message, now, Some(session.number))?;
    render::append_recap(&chain, &session, chain_store.path());
    Ok(())
}

fn note(
    registry_store: &RegistryStore,
    identity: &dyn SessionIdentity,
    text: &str,
) -> Result<(), StoreError> {
    let now = clock::now_stamp()?;
    let id = identity.current_id();

    let mut registry = registry_store.load();
    // A note never creates a session on its own, so resume first.
    registry_store.resume_or_create(&mut registry, &id, &now)?;

    if registry_store.add_note(&mut registry, &id, text, &now)? {
        println!("note added: {text}");
    } else {
        println!("no session to attach the note to");
    }
    Ok(())
}
