use crate::cli::{Commands, Mafateeh};
use crate::simulator::run_keyboard_simulator;
use mafateeh_core::{
    get_shared_container_dir, PhraseId, PhraseStore, PredictionEngine, Result, StoreConfig,
};
use mafateeh_ui::display_phrase_manager;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

pub fn handle_command(args: Mafateeh) -> Result<()> {
    match args.commands {
        // Prediction never touches the store.
        Some(Commands::Predict { context }) => {
            print_predictions(&mut io::stdout(), context.as_deref())?;
            Ok(())
        }
        Some(command) => {
            let store = PhraseStore::open(&store_config(&args.dir, &args.group)?)?;
            handle_subcommand(command, &store)
        }
        None => {
            // Default: show the phrase manager when no command provided
            let store = PhraseStore::open(&store_config(&args.dir, &args.group)?)?;
            display_phrase_manager(&store)
        }
    }
}

fn store_config(dir: &Option<PathBuf>, group: &str) -> Result<StoreConfig> {
    let dir = dir.clone().unwrap_or_else(get_shared_container_dir);
    let config = StoreConfig::new(dir, group)?;
    debug!(path = %config.store_path().display(), "resolved store location");
    Ok(config)
}

fn handle_subcommand(command: Commands, store: &PhraseStore) -> Result<()> {
    let mut out = io::stdout();
    match command {
        Commands::Add { content } => {
            let phrase = store.create(content)?;
            writeln!(out, "Phrase {} saved", phrase.id)?;
        }
        Commands::List => print_phrases(&mut out, store)?,
        Commands::Update { id, content } => {
            store.update(PhraseId(id), content)?;
            writeln!(out, "Phrase {} updated", id)?;
        }
        Commands::Delete { id } => {
            store.delete(PhraseId(id))?;
            writeln!(out, "Phrase {} deleted", id)?;
        }
        Commands::DeleteMany { ids } => {
            let removed = store.delete_many(ids.into_iter().map(PhraseId))?;
            writeln!(out, "Deleted {} phrase(s)", removed)?;
        }
        Commands::Manage => display_phrase_manager(store)?,
        Commands::Keyboard => run_keyboard_simulator(store)?,
        Commands::Predict { context } => print_predictions(&mut out, context.as_deref())?,
    }
    Ok(())
}

pub fn print_phrases(out: &mut impl Write, store: &PhraseStore) -> Result<()> {
    let phrases = store.list()?;
    if phrases.is_empty() {
        writeln!(out, "You have no saved phrases")?;
        return Ok(());
    }

    for phrase in phrases {
        writeln!(
            out,
            "{:>4}  {}  ({})",
            phrase.id,
            phrase.preview(60),
            phrase.formatted_time()
        )?;
    }
    Ok(())
}

pub fn print_predictions(out: &mut impl Write, context: Option<&str>) -> Result<()> {
    let suggestions = PredictionEngine::new().predict(context);
    writeln!(out, "{} | {}", suggestions.left, suggestions.right)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn predictions_print_both_slots() {
        assert_eq!(output(|out| print_predictions(out, Some("Hello I"))), "I'm | is\n");
        assert_eq!(output(|out| print_predictions(out, None)), "I | We\n");
    }

    #[test]
    fn predict_ignores_the_store_location() {
        let args = Mafateeh {
            dir: None,
            group: String::new(),
            commands: Some(Commands::Predict {
                context: Some("we".to_string()),
            }),
        };
        handle_command(args).unwrap();

        assert!(store_config(&None, "").is_err());
    }

    #[test]
    fn list_prints_ids_and_previews() {
        let dir = TempDir::new().unwrap();
        let store = PhraseStore::open_at(dir.path().join("phrases.json")).unwrap();
        assert_eq!(
            output(|out| print_phrases(out, &store)),
            "You have no saved phrases\n"
        );

        store.create("See you soon").unwrap();
        let listed = output(|out| print_phrases(out, &store));
        assert!(listed.starts_with("   1  See you soon  ("));
    }

    #[test]
    fn duplicate_add_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = PhraseStore::open_at(dir.path().join("phrases.json")).unwrap();
        let add = || {
            handle_subcommand(
                Commands::Add {
                    content: "On my way".to_string(),
                },
                &store,
            )
        };

        add().unwrap();
        assert!(add().unwrap_err().is_duplicate());
        assert!(handle_subcommand(Commands::Delete { id: 42 }, &store)
            .unwrap_err()
            .is_not_found());
    }
}
