use clap::{Parser, Subcommand};
use mafateeh_core::APP_GROUP_ID;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "mafateeh - saved phrases and word suggestions for the Mafateeh keyboard",
    long_about = "mafateeh manages the saved phrases shared between the host app and the keyboard, \
                  and shows the suggestions the keyboard would offer."
)]
pub struct Mafateeh {
    #[clap(
        long,
        global = true,
        help = "Directory holding the application group containers"
    )]
    pub dir: Option<PathBuf>,

    #[clap(long, global = true, default_value = APP_GROUP_ID, help = "Application group id")]
    pub group: String,

    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a new phrase
    Add {
        #[clap(help = "The phrase text")]
        content: String,
    },
    /// List saved phrases
    List,
    /// Replace the text of a saved phrase
    Update {
        #[clap(help = "Id of the phrase to update")]
        id: u64,

        #[clap(help = "New phrase text")]
        content: String,
    },
    /// Delete a saved phrase
    Delete {
        #[clap(help = "Id of the phrase to delete")]
        id: u64,
    },
    /// Delete several phrases at once, skipping unknown ids
    DeleteMany {
        #[clap(required = true, num_args = 1.., help = "Ids of the phrases to delete")]
        ids: Vec<u64>,
    },
    /// Show the two suggestions for some typed text
    Predict {
        #[clap(help = "Text before the cursor")]
        context: Option<String>,
    },
    /// Open the phrase manager
    Manage,
    /// Type through the keyboard model line by line
    Keyboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_store_options() {
        let args = Mafateeh::parse_from([
            "mafateeh",
            "--dir",
            "/tmp/shared",
            "delete-many",
            "1",
            "2",
        ]);
        assert_eq!(args.dir, Some(PathBuf::from("/tmp/shared")));
        assert_eq!(args.group, APP_GROUP_ID);
        assert!(matches!(args.commands, Some(Commands::DeleteMany { ids }) if ids == vec![1, 2]));
    }

    #[test]
    fn predict_context_is_optional() {
        let args = Mafateeh::parse_from(["mafateeh", "predict"]);
        assert!(matches!(args.commands, Some(Commands::Predict { context: None })));
    }

    #[test]
    fn delete_many_needs_an_id() {
        assert!(Mafateeh::try_parse_from(["mafateeh", "delete-many"]).is_err());
    }
}
