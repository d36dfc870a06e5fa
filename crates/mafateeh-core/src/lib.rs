//! Mafateeh - shared saved-phrase store and word prediction for a software keyboard.
//!
//! The host app and the keyboard extension each open a [`PhraseStore`] from the
//! same [`StoreConfig`]; the keyboard asks the [`PredictionEngine`] for the
//! two-word suggestion bar on every text change.

pub mod async_store;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod layout;
pub mod manager;
pub mod models;
pub mod prediction;
pub mod session;
pub mod storage;

// Re-export common items for convenience
pub use async_store::AsyncPhraseStore;
pub use clipboard::{ClipboardSource, StaticClipboard, SystemClipboard};
pub use config::{get_shared_container_dir, StoreConfig, APP_GROUP_ID, LOG_ENV, STORE_FILENAME};
pub use error::{MafateehError, Result, StorageError};
pub use layout::{key_groups, Case, EnlargedTemplate, KeyGroup};
pub use manager::{Mode, PhraseForm, PhraseManager};
pub use models::{Phrase, PhraseId};
pub use prediction::{predict, PredictionEngine, Side, Suggestions};
pub use session::{KeyboardSession, StringDocument, TextDocument};
pub use storage::PhraseStore;
