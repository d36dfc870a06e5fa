use crate::error::{MafateehError, Result};
use crate::models::{Phrase, PhraseId};
use crate::storage::PhraseStore;
use std::sync::Arc;
use tokio::task;

/// Non-blocking front for [`PhraseStore`].
///
/// File work runs on tokio's blocking pool so an input loop awaiting these
/// calls keeps handling keystrokes.
#[derive(Debug, Clone)]
pub struct AsyncPhraseStore {
    inner: Arc<PhraseStore>,
}

impl AsyncPhraseStore {
    pub fn new(store: PhraseStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<PhraseStore>) -> Self {
        Self { inner: store }
    }

    pub fn blocking(&self) -> &PhraseStore {
        &self.inner
    }

    pub async fn list(&self) -> Result<Vec<Phrase>> {
        self.run(|store| store.list()).await
    }

    pub async fn create(&self, content: String) -> Result<Phrase> {
        self.run(move |store| store.create(content)).await
    }

    pub async fn update(&self, id: PhraseId, content: String) -> Result<Phrase> {
        self.run(move |store| store.update(id, content)).await
    }

    pub async fn delete(&self, id: PhraseId) -> Result<Phrase> {
        self.run(move |store| store.delete(id)).await
    }

    pub async fn delete_many(&self, ids: Vec<PhraseId>) -> Result<usize> {
        self.run(move |store| store.delete_many(ids)).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&PhraseStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| MafateehError::Background(e.to_string()))?
    }
}
