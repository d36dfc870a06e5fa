use crate::error::{MafateehError, Result};
use crate::models::{Phrase, PhraseId};
use crate::storage::PhraseStore;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Tap to edit, swipe to delete.
    #[default]
    Browse,
    /// Multi-select for batch delete.
    Select,
}

/// List and selection state of the host app's phrase screen.
///
/// Holds only a snapshot; call [`PhraseManager::refresh`] whenever the screen
/// appears, since the keyboard may have changed the store in the meantime.
#[derive(Debug, Default)]
pub struct PhraseManager {
    phrases: Vec<Phrase>,
    mode: Mode,
    selected: BTreeSet<PhraseId>,
}

impl PhraseManager {
    pub fn load(store: &PhraseStore) -> Result<Self> {
        let mut manager = Self::default();
        manager.refresh(store)?;
        Ok(manager)
    }

    pub fn refresh(&mut self, store: &PhraseStore) -> Result<()> {
        self.phrases = store.list()?;
        let live: BTreeSet<PhraseId> = self.phrases.iter().map(|p| p.id).collect();
        self.selected.retain(|id| live.contains(id));
        if self.phrases.is_empty() {
            self.mode = Mode::Browse;
        }
        Ok(())
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_selected(&self, id: PhraseId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Delete is only offered once something is selected.
    pub fn can_delete_selected(&self) -> bool {
        self.mode == Mode::Select && !self.selected.is_empty()
    }

    /// Switch between Browse and Select. Either way the selection starts empty.
    pub fn toggle_select_mode(&mut self) {
        if self.phrases.is_empty() {
            return;
        }
        self.mode = match self.mode {
            Mode::Browse => Mode::Select,
            Mode::Select => Mode::Browse,
        };
        self.selected.clear();
    }

    pub fn toggle_selected(&mut self, id: PhraseId) {
        if self.mode != Mode::Select {
            return;
        }
        if !self.selected.remove(&id) && self.phrases.iter().any(|p| p.id == id) {
            self.selected.insert(id);
        }
    }

    /// Select everything, or clear the selection if everything is already selected.
    pub fn select_all(&mut self) {
        if self.mode != Mode::Select {
            return;
        }
        if self.selected.len() == self.phrases.len() {
            self.selected.clear();
        } else {
            self.selected = self.phrases.iter().map(|p| p.id).collect();
        }
    }

    /// Batch delete the selection. Returns how many phrases were removed.
    pub fn delete_selected(&mut self, store: &PhraseStore) -> Result<usize> {
        if !self.can_delete_selected() {
            return Ok(0);
        }

        let ids: Vec<PhraseId> = self.selected.iter().copied().collect();
        let removed = store.delete_many(ids)?;
        self.selected.clear();
        self.refresh(store)?;
        debug!(removed, "deleted selected phrases");
        Ok(removed)
    }

    /// Delete the row at `index` in Browse mode.
    ///
    /// A phrase already removed elsewhere counts as deleted.
    pub fn swipe_delete(&mut self, index: usize, store: &PhraseStore) -> Result<bool> {
        if self.mode != Mode::Browse {
            return Ok(false);
        }
        let Some(phrase) = self.phrases.get(index) else {
            return Ok(false);
        };

        match store.delete(phrase.id) {
            Ok(_) | Err(MafateehError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
        self.refresh(store)?;
        Ok(true)
    }

    /// Open the sheet for the row at `index`; Browse mode only.
    pub fn edit_form(&self, index: usize) -> Option<PhraseForm> {
        if self.mode != Mode::Browse {
            return None;
        }
        self.phrases.get(index).map(PhraseForm::edit)
    }
}

/// The add / edit sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseForm {
    pub text: String,
    editing: Option<PhraseId>,
}

impl PhraseForm {
    pub fn new_phrase() -> Self {
        Self::default()
    }

    pub fn edit(phrase: &Phrase) -> Self {
        Self {
            text: phrase.content.clone(),
            editing: Some(phrase.id),
        }
    }

    pub fn editing(&self) -> Option<PhraseId> {
        self.editing
    }

    pub fn can_save(&self) -> bool {
        !self.text.is_empty()
    }

    /// Save the sheet. On error the form keeps its text so the user can retry.
    pub fn submit(&self, store: &PhraseStore) -> Result<Phrase> {
        if !self.can_save() {
            return Err(MafateehError::EmptyContent);
        }
        match self.editing {
            Some(id) => store.update(id, self.text.clone()),
            None => store.create(self.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(contents: &[&str]) -> (TempDir, PhraseStore) {
        let dir = TempDir::new().unwrap();
        let store = PhraseStore::open_at(dir.path().join("phrases.json")).unwrap();
        for content in contents {
            store.create(*content).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn select_mode_is_unavailable_when_empty() {
        let (_dir, store) = store_with(&[]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        assert_eq!(manager.mode(), Mode::Browse);
    }

    #[test]
    fn select_all_toggles() {
        let (_dir, store) = store_with(&["a", "b", "c"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();

        manager.select_all();
        assert_eq!(manager.selected_count(), 3);
        manager.select_all();
        assert_eq!(manager.selected_count(), 0);

        let first = manager.phrases()[0].id;
        manager.toggle_selected(first);
        manager.select_all();
        assert_eq!(manager.selected_count(), 3);
    }

    #[test]
    fn toggling_mode_clears_selection() {
        let (_dir, store) = store_with(&["a", "b"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        manager.toggle_selected(manager.phrases()[1].id);
        assert!(manager.can_delete_selected());

        manager.toggle_select_mode();
        assert_eq!(manager.mode(), Mode::Browse);
        assert_eq!(manager.selected_count(), 0);
        assert!(!manager.can_delete_selected());
    }

    #[test]
    fn deleting_everything_returns_to_browse() {
        let (_dir, store) = store_with(&["a", "b"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        manager.select_all();

        assert_eq!(manager.delete_selected(&store).unwrap(), 2);
        assert!(manager.phrases().is_empty());
        assert_eq!(manager.mode(), Mode::Browse);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn partial_batch_delete_stays_in_select_mode() {
        let (_dir, store) = store_with(&["a", "b", "c"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        let b = manager.phrases()[1].id;
        manager.toggle_selected(b);

        assert_eq!(manager.delete_selected(&store).unwrap(), 1);
        assert_eq!(manager.mode(), Mode::Select);
        let remaining: Vec<&str> = manager.phrases().iter().map(|p| p.content.as_str()).collect();
        assert_eq!(remaining, ["a", "c"]);
    }

    #[test]
    fn swipe_delete_tolerates_stale_rows() {
        let (_dir, store) = store_with(&["a", "b"]);
        let mut manager = PhraseManager::load(&store).unwrap();

        // The keyboard process removed "a" after our last refresh.
        store.delete(manager.phrases()[0].id).unwrap();
        assert!(manager.swipe_delete(0, &store).unwrap());
        assert_eq!(manager.phrases().len(), 1);
        assert!(!manager.swipe_delete(5, &store).unwrap());
    }

    #[test]
    fn swipe_is_disabled_in_select_mode() {
        let (_dir, store) = store_with(&["a"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        assert!(!manager.swipe_delete(0, &store).unwrap());
        assert!(manager.edit_form(0).is_none());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn form_creates_and_edits() {
        let (_dir, store) = store_with(&[]);

        let mut form = PhraseForm::new_phrase();
        assert!(!form.can_save());
        assert!(matches!(form.submit(&store), Err(MafateehError::EmptyContent)));

        form.text = "See you soon".to_string();
        let created = form.submit(&store).unwrap();

        let manager = PhraseManager::load(&store).unwrap();
        let mut edit = manager.edit_form(0).unwrap();
        assert_eq!(edit.editing(), Some(created.id));
        edit.text = "See you later".to_string();
        let updated = edit.submit(&store).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.get(created.id).unwrap().content, "See you later");
    }

    #[test]
    fn duplicate_submission_keeps_the_form() {
        let (_dir, store) = store_with(&["Thanks!"]);
        let mut form = PhraseForm::new_phrase();
        form.text = "Thanks!".to_string();

        let err = form.submit(&store).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(form.text, "Thanks!");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn refresh_drops_selection_of_vanished_phrases() {
        let (_dir, store) = store_with(&["a", "b"]);
        let mut manager = PhraseManager::load(&store).unwrap();
        manager.toggle_select_mode();
        manager.select_all();

        store.delete(manager.phrases()[0].id).unwrap();
        manager.refresh(&store).unwrap();
        assert_eq!(manager.selected_count(), 1);
    }
}
