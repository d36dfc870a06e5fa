use crate::config::StoreConfig;
use crate::error::{MafateehError, Result, StorageError};
use crate::models::{Phrase, PhraseId};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const FORMAT_VERSION: u32 = 1;

/// On-disk shape of the shared store file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct StoreDocument {
    version: u32,
    next_id: u64,
    phrases: Vec<Phrase>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            next_id: 1,
            phrases: Vec::new(),
        }
    }
}

impl StoreDocument {
    fn allocate_id(&mut self) -> std::result::Result<PhraseId, StorageError> {
        // A hand-edited file may carry a stale counter.
        let floor = match self.phrases.iter().map(|phrase| phrase.id.0).max() {
            Some(highest) => highest.checked_add(1).ok_or(StorageError::IdsExhausted)?,
            None => 1,
        };
        let id = self.next_id.max(floor);
        self.next_id = id.checked_add(1).ok_or(StorageError::IdsExhausted)?;
        Ok(PhraseId(id))
    }

    fn position(&self, id: PhraseId) -> Option<usize> {
        self.phrases.iter().position(|phrase| phrase.id == id)
    }

    fn content_taken(&self, content: &str, except: Option<PhraseId>) -> bool {
        self.phrases
            .iter()
            .any(|phrase| Some(phrase.id) != except && phrase.content == content)
    }
}

/// Durable set of saved phrases shared by the host app and the keyboard.
///
/// Every call re-reads the backing file, and every mutation is committed with
/// an atomic rename before it returns, so another process sharing the same
/// [`StoreConfig`] sees the change on its next read. Mutations hold an
/// exclusive lock on a sibling `.lock` file from read to rename, which
/// serialises writers across handles and processes. Content is unique across
/// the store, compared byte for byte.
#[derive(Debug)]
pub struct PhraseStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl PhraseStore {
    /// Open the store for an application group, creating it if needed.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Self::open_at(config.store_path())
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let lock_path = lock_path_for(&path);
        initialize(&path, &lock_path).map_err(|source| MafateehError::Initialization {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "opened phrase store");

        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All phrases in insertion order, read fresh from disk.
    pub fn list(&self) -> Result<Vec<Phrase>> {
        let document = read_document(&self.path)?;
        debug!(count = document.phrases.len(), "listed phrases");
        Ok(document.phrases)
    }

    pub fn get(&self, id: PhraseId) -> Result<Phrase> {
        read_document(&self.path)?
            .phrases
            .into_iter()
            .find(|phrase| phrase.id == id)
            .ok_or(MafateehError::NotFound(id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(read_document(&self.path)?.phrases.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn create(&self, content: impl Into<String>) -> Result<Phrase> {
        let content = content.into();
        if content.is_empty() {
            return Err(MafateehError::EmptyContent);
        }

        let _guard = self.lock()?;
        let mut document = read_document(&self.path)?;
        if document.content_taken(&content, None) {
            warn!("rejected duplicate phrase on create");
            return Err(MafateehError::Duplicate(content));
        }

        let phrase = Phrase::new(document.allocate_id()?, content);
        document.phrases.push(phrase.clone());
        write_document(&self.path, &document)?;
        info!(id = %phrase.id, "created phrase");
        Ok(phrase)
    }

    /// Replace the content of an existing phrase, keeping its id.
    pub fn update(&self, id: PhraseId, new_content: impl Into<String>) -> Result<Phrase> {
        let new_content = new_content.into();
        if new_content.is_empty() {
            return Err(MafateehError::EmptyContent);
        }

        let _guard = self.lock()?;
        let mut document = read_document(&self.path)?;
        let index = document
            .position(id)
            .ok_or(MafateehError::NotFound(id))?;

        if document.phrases[index].content == new_content {
            return Ok(document.phrases[index].clone());
        }
        if document.content_taken(&new_content, Some(id)) {
            warn!(id = %id, "rejected duplicate phrase on update");
            return Err(MafateehError::Duplicate(new_content));
        }

        document.phrases[index].update_content(new_content);
        let updated = document.phrases[index].clone();
        write_document(&self.path, &document)?;
        info!(id = %id, "updated phrase");
        Ok(updated)
    }

    /// Remove one phrase. A missing id is reported so callers can spot stale state.
    pub fn delete(&self, id: PhraseId) -> Result<Phrase> {
        let _guard = self.lock()?;
        let mut document = read_document(&self.path)?;
        let index = document
            .position(id)
            .ok_or(MafateehError::NotFound(id))?;

        let removed = document.phrases.remove(index);
        write_document(&self.path, &document)?;
        info!(id = %id, "deleted phrase");
        Ok(removed)
    }

    /// Best-effort batch delete. Unknown ids are skipped; returns how many were removed.
    pub fn delete_many<I>(&self, ids: I) -> Result<usize>
    where
        I: IntoIterator<Item = PhraseId>,
    {
        let ids: HashSet<PhraseId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let _guard = self.lock()?;
        let mut document = read_document(&self.path)?;
        let before = document.phrases.len();
        document.phrases.retain(|phrase| !ids.contains(&phrase.id));
        let removed = before - document.phrases.len();

        if removed > 0 {
            write_document(&self.path, &document)?;
        }
        info!(requested = ids.len(), removed, "batch deleted phrases");
        Ok(removed)
    }

    fn lock(&self) -> Result<File> {
        Ok(lock_exclusive(&self.lock_path)?)
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("phrases"));
    name.push(".lock");
    path.with_file_name(name)
}

/// Blocks until this handle owns the store's lock file. Dropping the returned
/// file releases it.
fn lock_exclusive(lock_path: &Path) -> std::result::Result<File, StorageError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;
    file.lock_exclusive()?;
    Ok(file)
}

fn initialize(path: &Path, lock_path: &Path) -> std::result::Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let _guard = lock_exclusive(lock_path)?;
    if !path.exists() {
        debug!(path = %path.display(), "creating empty phrase store");
        write_document(path, &StoreDocument::default())?;
    }

    // Refuse to start on a file we could not use later.
    read_document(path)?;
    Ok(())
}

fn read_document(path: &Path) -> std::result::Result<StoreDocument, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StoreDocument::default()),
        Err(err) => return Err(err.into()),
    };

    // Handle a freshly created, empty file
    if content.trim().is_empty() {
        return Ok(StoreDocument::default());
    }

    Ok(serde_json::from_str(&content)?)
}

fn write_document(path: &Path, document: &StoreDocument) -> std::result::Result<(), StorageError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(path)?;
    Ok(())
}
