//! Flat-file note storage
//!
//! One note per file under a single directory. Note names are normalized to
//! carry the `.txt` extension exactly once, and listings are ordered by file
//! name, newest first when names are timestamps.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const NOTE_EXTENSION: &str = ".txt";

/// Separator written between appended note sections
const APPEND_SEPARATOR: &str = "\n\n";

/// Note directory on the local filesystem
#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the store, making the directory if it does not exist yet
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).await?;
        debug!(path = %store.root.display(), "Notes directory ready");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append `.txt` unless the name already ends with it
    pub fn normalize(name: &str) -> String {
        if name.ends_with(NOTE_EXTENSION) {
            name.to_string()
        } else {
            format!("{}{}", name, NOTE_EXTENSION)
        }
    }

    fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write or append a note, returning its normalized file name
    ///
    /// When appending to a note that already has content, a blank line is
    /// inserted first.
    pub async fn write(&self, name: &str, content: &str, append: bool) -> io::Result<String> {
        let file_name = Self::normalize(name);
        let path = self.path_of(&file_name);

        if append {
            let existing_len = match fs::metadata(&path).await {
                Ok(meta) => meta.len(),
                Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
                Err(e) => return Err(e),
            };

            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            if existing_len > 0 {
                file.write_all(APPEND_SEPARATOR.as_bytes()).await?;
            }
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
        } else {
            fs::write(&path, content).await?;
        }

        debug!(note = %file_name, append, bytes = content.len(), "Note written");
        Ok(file_name)
    }

    /// Read one note; `None` if it does not exist
    pub async fn read(&self, name: &str) -> io::Result<Option<(String, String)>> {
        let file_name = Self::normalize(name);
        match fs::read_to_string(self.path_of(&file_name)).await {
            Ok(content) => Ok(Some((file_name, content))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// File names in the store, lexicographically descending
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Up to `limit` notes from the head of [`NoteStore::list`], with contents
    pub async fn recent(&self, limit: usize) -> io::Result<Vec<(String, String)>> {
        let mut notes = Vec::new();
        for file_name in self.list().await?.into_iter().take(limit) {
            let content = fs::read_to_string(self.path_of(&file_name)).await?;
            notes.push((file_name, content));
        }
        Ok(notes)
    }

    /// Remove a note; `Ok(false)` if it was not there
    pub async fn delete(&self, name: &str) -> io::Result<bool> {
        let file_name = Self::normalize(name);
        match fs::remove_file(self.path_of(&file_name)).await {
            Ok(()) => {
                debug!(note = %file_name, "Note deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
