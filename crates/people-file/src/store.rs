//! Filesystem storage for documents.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_stream::try_stream;
use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use people_core::error::{Error, InvalidInputError, TransportError};
use people_core::traits::{DocumentStore, DocumentStream};
use people_core::types::NationalId;
use people_core::{Document, Result};

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::from(err))
}

/// A document store that keeps one pretty-printed JSON file per document.
///
/// Layout:
///
/// ```text
/// {root}/collections/{collection}.lock
/// {root}/collections/{collection}/{id}.json
/// ```
///
/// Writes go through a temporary file and a rename, under an exclusive lock
/// on the collection lock file, so readers never observe a torn document.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
    collection: String,
}

impl FileDocumentStore {
    /// Create a store for `collection` below the given root directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is not a plain directory name.
    pub fn new(root: impl AsRef<Path>, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();

        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::InvalidInput(InvalidInputError::Other {
                message: format!("invalid collection name '{}'", collection),
            }));
        }

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            collection,
        })
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collections_dir(&self) -> PathBuf {
        self.root.join("collections")
    }

    fn collection_dir(&self) -> PathBuf {
        self.collections_dir().join(&self.collection)
    }

    fn lock_path(&self) -> PathBuf {
        self.collections_dir()
            .join(format!("{}.lock", self.collection))
    }

    fn document_path(&self, id: &NationalId) -> PathBuf {
        self.collection_dir().join(format!("{}.json", id.as_str()))
    }

    /// Run `f` while holding the collection's exclusive write lock.
    fn with_write_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(self.collection_dir()).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;
        let result = f();
        lock_file.unlock().map_err(map_io)?;

        result
    }

    fn write_document(&self, path: &Path, document: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;

        Ok(())
    }
}

/// Read a document file, or `None` if it does not exist.
fn read_document(path: &Path) -> Result<Option<Document>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(map_io(e)),
    };

    let document = serde_json::from_str(&content).map_err(|e| {
        Error::InvalidInput(InvalidInputError::Document {
            reason: format!("{}: {}", path.display(), e),
        })
    })?;

    Ok(Some(document))
}

/// List document files in a collection directory, sorted by file name.
fn list_document_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(map_io(e)),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    Ok(paths)
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn get(&self, id: &NationalId) -> Result<Option<Document>> {
        read_document(&self.document_path(id))
    }

    #[instrument(skip(self, document), fields(collection = %self.collection))]
    async fn set(&self, id: &NationalId, document: &Document) -> Result<()> {
        let path = self.document_path(id);
        self.with_write_lock(|| self.write_document(&path, document))?;

        debug!(%id, "Wrote document");
        Ok(())
    }

    #[instrument(skip(self, partial), fields(collection = %self.collection))]
    async fn update(&self, id: &NationalId, partial: &Document) -> Result<()> {
        let path = self.document_path(id);
        self.with_write_lock(|| {
            let mut document = read_document(&path)?.ok_or_else(|| Error::NotFound {
                id: id.to_string(),
            })?;
            document.merge(partial);
            self.write_document(&path, &document)
        })?;

        debug!(%id, "Updated document");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete(&self, id: &NationalId) -> Result<()> {
        let path = self.document_path(id);
        self.with_write_lock(|| match fs::remove_file(&path) {
            Ok(()) => {
                debug!(%id, "Deleted document");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(e)),
        })
    }

    fn stream_all(&self) -> DocumentStream<'_> {
        let dir = self.collection_dir();

        Box::pin(try_stream! {
            for path in list_document_paths(&dir)? {
                match read_document(&path) {
                    Ok(Some(document)) => yield document,
                    // Deleted between listing and reading.
                    Ok(None) => {}
                    Err(Error::InvalidInput(err)) => {
                        warn!(error = %err, "Skipping unreadable document");
                    }
                    Err(err) => Err::<(), _>(err)?,
                }
            }
        })
    }
}
