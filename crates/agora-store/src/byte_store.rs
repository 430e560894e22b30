//! Opaque blob storage keyed by collection name.
//!
//! A [`ByteStore`] knows nothing about encryption or JSON.  `read` of a
//! collection that was never written returns empty bytes, and `write` always
//! replaces the whole blob.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use agora_shared::constants::COLLECTION_FILE_EXTENSION;
use tracing::debug;
use uuid::Uuid;

pub trait ByteStore: Send + Sync {
    /// Read the blob for `collection`, or empty bytes if there is none.
    fn read(&self, collection: &str) -> io::Result<Vec<u8>>;

    /// Replace the blob for `collection`.
    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Collection names become file names, so only a conservative alphabet is
/// accepted.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One file per collection under a base directory:
/// `<base>/<collection>.json.enc`.
#[derive(Debug, Clone)]
pub struct FileByteStore {
    base_path: PathBuf,
}

impl FileByteStore {
    /// Open a store rooted at `base_path`, creating the directory if missing.
    pub fn new(base_path: impl Into<PathBuf>) -> io::Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        debug!(path = %base_path.display(), "file byte store ready");
        Ok(Self { base_path })
    }

    /// Path of the file backing `collection`.
    pub fn collection_path(&self, collection: &str) -> io::Result<PathBuf> {
        if !is_valid_collection_name(collection) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid collection name {collection:?}"),
            ));
        }
        Ok(self
            .base_path
            .join(format!("{collection}.{COLLECTION_FILE_EXTENSION}")))
    }
}

impl ByteStore for FileByteStore {
    fn read(&self, collection: &str) -> io::Result<Vec<u8>> {
        let path = self.collection_path(collection)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    // Write to a sibling temp file, fsync, then rename over the target so a
    // crash never leaves a truncated collection behind.
    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.collection_path(collection)?;
        let temp_path = self
            .base_path
            .join(format!(".{collection}.{}.tmp", Uuid::new_v4()));

        let result = (|| {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            std::fs::rename(&temp_path, &path)
        })();

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-process store for tests and embedding.  Counts successful writes and
/// can be told to fail them.
#[derive(Debug, Default)]
pub struct MemoryByteStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current raw blob for `collection`, if any.
    pub fn raw(&self, collection: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(collection).cloned())
    }

    /// Overwrite a blob without counting it as a write.
    pub fn put_raw(&self, collection: &str, bytes: Vec<u8>) -> io::Result<()> {
        self.lock()?.insert(collection.to_string(), bytes);
        Ok(())
    }

    /// Make every subsequent `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|e| io::Error::other(format!("Lock poisoned: {e}")))
    }
}

impl ByteStore for MemoryByteStore {
    fn read(&self, collection: &str) -> io::Result<Vec<u8>> {
        Ok(self.lock()?.get(collection).cloned().unwrap_or_default())
    }

    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            ));
        }
        self.lock()?.insert(collection.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_collection_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileByteStore::new(dir.path()).unwrap();
        assert!(store.read("users").unwrap().is_empty());
    }

    #[test]
    fn write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let store = FileByteStore::new(dir.path()).unwrap();

        store.write("posts", b"first version, longer").unwrap();
        store.write("posts", b"second").unwrap();

        assert_eq!(store.read("posts").unwrap(), b"second");
        assert!(dir.path().join("posts.json.enc").exists());
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileByteStore::new(dir.path()).unwrap();
        store.write("chats", b"data").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["chats.json.enc".to_string()]);
    }

    #[test]
    fn creates_missing_base_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileByteStore::new(&nested).unwrap();
        store.write("tags", b"x").unwrap();
        assert!(nested.join("tags.json.enc").exists());
    }

    #[test]
    fn traversal_names_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileByteStore::new(dir.path()).unwrap();
        for name in ["../users", "a/b", "", "users.json", "..\\x"] {
            let err = store.write(name, b"x").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name:?}");
        }
    }

    #[test]
    fn memory_store_counts_and_fails_writes() {
        let store = MemoryByteStore::new();
        assert!(store.read("users").unwrap().is_empty());

        store.write("users", b"abc").unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.raw("users").unwrap().unwrap(), b"abc");

        store.set_fail_writes(true);
        assert!(store.write("users", b"def").is_err());
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read("users").unwrap(), b"abc");
    }

    #[test]
    fn poisoned_memory_store_reports_errors() {
        let store = std::sync::Arc::new(MemoryByteStore::new());
        store.put_raw("users", b"abc".to_vec()).unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.blobs.lock().unwrap();
            panic!("poison the blob map");
        })
        .join();

        assert!(store.raw("users").is_err());
        assert!(store.put_raw("users", b"def".to_vec()).is_err());
        assert!(store.read("users").is_err());
        assert!(store.write("users", b"def").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
