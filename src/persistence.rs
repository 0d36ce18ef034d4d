use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::PersistError;
use crate::tree::Tree;

pub const DEFAULT_STORAGE_KEY: &str = "widget-tree-components";

/// Opaque key/value medium the tree is persisted into.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Readers never observe a partially written blob.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn serialize_tree(tree: &Tree, pretty: bool) -> Result<String, PersistError> {
    let blob = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        serde_json::to_string(tree)?
    };
    Ok(blob)
}

pub fn deserialize_tree(blob: &str) -> Result<Tree, PersistError> {
    Ok(serde_json::from_str(blob)?)
}

/// Snapshots the root sequence under a fixed key.
pub struct Persistence {
    store: Box<dyn BlobStore>,
    key: String,
    pretty: bool,
}

impl Persistence {
    pub fn new(store: impl BlobStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
            pretty: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY)
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw blob currently stored, if any.
    pub fn blob(&self) -> Result<Option<String>, PersistError> {
        self.store.get(&self.key)
    }

    /// Loads the persisted tree. Missing, unreadable or corrupt blobs yield an empty tree.
    /// A blob that repeats an id counts as corrupt.
    pub fn load(&self) -> Tree {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::debug!("No persisted tree under '{}'", self.key);
                return Tree::default();
            }
            Err(e) => {
                log::warn!("Failed to read persisted tree '{}': {}", self.key, e);
                return Tree::default();
            }
        };
        match deserialize_tree(&blob) {
            Ok(tree) if !tree.has_unique_ids() => {
                log::warn!("Discarding tree blob '{}': component ids repeat", self.key);
                Tree::default()
            }
            Ok(tree) => {
                log::info!(
                    "Loaded {} components from '{}'",
                    tree.node_count(),
                    self.key
                );
                tree
            }
            Err(e) => {
                log::warn!("Discarding corrupt tree blob '{}': {}", self.key, e);
                Tree::default()
            }
        }
    }

    pub fn save(&mut self, tree: &Tree) -> Result<(), PersistError> {
        let blob = serialize_tree(tree, self.pretty)?;
        self.store.put(&self.key, &blob)?;
        log::debug!("Saved {} bytes under '{}'", blob.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Node};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample_tree() -> Tree {
        Tree::new(vec![
            Arc::new(Node::of_kind(Kind::Container)),
            Arc::new(Node::of_kind(Kind::Button)),
        ])
    }

    #[test]
    fn test_save_and_load_cycle() {
        let mut persistence = Persistence::in_memory();
        let tree = sample_tree();
        persistence.save(&tree).unwrap();
        assert_eq!(persistence.load(), tree);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let persistence = Persistence::in_memory();
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let mut store = MemoryBlobStore::new();
        store.put(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store, DEFAULT_STORAGE_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_repeated_ids_is_empty() {
        let node = Node::of_kind(Kind::Label);
        let blob = serialize_tree(
            &Tree::new(vec![Arc::new(node.clone()), Arc::new(node)]),
            false,
        )
        .unwrap();
        let mut store = MemoryBlobStore::new();
        store.put(DEFAULT_STORAGE_KEY, &blob).unwrap();

        let persistence = Persistence::new(store, DEFAULT_STORAGE_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let tree = sample_tree();
        let first = serialize_tree(&tree, false).unwrap();
        let second = serialize_tree(&deserialize_tree(&first).unwrap(), false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_store_cycle() {
        let dir = tempdir().unwrap();
        let mut persistence =
            Persistence::new(FileBlobStore::new(dir.path().join("nested")), "layout")
                .with_pretty(true);
        let tree = sample_tree();
        persistence.save(&tree).unwrap();

        assert!(dir.path().join("nested").join("layout.json").exists());
        assert!(!dir.path().join("nested").join("layout.json.tmp").exists());
        assert_eq!(persistence.load(), tree);
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());
        assert!(store.get("absent").unwrap().is_none());
    }
}
