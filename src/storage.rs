//! Implementations of the [`Storage`] trait

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::traits::Storage;

/// A storage that only lives in memory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again), e.g. to mimic a full storage quota
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Store a raw value, bypassing the read-only flag
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if self.read_only {
            return Err(format!("Unable to store {}: the storage is read-only", key).into());
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// A storage that keeps one file per key in a folder
#[derive(Clone, Debug, PartialEq)]
pub struct FolderStorage {
    backing_folder: PathBuf,
}

impl FolderStorage {
    /// Use `folder` as a backing folder. It is created on the first write if needed
    pub fn new(folder: &Path) -> Self {
        Self { backing_folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name = sanitize_filename::sanitize(key);
        self.backing_folder.join(file_name)
    }
}

impl Storage for FolderStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for(key);
        if path.exists() == false {
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
            Ok(content) => Ok(Some(content)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        Ok(())
    }
}
