// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! File backed storage.
use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use dealwise_core::host::Storage;

/// Stores each key in its own file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage in the given directory, the directory is created on
    /// the first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.bin"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create {}", self.dir.display()))?;

        // Replace the file only once fully written.
        let path = self.path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).with_context(|| format!("Cannot write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Cannot write {}", path.display()))?;

        Ok(())
    }
}
