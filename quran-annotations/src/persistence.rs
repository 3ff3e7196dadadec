use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::NoteRecord;

#[async_trait]
pub trait NotePersistence: Send + Sync {
    async fn load(&self) -> Result<Vec<NoteRecord>>;
    async fn save_all(&self, notes: &[NoteRecord]) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesFile {
    notes: Vec<NoteRecord>,
}

/// Notes stored as one JSON document, replaced atomically on every save.
pub struct FileNotePersistence {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileNotePersistence {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create notes directory at {:?}", parent))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl NotePersistence for FileNotePersistence {
    async fn load(&self) -> Result<Vec<NoteRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut file = File::open(&self.path)
            .with_context(|| format!("failed to open notes file {:?}", self.path))?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        let stored: NotesFile = serde_json::from_str(&buf)
            .with_context(|| format!("failed to decode notes file {:?}", self.path))?;
        Ok(stored.notes)
    }

    async fn save_all(&self, notes: &[NoteRecord]) -> Result<()> {
        let _guard = self.write_lock.lock();
        let tmp = self.path.with_extension("json.tmp");
        let payload = serde_json::to_string_pretty(&NotesFile {
            notes: notes.to_vec(),
        })?;
        let mut file = File::create(&tmp)
            .with_context(|| format!("failed to open temp notes file {:?}", tmp))?;
        file.write_all(payload.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace notes file {:?}", self.path))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotePersistence {
    inner: Mutex<Vec<NoteRecord>>,
}

impl MemoryNotePersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotePersistence for MemoryNotePersistence {
    async fn load(&self) -> Result<Vec<NoteRecord>> {
        Ok(self.inner.lock().clone())
    }

    async fn save_all(&self, notes: &[NoteRecord]) -> Result<()> {
        *self.inner.lock() = notes.to_vec();
        Ok(())
    }
}
