//! Atomic TOML file operations.
//!
//! A thin layer for safe concurrent access to the TOML files Snipchain owns.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use snipchain_core::SnipchainError;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML deserialization error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::TomlSerError(e)
    }
}

impl From<AtomicTomlError> for SnipchainError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::IoError(io) => io.into(),
            AtomicTomlError::TomlError(de) => de.into(),
            AtomicTomlError::TomlSerError(ser) => ser.into(),
            AtomicTomlError::LockError(msg) => SnipchainError::io(msg),
        }
    }
}

/// A handle to a TOML file that is replaced atomically on every write.
///
/// - Writes go to a sibling tmp file, are fsynced, then renamed over the target
/// - Read-modify-write cycles hold an exclusive `fs2` lock on `<file>.lock`
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for AtomicTomlFile<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> AtomicTomlFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads and deserializes the file. A missing or blank file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Loads the current value (or `default_value`), lets `f` modify it and
    /// writes it back, all under an exclusive lock.
    ///
    /// Nothing is written when `f` returns an error.
    pub fn update<R, E, F>(&self, default_value: T, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<AtomicTomlError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock guard, released (and the lock file removed) on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
