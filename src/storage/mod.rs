//! All things related to the key-value slots the notes are persisted in

use std::path::PathBuf;

use thiserror::Error;

pub use file::File;
pub use memory::Memory;

mod file;
mod memory;

/// Which storage backend to use
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Config {
    /// Keep all slots in memory, lost on shutdown
    ///
    /// A quota of `None` means unlimited
    Memory { quota: Option<usize> },

    /// Keep every slot as a file in this directory
    File { directory: PathBuf },
}

/// Setup the storage
///
/// # Errors
///
/// Will return `Err` when the file storage directory can not be created
pub fn setup(config: &Config) -> Result<Backend> {
    match config {
        Config::Memory { quota: None } => Ok(Backend::Memory(Memory::new())),
        Config::Memory { quota: Some(quota) } => Ok(Backend::Memory(Memory::with_quota(*quota))),
        Config::File { directory } => File::open(directory).map(Backend::File),
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// Writing the value would exceed the storage quota
    #[error("Quota exceeded: writing {size} bytes to `{key}` exceeds the quota of {quota} bytes")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },

    /// The key can not be used as a slot name
    #[error("Invalid key: `{0}`")]
    InvalidKey(String),

    /// Reading or writing the underlying file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Another user of the storage panicked while holding it
    #[error("Storage lock is poisoned")]
    Poisoned,
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Synchronous string key-value storage
///
/// Every key is a named slot holding a single string value
pub trait Storage: Clone + Send + Sync + 'static {
    /// Get the value of a slot, `None` when the slot was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of a slot
    ///
    /// Either the whole value is written or the slot keeps its previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage backend picked at runtime
#[derive(Clone, Debug)]
pub enum Backend {
    Memory(Memory),
    File(File),
}

impl Storage for Backend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Memory(memory) => memory.get(key),
            Self::File(file) => file.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Memory(memory) => memory.set(key, value),
            Self::File(file) => file.set(key, value),
        }
    }
}
