//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use super::Error;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All slots in storage
    slots: Arc<Mutex<HashMap<String, String>>>,

    /// Maximum number of bytes of all keys and values combined
    quota: Option<usize>,
}

impl Memory {
    /// Create a new empty Memory storage without a quota
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty Memory storage that holds at most `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: Arc::default(),
            quota: Some(quota),
        }
    }
}

impl Storage for Memory {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .slots
            .lock()
            .map_err(|_| Error::Poisoned)?
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| Error::Poisoned)?;

        if let Some(quota) = self.quota {
            let others = slots
                .iter()
                .filter(|(other, _)| other.as_str() != key)
                .map(|(other, value)| other.len() + value.len())
                .sum::<usize>();

            let size = key.len() + value.len();

            if others + size > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    quota,
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());

        Ok(())
    }
}
