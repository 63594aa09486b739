//! File storage
//!
//! Every slot is a `<key>.json` file in a single directory

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use super::Error;
use super::Result;
use super::Storage;

/// Storage that survives restarts
#[derive(Clone, Debug)]
pub struct File {
    /// Directory holding all slot files
    directory: PathBuf,
}

impl File {
    /// Open the file storage in `directory`
    ///
    /// The directory is created when it does not exist yet
    pub fn open<P>(directory: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let directory = directory.as_ref().to_path_buf();

        fs::create_dir_all(&directory)?;

        tracing::debug!("Using file storage in {}", directory.display());

        Ok(Self { directory })
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let is_valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

        if !is_valid {
            return Err(Error::InvalidKey(key.to_string()));
        }

        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl Storage for File {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let temporary_path = path.with_extension("json.tmp");

        // rename is atomic, readers see either the old or the new value
        let result = fs::write(&temporary_path, value)
            .and_then(|()| fs::rename(&temporary_path, &path));

        if let Err(err) = result {
            if let Err(remove_err) = fs::remove_file(&temporary_path)
                && remove_err.kind() != io::ErrorKind::NotFound
            {
                tracing::warn!(
                    "Could not remove `{}`: {remove_err}",
                    temporary_path.display()
                );
            }

            return Err(err.into());
        }

        Ok(())
    }
}
