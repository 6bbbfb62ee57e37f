//! Durable key-value persistence for client state.
//!
//! Each store owns one named slot and writes its whole state there after
//! every mutation. State is wrapped in a versioned envelope:
//!
//! ```json
//! { "version": 1, "state": { "items": [] } }
//! ```
//!
//! Restoring never fails: a missing slot, unreadable file, malformed JSON or
//! an unknown version all fall back to the store's default state. Failed
//! writes are logged and otherwise ignored.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage slot names, one per store.
pub mod slots {
    /// Slot holding the cart line items.
    pub const CART: &str = "cart-storage";

    /// Slot holding the wishlist products.
    pub const WISHLIST: &str = "wishlist-storage";

    /// Slot holding the signed-in user.
    pub const SESSION: &str = "user-storage";
}

/// Version tag written into every envelope.
pub const STATE_VERSION: u32 = 1;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid slot name: {0:?}")]
    InvalidSlot(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for PersistError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// A string-keyed, string-valued durable store.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value of `slot`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, slot: &str) -> Result<Option<String>, PersistError>;

    /// Replace the value of `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, slot: &str, value: &str) -> Result<(), PersistError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    state: T,
}

/// Restore the state stored in `slot`, or `T::default()` if there is none
/// or it cannot be used.
pub fn restore<T>(store: &dyn KeyValueStore, slot: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.load(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(slot, "no stored state, starting empty");
            return T::default();
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "failed to read stored state, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.version == STATE_VERSION => envelope.state,
        Ok(envelope) => {
            tracing::warn!(
                slot,
                version = envelope.version,
                expected = STATE_VERSION,
                "stored state has unsupported version, starting empty"
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "stored state is malformed, starting empty");
            T::default()
        }
    }
}

/// Write `state` to `slot`. Failures are logged, never returned.
pub fn persist<T: Serialize>(store: &dyn KeyValueStore, slot: &str, state: &T) {
    let envelope = EnvelopeRef {
        version: STATE_VERSION,
        state,
    };
    let raw = match serde_json::to_string(&envelope) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(slot, error = %e, "failed to serialize state");
            return;
        }
    };
    if let Err(e) = store.save(slot, &raw) {
        tracing::warn!(slot, error = %e, "failed to persist state");
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Stores each slot as `<dir>/<slot>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory that
/// is renamed into place, so an interrupted or concurrent write never
/// leaves a truncated slot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| PersistError::Io {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, PersistError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistError::InvalidSlot(slot.to_owned()));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::Io {
                slot: slot.to_owned(),
                source,
            }),
        }
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), PersistError> {
        let path = self.slot_path(slot)?;
        let io_err = |source| PersistError::Io {
            slot: slot.to_owned(),
            source,
        };

        // Uniquely named per write, so concurrent writers never share a temp file.
        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.as_file().sync_all().map_err(io_err)?;
        file.persist(&path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// A process-local store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistError> {
        Ok(self.slots.read()?.get(slot).cloned())
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), PersistError> {
        self.slots
            .write()?
            .insert(slot.to_owned(), value.to_owned());
        Ok(())
    }
}
