//! The greeting written on the card, and where it is kept.

use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Store key of the saved message.
pub const MESSAGE_KEY: &str = "ny-message";
/// Message shown until the user writes their own.
pub const DEFAULT_MESSAGE: &str = "Wishing you good health and happiness all through the New Year";

/// A persistent string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A store living only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _ = self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store kept as one JSON object in a file, rewritten on every `set`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(JsonFileStore { path, entries })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _ = self.entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

/// Who the card is from and what it says.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    /// Sender name; empty when unsigned.
    pub name: String,
    pub message: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Greeting {
            name: String::new(),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Greeting {
    /// Loads the saved message, falling back to the default one on any error.
    pub fn load(store: &dyn KeyValueStore) -> Greeting {
        let message = match store.get(MESSAGE_KEY) {
            Ok(Some(message)) if !message.is_empty() => message,
            Ok(_) => DEFAULT_MESSAGE.to_string(),
            Err(e) => {
                log::warn!("Could not read the saved greeting: {}", e);
                DEFAULT_MESSAGE.to_string()
            }
        };

        Greeting {
            name: String::new(),
            message,
        }
    }

    /// Replaces the message and saves it. A store failure is logged; the new
    /// message is kept in memory either way.
    pub fn save(&mut self, store: &mut dyn KeyValueStore, message: &str) -> bool {
        self.message = message.to_string();

        match store.set(MESSAGE_KEY, message) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save the greeting: {}", e);
                false
            }
        }
    }
}

/// The editing dialog of the card.
///
/// Opening it copies the current message into a draft; only
/// [`save`](Self::save) hands the draft back.
#[derive(Clone, Debug, Default)]
pub struct CardDialog {
    open: bool,
    draft: String,
}

impl CardDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, initial: &str) {
        self.open = true;
        self.draft = initial.to_string();
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        if self.open {
            self.draft = text.into();
        }
    }

    /// Closes the dialog, returning the draft to save.
    pub fn save(&mut self) -> Option<String> {
        if !self.open {
            return None;
        }

        self.open = false;
        Some(std::mem::take(&mut self.draft))
    }

    /// Closes the dialog, dropping the draft.
    pub fn close(&mut self) {
        self.open = false;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _: &str) -> Result<Option<String>> {
            Err(Error::Io(std::io::Error::other("denied")))
        }

        fn set(&mut self, _: &str, _: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::other("denied")))
        }
    }

    #[test]
    fn test_load_falls_back_to_the_default() {
        assert_eq!(Greeting::load(&MemoryStore::new()).message, DEFAULT_MESSAGE);
        assert_eq!(Greeting::load(&BrokenStore).message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut greeting = Greeting::default();

        assert!(greeting.save(&mut store, "Happy 2027"));
        assert_eq!(Greeting::load(&store).message, "Happy 2027");

        assert!(!greeting.save(&mut BrokenStore, "kept anyway"));
        assert_eq!(greeting.message, "kept anyway");
    }

    #[test]
    fn test_dialog_only_returns_saved_drafts() {
        let mut dialog = CardDialog::new();
        dialog.edit("ignored while closed");
        assert_eq!(dialog.save(), None);

        dialog.open("hello");
        dialog.edit("hello there");
        assert_eq!(dialog.save().as_deref(), Some("hello there"));
        assert!(!dialog.is_open());
    }
}
