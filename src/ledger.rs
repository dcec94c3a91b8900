//! Persistent balance and win/loss record.
//!
//! The [`Ledger`] is plain data. Loading and saving go through a
//! [`KeyValueStore`], which keeps three string entries: `balance`, `wins`
//! and `losses`.

use alloc::string::{String, ToString};

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;

/// Store key for the balance.
pub const BALANCE_KEY: &str = "balance";
/// Store key for the win count.
pub const WINS_KEY: &str = "wins";
/// Store key for the loss count.
pub const LOSSES_KEY: &str = "losses";

/// Largest balance a ledger holds.
///
/// Any balance at or below this can go all in and win without overflowing,
/// since a round pays at most twice what was staked. Stored balances above
/// it are treated as invalid, and settlement never credits past it.
pub const MAX_BALANCE: usize = usize::MAX / 2;

/// A string key-value store the ledger is persisted to.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Stores every `(key, value)` pair in one write.
    ///
    /// The default calls [`set`](Self::set) per entry. Stores that persist
    /// to a single resource override it so that either every entry is
    /// written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend cannot be written.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend cannot be written.
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// The player's balance and lifetime record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ledger {
    /// Chips available to bet.
    pub balance: usize,
    /// Hands won.
    pub wins: u32,
    /// Hands lost.
    pub losses: u32,
}

impl Ledger {
    /// Creates a fresh ledger with `balance` and no record.
    ///
    /// `balance` is capped at [`MAX_BALANCE`].
    #[must_use]
    pub const fn new(balance: usize) -> Self {
        let balance = if balance > MAX_BALANCE {
            MAX_BALANCE
        } else {
            balance
        };
        Self {
            balance,
            wins: 0,
            losses: 0,
        }
    }

    /// Loads the ledger from `store`.
    ///
    /// Entries that are absent, unparsable, or zero fall back to
    /// `default_balance` and a zero record. A balance above [`MAX_BALANCE`]
    /// is invalid too.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        default_balance: usize,
    ) -> Result<Self, StoreError> {
        let ledger = Self {
            balance: read_positive(store, BALANCE_KEY)?
                .filter(|balance| *balance <= MAX_BALANCE)
                .unwrap_or(default_balance.min(MAX_BALANCE)),
            wins: read_positive(store, WINS_KEY)?.unwrap_or(0),
            losses: read_positive(store, LOSSES_KEY)?.unwrap_or(0),
        };
        log::debug!(
            "loaded ledger: balance={} wins={} losses={}",
            ledger.balance,
            ledger.wins,
            ledger.losses
        );
        Ok(ledger)
    }

    /// Writes the ledger to `store` as one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let balance = self.balance.to_string();
        let wins = self.wins.to_string();
        let losses = self.losses.to_string();
        store.set_many(&[
            (BALANCE_KEY, balance.as_str()),
            (WINS_KEY, wins.as_str()),
            (LOSSES_KEY, losses.as_str()),
        ])
    }
}

fn read_positive<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: core::str::FromStr + Default + PartialEq,
{
    let parsed = store
        .get(key)?
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .filter(|value| *value != T::default());
    Ok(parsed)
}

/// A store held in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(feature = "json-store")]
pub use json::JsonFileStore;

#[cfg(feature = "json-store")]
mod json {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};

    use super::KeyValueStore;
    use crate::error::StoreError;

    /// A store kept as a single JSON object in a file.
    ///
    /// Entries are read once on open. Each write replaces the whole file by
    /// writing a sibling temporary file and renaming it over the original,
    /// so a batch from [`set_many`](KeyValueStore::set_many) lands entirely
    /// or not at all. A missing file is an empty store.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl JsonFileStore {
        /// Opens the store at `path`.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Read`] if the file exists but cannot be read
        /// or does not hold a JSON object of strings.
        pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
            let path = path.as_ref().to_path_buf();
            let entries = match fs::read_to_string(&path) {
                Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Read(e.to_string()))?,
                Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => return Err(StoreError::Read(e.to_string())),
            };
            Ok(Self { path, entries })
        }

        /// Returns the backing file path.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Writes `entries` to disk and adopts them once the rename lands.
        fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StoreError> {
            let raw = serde_json::to_string_pretty(&entries)
                .map_err(|e| StoreError::Write(e.to_string()))?;

            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            let tmp = PathBuf::from(tmp);

            fs::write(&tmp, raw)
                .and_then(|()| fs::rename(&tmp, &self.path))
                .map_err(|e| {
                    let _ = fs::remove_file(&tmp);
                    StoreError::Write(e.to_string())
                })?;

            self.entries = entries;
            Ok(())
        }
    }

    impl KeyValueStore for JsonFileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.set_many(&[(key, value)])
        }

        fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
            let mut next = self.entries.clone();
            for (key, value) in entries {
                next.insert((*key).to_string(), (*value).to_string());
            }
            self.commit(next)
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            self.commit(BTreeMap::new())
        }
    }
}
