//! Save and restore of machine state across lifecycle boundaries.
//!
//! Hosts typically tear down and recreate the owner of a state machine
//! (screen rotation, process death). Guards and actions cannot be
//! persisted, so only the scalar slots are written to an [`InstanceStore`];
//! everything else is rebuilt by constructing the owner again.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;

pub use error::PersistError;

/// Version identifier for the encoded bundle format
pub const BUNDLE_VERSION: u32 = 1;

/// Keyed scalar storage that survives a save/restore cycle.
pub trait InstanceStore {
    fn put_bool(&mut self, key: &str, value: bool);

    fn get_bool(&self, key: &str) -> Option<bool>;

    fn put_text(&mut self, key: &str, value: &str);

    fn get_text(&self, key: &str) -> Option<String>;
}

/// Write `state` under `key` as its serialized form.
pub fn save_state<S: State>(
    store: &mut dyn InstanceStore,
    key: &str,
    state: S,
) -> Result<(), PersistError> {
    let encoded =
        serde_json::to_string(&state).map_err(|e| PersistError::Serialization(e.to_string()))?;
    store.put_text(key, &encoded);
    Ok(())
}

/// Read a state written by [`save_state`].
///
/// Returns `Ok(None)` when nothing was saved under `key`.
pub fn load_state<S: State>(
    store: &dyn InstanceStore,
    key: &str,
) -> Result<Option<S>, PersistError> {
    let Some(encoded) = store.get_text(key) else {
        return Ok(None);
    };

    serde_json::from_str(&encoded)
        .map(Some)
        .map_err(|_| PersistError::CorruptState {
            key: key.to_string(),
        })
}

/// A single stored value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Bool(bool),
    Text(String),
}

/// In-memory [`InstanceStore`] that can itself be encoded.
///
/// JSON suits inspection and debugging; the binary form is compact and
/// meant for handing across a process boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    version: u32,
    slots: BTreeMap<String, Slot>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            version: BUNDLE_VERSION,
            slots: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.slots.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(|e| PersistError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let bundle: Bundle =
            serde_json::from_str(json).map_err(|e| PersistError::Deserialization(e.to_string()))?;
        bundle.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        bincode::serialize(self).map_err(|e| PersistError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let bundle: Bundle =
            bincode::deserialize(bytes).map_err(|e| PersistError::Deserialization(e.to_string()))?;
        bundle.check_version()
    }

    fn check_version(self) -> Result<Self, PersistError> {
        if self.version != BUNDLE_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.version,
                supported: BUNDLE_VERSION,
            });
        }
        Ok(self)
    }
}

impl InstanceStore for Bundle {
    fn put_bool(&mut self, key: &str, value: bool) {
        self.slots.insert(key.to_string(), Slot::Bool(value));
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.slots.get(key) {
            Some(Slot::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn put_text(&mut self, key: &str, value: &str) {
        self.slots
            .insert(key.to_string(), Slot::Text(value.to_string()));
    }

    fn get_text(&self, key: &str) -> Option<String> {
        match self.slots.get(key) {
            Some(Slot::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }
}
