//! Application services - Save slot management over a key-value store

use log::{error, warn};

use crate::config::SaveConfig;
use crate::domain::repositories::{KeyValueStore, RepositoryError};
use crate::storage;
use crate::types::save::{SaveRecord, SaveState};

/// Numbered save slots (`0..max_slots`) stored under `{prefix}{slot}` keys.
///
/// Slot numbers are validated up front and rejected with
/// [`RepositoryError::InvalidSlot`]. Storage failures are logged and reported as
/// `false` / `None` so the caller can carry on playing.
pub struct SaveSlots<S> {
    store: S,
    max_slots: usize,
    key_prefix: String,
}

impl<S: KeyValueStore> SaveSlots<S> {
    pub fn new(store: S, config: &SaveConfig) -> Self {
        Self {
            store,
            max_slots: config.max_slots,
            key_prefix: config.key_prefix.clone(),
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage key for a slot
    pub fn key(&self, slot: usize) -> Result<String, RepositoryError> {
        if slot >= self.max_slots {
            return Err(RepositoryError::InvalidSlot {
                slot,
                max_slots: self.max_slots,
            });
        }
        Ok(format!("{}{slot}", self.key_prefix))
    }

    /// Write `state` into `slot`; `Ok(false)` when the store fails
    pub async fn save(&self, slot: usize, state: &SaveState) -> Result<bool, RepositoryError> {
        let key = self.key(slot)?;
        let bytes = match storage::to_bytes(state) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(target: "tsuzuri::save", "Failed to encode save for slot {slot}: {e}");
                return Ok(false);
            }
        };

        match self.store.set(&key, &bytes).await {
            Ok(()) => Ok(true),
            Err(e) => {
                error!(target: "tsuzuri::save", "Failed to write slot {slot}: {e}");
                Ok(false)
            }
        }
    }

    /// Read `slot`; `Ok(None)` when it is empty, unreadable or corrupt
    pub async fn load(&self, slot: usize) -> Result<Option<SaveState>, RepositoryError> {
        let key = self.key(slot)?;
        let bytes = match self.store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(e) => {
                error!(target: "tsuzuri::save", "Failed to read slot {slot}: {e}");
                return Ok(None);
            }
        };

        match storage::from_bytes(&bytes) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(target: "tsuzuri::save", "Ignoring corrupt save in slot {slot}: {e}");
                Ok(None)
            }
        }
    }

    /// Every occupied slot, in slot order
    pub async fn list_all(&self) -> Vec<SaveRecord> {
        let mut records = Vec::new();
        for slot in 0..self.max_slots {
            if let Ok(Some(state)) = self.load(slot).await {
                records.push(SaveRecord { slot, state });
            }
        }
        records
    }

    /// Clear `slot`; `Ok(false)` when the store fails
    pub async fn delete(&self, slot: usize) -> Result<bool, RepositoryError> {
        let key = self.key(slot)?;
        match self.store.remove(&key).await {
            Ok(()) => Ok(true),
            Err(e) => {
                error!(target: "tsuzuri::save", "Failed to delete slot {slot}: {e}");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryKeyValueStore;
    use async_trait::async_trait;

    fn state(block: usize) -> SaveState {
        SaveState {
            current_block_index: block,
            current_instruction_index: 1,
            current_bg: None,
            current_portrait: None,
            current_bgm: Some("M01".into()),
            saved_at: 0,
            event_id: None,
            screenplay_fingerprint: None,
        }
    }

    fn slots() -> SaveSlots<InMemoryKeyValueStore> {
        SaveSlots::new(InMemoryKeyValueStore::new(), &SaveConfig::default())
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
            Err(RepositoryError::Unavailable {
                reason: "offline".into(),
            })
        }

        async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable {
                reason: "offline".into(),
            })
        }

        async fn remove(&self, _key: &str) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable {
                reason: "offline".into(),
            })
        }
    }

    #[tokio::test]
    async fn save_load_delete() {
        let slots = slots();
        assert!(slots.save(3, &state(4)).await.unwrap());
        assert_eq!(slots.load(3).await.unwrap(), Some(state(4)));
        assert!(slots.store().get("alive_save_3").await.unwrap().is_some());

        assert!(slots.delete(3).await.unwrap());
        assert_eq!(slots.load(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn out_of_range_slot_is_rejected() {
        let slots = slots();
        assert!(matches!(
            slots.save(20, &state(0)).await,
            Err(RepositoryError::InvalidSlot {
                slot: 20,
                max_slots: 20
            })
        ));
        assert!(slots.load(99).await.is_err());
        assert!(slots.delete(20).await.is_err());
        assert!(slots.store().is_empty());
    }

    #[tokio::test]
    async fn list_all_is_keyed_by_slot() {
        let slots = slots();
        slots.save(7, &state(7)).await.unwrap();
        slots.save(0, &state(0)).await.unwrap();

        let records = slots.list_all().await;
        let occupied: Vec<usize> = records.iter().map(|r| r.slot).collect();
        assert_eq!(occupied, vec![0, 7]);
        assert_eq!(records[1].state, state(7));
    }

    #[tokio::test]
    async fn corrupt_entry_loads_as_none() {
        let slots = slots();
        slots.store().set("alive_save_2", b"not json").await.unwrap();
        assert_eq!(slots.load(2).await.unwrap(), None);
        assert!(slots.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn storage_failures_are_reported_not_raised() {
        let slots = SaveSlots::new(BrokenStore, &SaveConfig::default());
        assert!(!slots.save(0, &state(0)).await.unwrap());
        assert_eq!(slots.load(0).await.unwrap(), None);
        assert!(!slots.delete(0).await.unwrap());
        assert!(slots.list_all().await.is_empty());
    }
}
