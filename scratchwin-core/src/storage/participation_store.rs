use crate::error::Result;
use crate::storage::{keys, KvStore};
use crate::types::Prize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What this device has on record for the promotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub played: bool,
    pub played_at: Option<DateTime<Utc>>,
    pub awarded_prize: Option<Prize>,
}

pub struct ParticipationStore<'a, S: KvStore + ?Sized> {
    storage: &'a S,
}

impl<'a, S: KvStore + ?Sized> ParticipationStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn has_played(&self) -> Result<bool> {
        Ok(self.storage.get(keys::PLAYED)?.as_deref() == Some("true"))
    }

    pub fn mark_played(&self) -> Result<()> {
        self.mark_played_at(Utc::now())
    }

    pub fn mark_played_at(&self, at: DateTime<Utc>) -> Result<()> {
        self.storage
            .set(keys::PLAYED_AT, &at.timestamp_millis().to_string())?;
        self.storage.set(keys::PLAYED, "true")?;
        Ok(())
    }

    pub fn played_at(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.storage.get(keys::PLAYED_AT)? else {
            return Ok(None);
        };

        let parsed = raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);

        if parsed.is_none() {
            tracing::warn!("Ignoring malformed participation timestamp: {}", raw);
        }
        Ok(parsed)
    }

    pub fn stored_prize(&self) -> Result<Option<Prize>> {
        let Some(raw) = self.storage.get(keys::AWARDED_PRIZE)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(prize) => Ok(Some(prize)),
            Err(e) => {
                tracing::warn!("Ignoring malformed awarded prize: {}", e);
                Ok(None)
            }
        }
    }

    pub fn set_stored_prize(&self, prize: &Prize) -> Result<()> {
        let json = serde_json::to_string(prize)?;
        self.storage.set(keys::AWARDED_PRIZE, &json)?;
        Ok(())
    }

    /// Record the one attempt this device gets. The played flag is written
    /// last, so a failed commit never leaves a flag without its prize.
    pub fn commit(&self, prize: &Prize, at: DateTime<Utc>) -> Result<()> {
        self.set_stored_prize(prize)?;
        self.storage
            .set(keys::PLAYED_AT, &at.timestamp_millis().to_string())?;
        self.storage.set(keys::PLAYED, "true")?;

        tracing::info!("Participation committed with prize '{}'", prize.title);
        Ok(())
    }

    pub fn record(&self) -> Result<ParticipationRecord> {
        Ok(ParticipationRecord {
            played: self.has_played()?,
            played_at: self.played_at()?,
            awarded_prize: self.stored_prize()?,
        })
    }

    /// Clear this device's participation. The catalog is left alone.
    pub fn reset(&self) -> Result<()> {
        self.storage.remove(keys::PLAYED)?;
        self.storage.remove(keys::PLAYED_AT)?;
        self.storage.remove(keys::AWARDED_PRIZE)?;

        tracing::info!("Participation reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScratchError;
    use crate::storage::{CatalogStore, MemoryStore};
    use crate::types::default_catalog;
    use chrono::Duration;
    use std::cell::Cell;

    /// Fails the write numbered `fail_at` (1-based), then behaves normally
    struct FailingStore {
        inner: MemoryStore,
        writes: Cell<u32>,
        fail_at: u32,
    }

    impl KvStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let n = self.writes.get() + 1;
            self.writes.set(n);
            if n == self.fail_at {
                return Err(ScratchError::internal("disk full"));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_absent_record_means_not_played() {
        let store = MemoryStore::new();
        let participation = ParticipationStore::new(&store);

        assert!(!participation.has_played().unwrap());
        assert_eq!(participation.played_at().unwrap(), None);
        assert_eq!(participation.stored_prize().unwrap(), None);
    }

    #[test]
    fn test_commit_then_reset() {
        let store = MemoryStore::new();
        let participation = ParticipationStore::new(&store);
        let prize = default_catalog().remove(2);

        let before = Utc::now();
        participation.commit(&prize, Utc::now()).unwrap();

        assert!(participation.has_played().unwrap());
        assert_eq!(participation.stored_prize().unwrap(), Some(prize));
        let played_at = participation.played_at().unwrap().unwrap();
        assert!(played_at.timestamp_millis() >= before.timestamp_millis());

        participation.reset().unwrap();
        assert_eq!(
            participation.record().unwrap(),
            ParticipationRecord {
                played: false,
                played_at: None,
                awarded_prize: None,
            }
        );
    }

    #[test]
    fn test_later_commit_has_later_timestamp() {
        let store = MemoryStore::new();
        let participation = ParticipationStore::new(&store);
        let prize = default_catalog().remove(0);

        let first = Utc::now();
        participation.commit(&prize, first).unwrap();
        let first_seen = participation.played_at().unwrap().unwrap();

        participation.reset().unwrap();
        participation
            .commit(&prize, first + Duration::seconds(5))
            .unwrap();
        let second_seen = participation.played_at().unwrap().unwrap();

        assert!(second_seen > first_seen);
    }

    #[test]
    fn test_failed_commit_leaves_device_unplayed() {
        let prize = default_catalog().remove(1);

        for fail_at in 1..=3 {
            let store = FailingStore {
                inner: MemoryStore::new(),
                writes: Cell::new(0),
                fail_at,
            };
            let participation = ParticipationStore::new(&store);

            assert!(participation.commit(&prize, Utc::now()).is_err());
            assert!(!participation.has_played().unwrap(), "write {} failed", fail_at);

            participation.commit(&prize, Utc::now()).unwrap();
            assert!(participation.has_played().unwrap());
            assert_eq!(participation.stored_prize().unwrap(), Some(prize.clone()));
        }
    }

    #[test]
    fn test_played_flag_requires_exact_true() {
        let store = MemoryStore::new();
        store.set(keys::PLAYED, "yes").unwrap();
        assert!(!ParticipationStore::new(&store).has_played().unwrap());
    }

    #[test]
    fn test_malformed_values_read_as_absent() {
        let store = MemoryStore::new();
        store.set(keys::PLAYED_AT, "yesterday").unwrap();
        store.set(keys::AWARDED_PRIZE, "{\"id\":").unwrap();

        let participation = ParticipationStore::new(&store);
        assert_eq!(participation.played_at().unwrap(), None);
        assert_eq!(participation.stored_prize().unwrap(), None);
    }

    #[test]
    fn test_reset_keeps_catalog() {
        let store = MemoryStore::new();
        let catalog = CatalogStore::new(&store);
        catalog.save_prizes(&default_catalog()[..2]).unwrap();

        let participation = ParticipationStore::new(&store);
        participation
            .commit(&default_catalog()[0], Utc::now())
            .unwrap();
        participation.reset().unwrap();

        assert_eq!(catalog.load_prizes().unwrap().len(), 2);
    }
}
