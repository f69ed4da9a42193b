use crate::error::Result;
use crate::storage::{keys, KvStore};
use crate::types::{default_catalog, Prize};

pub struct CatalogStore<'a, S: KvStore + ?Sized> {
    storage: &'a S,
}

impl<'a, S: KvStore + ?Sized> CatalogStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Load the saved catalog, or the default seed list if none was saved
    /// or the saved value cannot be parsed.
    pub fn load_prizes(&self) -> Result<Vec<Prize>> {
        let Some(raw) = self.storage.get(keys::PRIZES)? else {
            tracing::debug!("No saved catalog, using default prizes");
            return Ok(default_catalog());
        };

        match serde_json::from_str::<Vec<Prize>>(&raw) {
            Ok(prizes) => Ok(prizes),
            Err(e) => {
                tracing::warn!("Saved catalog is malformed, using default prizes: {}", e);
                Ok(default_catalog())
            }
        }
    }

    pub fn save_prizes(&self, prizes: &[Prize]) -> Result<()> {
        let json = serde_json::to_string(prizes)?;
        self.storage.set(keys::PRIZES, &json)?;

        tracing::info!("Saved catalog with {} prizes", prizes.len());
        Ok(())
    }
}
