//! Operator-facing catalog mutations. Every mutation persists the full catalog.

use crate::error::{Result, ScratchError};
use crate::storage::{CatalogStore, KvStore};
use crate::types::{NewPrize, Prize, PrizeUpdate};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Weights are expected to add up to this, but nothing enforces it
pub const TARGET_TOTAL: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    Balanced,
    /// Points missing to reach the target
    Under(i64),
    /// Points over the target
    Over(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBalance {
    pub total: i64,
    pub deviation: i64,
    pub status: BalanceStatus,
}

impl CatalogBalance {
    pub fn of(prizes: &[Prize]) -> Self {
        let total: i64 = prizes.iter().map(|p| i64::from(p.probability)).sum();
        let deviation = total - TARGET_TOTAL;
        let status = match deviation {
            0 => BalanceStatus::Balanced,
            d if d < 0 => BalanceStatus::Under(-d),
            d => BalanceStatus::Over(d),
        };

        Self {
            total,
            deviation,
            status,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.status == BalanceStatus::Balanced
    }
}

pub struct PrizeCatalog<'a, S: KvStore + ?Sized> {
    store: CatalogStore<'a, S>,
    prizes: Vec<Prize>,
}

impl<'a, S: KvStore + ?Sized> PrizeCatalog<'a, S> {
    pub fn load(storage: &'a S) -> Result<Self> {
        let store = CatalogStore::new(storage);
        let prizes = store.load_prizes()?;
        Ok(Self { store, prizes })
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn get(&self, id: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    pub fn balance(&self) -> CatalogBalance {
        CatalogBalance::of(&self.prizes)
    }

    pub fn add(&mut self, new_prize: NewPrize) -> Result<Prize> {
        let title = validate_title(&new_prize.title)?;

        let prize = Prize {
            id: next_prize_id(&self.prizes, Utc::now().timestamp_millis()),
            title,
            emoji: new_prize.emoji.trim().to_string(),
            probability: new_prize.probability,
            color: new_prize.color,
        };

        let mut updated = self.prizes.clone();
        updated.push(prize.clone());
        self.persist(updated)?;

        tracing::info!("Added prize '{}' with ID: {}", prize.title, prize.id);
        Ok(prize)
    }

    pub fn edit(&mut self, id: &str, update: PrizeUpdate) -> Result<Prize> {
        let index = self.index_of(id)?;

        let mut prize = self.prizes[index].clone();
        if let Some(title) = update.title {
            prize.title = validate_title(&title)?;
        }
        if let Some(emoji) = update.emoji {
            prize.emoji = emoji.trim().to_string();
        }
        if let Some(probability) = update.probability {
            prize.probability = probability;
        }
        if let Some(color) = update.color {
            prize.color = color;
        }

        let mut updated = self.prizes.clone();
        updated[index] = prize.clone();
        self.persist(updated)?;

        tracing::info!("Updated prize {}", id);
        Ok(prize)
    }

    pub fn delete(&mut self, id: &str) -> Result<Prize> {
        let index = self.index_of(id)?;

        let mut updated = self.prizes.clone();
        let removed = updated.remove(index);
        self.persist(updated)?;

        tracing::info!("Deleted prize '{}' ({})", removed.title, id);
        Ok(removed)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.prizes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ScratchError::prize_not_found(id))
    }

    // in-memory copy only changes once the write went through
    fn persist(&mut self, prizes: Vec<Prize>) -> Result<()> {
        self.store.save_prizes(&prizes)?;
        self.prizes = prizes;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ScratchError::validation("Prize title cannot be empty"));
    }
    Ok(title.to_string())
}

/// Time-derived id, bumped past any numeric id already in the catalog
pub fn next_prize_id(existing: &[Prize], now_millis: i64) -> String {
    let highest = existing
        .iter()
        .filter_map(|p| p.id.parse::<i64>().ok())
        .max()
        .unwrap_or(i64::MIN);

    now_millis.max(highest.saturating_add(1)).to_string()
}
