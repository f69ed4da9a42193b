//! scratchwin - core library for the scratch-and-win promotion
//!
//! Holds the prize data model and everything that lives in the visitor's
//! local key-value storage: the prize catalog, the participation record and
//! the admin session flag.

pub mod catalog;
pub mod config;
pub mod device;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use catalog::{BalanceStatus, CatalogBalance, PrizeCatalog};
pub use config::{GameConfig, SurfaceConfig};
pub use error::{Result, ScratchError};
pub use session::SessionGuard;
pub use storage::{
    CatalogStore, KvStore, MemoryStore, ParticipationRecord, ParticipationStore, Storage,
};
pub use types::{default_catalog, NewPrize, Prize, PrizeColor, PrizeUpdate};
