use crate::selector;
use crate::surface::{ClearTicket, PointerEvent, ScratchSurface, SurfaceEvent};
use chrono::{DateTime, Utc};
use rand::Rng;
use scratchwin_core::{CatalogStore, GameConfig, KvStore, ParticipationStore, Prize, Result};
use serde::{Deserialize, Serialize};

pub const COVER_TEXT: &str = "Scratch to reveal your gift";
pub const PLAYED_COVER_TEXT: &str = "You already played";

/// What a handled pointer event meant for the page
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    /// Threshold crossed and the prize recorded for this device
    Committed {
        prize: Prize,
        played_at: DateTime<Utc>,
        clear: ClearTicket,
    },
    /// Threshold crossed on a card that is not committed (the empty-catalog placeholder)
    Revealed { clear: ClearTicket },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub prize: Prize,
    pub already_played: bool,
    pub played_at: Option<DateTime<Utc>>,
    pub available_prizes: usize,
    pub progress_percent: u8,
}

/// One visit to the public page
pub struct ScratchGame<'a, S: KvStore + ?Sized> {
    participation: ParticipationStore<'a, S>,
    surface: ScratchSurface,
    prize: Prize,
    already_played: bool,
    played_at: Option<DateTime<Utc>>,
    available_prizes: usize,
    pending_commit: Option<ClearTicket>,
}

impl<'a, S: KvStore + ?Sized> ScratchGame<'a, S> {
    /// Load the catalog and decide what sits under the cover. A device that
    /// already played gets its stored prize back on a disabled surface.
    pub fn start<R: Rng>(storage: &'a S, config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let catalog = CatalogStore::new(storage).load_prizes()?;
        let participation = ParticipationStore::new(storage);
        let mut surface = ScratchSurface::new(&config.surface);

        let already_played = participation.has_played()?;
        let (prize, played_at) = if already_played {
            surface.disable();
            let prize = participation.stored_prize()?.unwrap_or_else(|| {
                tracing::warn!("Device has played but no stored prize was found");
                Prize::sentinel()
            });
            (prize, participation.played_at()?)
        } else {
            (selector::select(&catalog, rng), None)
        };

        tracing::info!(
            "Game started (already played: {}, {} prizes available)",
            already_played,
            catalog.len()
        );

        Ok(Self {
            participation,
            surface,
            prize,
            already_played,
            played_at,
            available_prizes: catalog.len(),
            pending_commit: None,
        })
    }

    pub fn prize(&self) -> &Prize {
        &self.prize
    }

    pub fn surface(&self) -> &ScratchSurface {
        &self.surface
    }

    pub fn already_played(&self) -> bool {
        self.already_played
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.played_at
    }

    pub fn available_prizes(&self) -> usize {
        self.available_prizes
    }

    /// A reveal whose commit failed; the next `handle` retries it
    pub fn commit_pending(&self) -> bool {
        self.pending_commit.is_some()
    }

    pub fn cover_text(&self) -> &'static str {
        if self.already_played {
            PLAYED_COVER_TEXT
        } else {
            COVER_TEXT
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> Result<Option<PlayOutcome>> {
        if let Some(clear) = self.pending_commit {
            return self.on_revealed(clear).map(Some);
        }

        match self.surface.handle(event) {
            Some(SurfaceEvent::Revealed(clear)) => self.on_revealed(clear).map(Some),
            None => Ok(None),
        }
    }

    fn on_revealed(&mut self, clear: ClearTicket) -> Result<PlayOutcome> {
        if self.already_played || self.prize.is_sentinel() {
            return Ok(PlayOutcome::Revealed { clear });
        }

        let now = Utc::now();
        if let Err(e) = self.participation.commit(&self.prize, now) {
            tracing::warn!("Failed to record participation, will retry: {}", e);
            self.pending_commit = Some(clear);
            return Err(e);
        }

        self.pending_commit = None;
        self.already_played = true;
        self.played_at = Some(now);
        self.surface.disable();

        Ok(PlayOutcome::Committed {
            prize: self.prize.clone(),
            played_at: now,
            clear,
        })
    }

    /// Run the delayed clear scheduled by a reveal
    pub fn finish_reveal(&mut self, clear: ClearTicket) -> bool {
        self.surface.apply_clear(clear)
    }

    /// Re-cover the card; only possible before the prize is committed
    pub fn reset_card(&mut self) -> bool {
        if self.pending_commit.is_some() {
            return false;
        }
        self.surface.reset()
    }

    pub fn get_info(&self) -> GameInfo {
        GameInfo {
            prize: self.prize.clone(),
            already_played: self.already_played,
            played_at: self.played_at,
            available_prizes: self.available_prizes,
            progress_percent: self.surface.progress_percent(),
        }
    }
}
