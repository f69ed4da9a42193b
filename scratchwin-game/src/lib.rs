//! Scratch-and-win game logic
//!
//! A weighted draw picks what sits under the cover, and a scratch surface
//! tracks how much of the cover the visitor has erased. Crossing the reveal
//! threshold commits the prize for this device.

pub mod game;
pub mod selector;
pub mod surface;

pub use game::{GameInfo, PlayOutcome, ScratchGame};
pub use selector::{pick, select, total_weight};
pub use surface::{
    ClearTicket, Point, PointerEvent, ScratchSurface, SurfaceEvent, SurfaceState,
};

use scratchwin_core::{GameConfig, KvStore, Result};

/// Start a visit with the thread-local RNG
pub fn start_game<'a, S: KvStore + ?Sized>(
    storage: &'a S,
    config: &GameConfig,
) -> Result<ScratchGame<'a, S>> {
    ScratchGame::start(storage, config, &mut rand::rng())
}
