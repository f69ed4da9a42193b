pub mod participation;
pub mod play;
pub mod prize;
pub mod session;

pub use participation::{reset_participation, show_status};
pub use play::handle_play_command;
pub use prize::{handle_prize_command, PrizeCommands};
pub use session::{handle_session_command, SessionCommands};

use chrono::{DateTime, Local, Utc};
use scratchwin_core::{GameConfig, KvStore, PrizeColor, Result, SessionGuard};

pub(crate) fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%B %-d, %Y %H:%M")
        .to_string()
}

/// "Blue (#60a5fa > #22d3ee > #14b8a6)"
pub(crate) fn format_color(color: PrizeColor) -> String {
    format!("{} ({})", color.label(), color.gradient().join(" > "))
}

pub(crate) fn require_admin<S: KvStore + ?Sized>(storage: &S, config: &GameConfig) -> Result<()> {
    SessionGuard::with_ttl(storage, config.session_ttl()).require(Utc::now())
}
