use crate::commands::format_time;
use chrono::Utc;
use clap::Subcommand;
use scratchwin_core::{GameConfig, Result, SessionGuard, Storage};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start an admin session on this device
    Login,
    /// End the admin session
    Logout,
    /// Show whether an admin session is active
    Status,
}

pub fn handle_session_command(
    cmd: SessionCommands,
    storage: &Storage,
    config: &GameConfig,
) -> Result<()> {
    let guard = SessionGuard::with_ttl(storage, config.session_ttl());

    match cmd {
        SessionCommands::Login => {
            guard.login(Utc::now())?;
            println!("Admin session started.");
            if let Some(expires) = guard.expires_at()? {
                println!("  Expires: {}", format_time(expires));
            }
        }

        SessionCommands::Logout => {
            guard.logout()?;
            println!("Admin session ended.");
        }

        SessionCommands::Status => {
            if guard.is_authenticated(Utc::now())? {
                println!("Admin session active.");
                if let Some(expires) = guard.expires_at()? {
                    println!("  Expires: {}", format_time(expires));
                }
            } else {
                println!("No admin session.");
            }
        }
    }

    Ok(())
}
