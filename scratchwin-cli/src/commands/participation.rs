use crate::commands::{format_time, require_admin};
use dialoguer::Confirm;
use scratchwin_core::device::device_tag;
use scratchwin_core::{GameConfig, ParticipationStore, PrizeCatalog, Result, Storage};

pub fn show_status(storage: &Storage) -> Result<()> {
    let record = ParticipationStore::new(storage).record()?;
    let catalog = PrizeCatalog::load(storage)?;

    println!("Participation status:");
    println!("  Device tag: {} (informational only)", device_tag());
    println!("  Played: {}", if record.played { "yes" } else { "no" });

    if let Some(played_at) = record.played_at {
        println!("  Played at: {}", format_time(played_at));
    }
    if let Some(prize) = &record.awarded_prize {
        println!("  Prize: {}", prize.display_text());
    }

    println!();
    let count = catalog.prizes().len();
    println!(
        "{} prize{} available",
        count,
        if count == 1 { "" } else { "s" }
    );

    Ok(())
}

pub fn reset_participation(force: bool, storage: &Storage, config: &GameConfig) -> Result<()> {
    require_admin(storage, config)?;

    if !force {
        let confirm = Confirm::new()
            .with_prompt(
                "Reset participation on this device? It will be able to play again. Prizes are not affected.",
            )
            .default(false)
            .interact()?;

        if !confirm {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    ParticipationStore::new(storage).reset()?;
    println!("Participation reset. This device can play again.");

    Ok(())
}
