use crate::commands::{format_color, format_time};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scratchwin_core::{GameConfig, Result, Storage};
use scratchwin_game::{start_game, PlayOutcome, Point, PointerEvent, ScratchGame};

pub async fn handle_play_command(
    seed: Option<u64>,
    storage: &Storage,
    config: &GameConfig,
) -> Result<()> {
    let mut game = match seed {
        Some(seed) => ScratchGame::start(storage, config, &mut StdRng::seed_from_u64(seed))?,
        None => start_game(storage, config)?,
    };

    println!("Scratch & Win");
    println!("  Card: {}", game.cover_text());

    if game.already_played() {
        println!();
        println!("You already took part in this promotion.");
        println!("Only one card per device is allowed.");
        println!("  Your prize: {}", game.prize().display_text());
        println!("  Card color: {}", format_color(game.prize().color));
        if let Some(played_at) = game.played_at() {
            println!("  Played on: {}", format_time(played_at));
        }
        return Ok(());
    }

    println!("  {} prizes in the draw. Good luck!", game.available_prizes());
    println!();

    let surface = game.surface();
    let path = sweep_path(surface.width(), surface.height(), surface.brush_radius());

    let mut outcome = None;
    let mut last_reported = 0;
    for event in path {
        if let Some(result) = game.handle(event)? {
            outcome = Some(result);
            break;
        }

        let progress = game.surface().progress_percent();
        if progress >= last_reported + 10 {
            last_reported = progress - progress % 10;
            println!("  scratched {:>3}%", last_reported);
        }
    }

    let Some(outcome) = outcome else {
        println!("The card was not fully scratched.");
        return Ok(());
    };

    let clear = match &outcome {
        PlayOutcome::Committed { clear, .. } | PlayOutcome::Revealed { clear } => *clear,
    };
    tokio::time::sleep(game.surface().clear_delay()).await;
    game.finish_reveal(clear);

    println!("  scratched {:>3}%", game.surface().progress_percent());
    println!();

    match outcome {
        PlayOutcome::Committed {
            prize, played_at, ..
        } => {
            println!("Congratulations! {}", prize.display_text());
            println!("  Card color: {}", format_color(prize.color));
            println!("  Recorded on: {}", format_time(played_at));
        }
        PlayOutcome::Revealed { .. } => {
            println!("{}", game.prize().display_text());
            println!("Nothing was recorded. Ask an operator to add prizes.");
        }
    }

    Ok(())
}

/// Serpentine drag over the card, one row per brush radius
fn sweep_path(width: u32, height: u32, brush_radius: f64) -> Vec<PointerEvent> {
    let step = brush_radius.max(1.0);
    let (width, height) = (f64::from(width), f64::from(height));
    let mut events = Vec::new();

    let mut y = step / 2.0;
    let mut left_to_right = true;
    while y < height + step / 2.0 {
        let (start, end) = if left_to_right {
            (0.0, width)
        } else {
            (width, 0.0)
        };

        events.push(PointerEvent::Down(Point::new(start, y)));
        let strokes = (width / (step / 2.0)).ceil() as usize;
        for i in 1..=strokes {
            let t = i as f64 / strokes as f64;
            events.push(PointerEvent::Move(Point::new(start + (end - start) * t, y)));
        }
        events.push(PointerEvent::Up);

        y += step;
        left_to_right = !left_to_right;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use scratchwin_core::SurfaceConfig;
    use scratchwin_game::ScratchSurface;

    #[test]
    fn test_sweep_path_reveals_surface() {
        let config = SurfaceConfig::default();
        let mut surface = ScratchSurface::new(&config);

        let revealed = sweep_path(config.width, config.height, config.brush_radius)
            .into_iter()
            .filter_map(|event| surface.handle(event))
            .count();

        assert_eq!(revealed, 1);
        assert!(surface.is_revealed());
    }

    #[test]
    fn test_sweep_path_degenerate_surface() {
        let events = sweep_path(0, 0, 30.0);
        assert!(events.len() <= 3);
    }
}
