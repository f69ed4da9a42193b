use crate::commands::{format_color, require_admin};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use scratchwin_core::{
    BalanceStatus, CatalogBalance, GameConfig, NewPrize, PrizeCatalog, PrizeColor, PrizeUpdate,
    Result, ScratchError, Storage,
};

#[derive(Subcommand)]
pub enum PrizeCommands {
    /// List configured prizes
    List,
    /// Add a prize
    Add {
        /// Prize title
        title: String,
        /// Emoji shown next to the title
        #[arg(short, long, default_value = "")]
        emoji: String,
        /// Weight, expected between 1 and 100
        #[arg(short, long, default_value_t = 20)]
        probability: i32,
        /// Card color (yellow, blue, green, pink, purple, orange)
        #[arg(short, long, default_value = "yellow")]
        color: PrizeColor,
    },
    /// Edit a prize
    Edit {
        /// Prize ID
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        emoji: Option<String>,
        #[arg(short, long)]
        probability: Option<i32>,
        #[arg(short, long)]
        color: Option<PrizeColor>,
    },
    /// Delete a prize
    Delete {
        /// Prize ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show how far the weights are from 100
    Balance,
}

pub fn handle_prize_command(
    cmd: PrizeCommands,
    storage: &Storage,
    config: &GameConfig,
) -> Result<()> {
    let mut catalog = PrizeCatalog::load(storage)?;

    match cmd {
        PrizeCommands::List => {
            if catalog.prizes().is_empty() {
                println!("No prizes configured.");
                println!("Add one with: scratchwin prize add <title>");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Prize", "Probability", "Color"]);

            for prize in catalog.prizes() {
                table.add_row(vec![
                    prize.id.clone(),
                    prize.display_text(),
                    format!("{}%", prize.probability),
                    format_color(prize.color),
                ]);
            }

            println!("{}", table);
            print_balance(&catalog.balance());
        }

        PrizeCommands::Add {
            title,
            emoji,
            probability,
            color,
        } => {
            require_admin(storage, config)?;

            let prize = catalog.add(NewPrize {
                title,
                emoji,
                probability,
                color,
            })?;

            println!("Prize added successfully!");
            println!("  ID: {}", prize.id);
            println!("  Prize: {}", prize.display_text());
            println!("  Probability: {}%", prize.probability);
            println!("  Color: {}", format_color(prize.color));
            print_balance(&catalog.balance());
        }

        PrizeCommands::Edit {
            id,
            title,
            emoji,
            probability,
            color,
        } => {
            require_admin(storage, config)?;

            let update = PrizeUpdate {
                title,
                emoji,
                probability,
                color,
            };
            if update.is_empty() {
                return Err(ScratchError::validation(
                    "Nothing to change. Pass at least one of --title, --emoji, --probability, --color",
                ));
            }

            let prize = catalog.edit(&id, update)?;
            println!("Prize '{}' updated: {}", prize.id, prize.display_text());
            print_balance(&catalog.balance());
        }

        PrizeCommands::Delete { id, force } => {
            require_admin(storage, config)?;

            let title = catalog
                .get(&id)
                .map(|p| p.title.clone())
                .ok_or_else(|| ScratchError::prize_not_found(&id))?;

            if !force {
                let confirm = Confirm::new()
                    .with_prompt(format!("Are you sure you want to delete prize '{}'?", title))
                    .default(false)
                    .interact()?;

                if !confirm {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            catalog.delete(&id)?;
            println!("Prize '{}' deleted successfully.", title);
            print_balance(&catalog.balance());
        }

        PrizeCommands::Balance => {
            println!("Total prizes: {}", catalog.prizes().len());
            println!("Total probability: {}%", catalog.balance().total);
            print_balance(&catalog.balance());
        }
    }

    Ok(())
}

fn print_balance(balance: &CatalogBalance) {
    match balance.status {
        BalanceStatus::Balanced => println!("Status: balanced (100%)"),
        BalanceStatus::Under(missing) => {
            println!("Status: adjust, {}% missing to reach 100%", missing)
        }
        BalanceStatus::Over(extra) => {
            println!("Status: adjust, {}% over 100%. Reduce the probabilities", extra)
        }
    }
}
