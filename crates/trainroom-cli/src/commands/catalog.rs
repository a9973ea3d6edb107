//! Exercise catalog commands.

use clap::Subcommand;
use trainroom_core::{BlockType, Config, Exercise};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List exercises
    List {
        /// Only exercises of this block type
        #[arg(long = "type", value_name = "TYPE")]
        block_type: Option<BlockType>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one exercise
    Show {
        /// Exercise ID
        id: String,
    },
}

fn assets_label(ex: &Exercise) -> String {
    let needs = &ex.required_assets;
    let mut parts = Vec::new();
    if needs.tables {
        parts.push("tables".to_string());
    }
    if needs.flipchart_count > 0 {
        parts.push(format!("{} flipchart(s)", needs.flipchart_count));
    }
    if needs.screen {
        parts.push("screen".to_string());
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Config::load()?.catalog()?;

    match action {
        CatalogAction::List { block_type, json } => {
            let exercises: Vec<&Exercise> = catalog
                .exercises()
                .iter()
                .filter(|e| block_type.map_or(true, |t| e.block_type == t))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&exercises)?);
                return Ok(());
            }

            if exercises.is_empty() {
                println!("No exercises found.");
                return Ok(());
            }
            for ex in exercises {
                println!(
                    "{:<28} {:<18} {:>3}-{:<3} min  {:>2}-{:<3} people  {}",
                    ex.id,
                    ex.block_type,
                    ex.time_range_min,
                    ex.time_range_max,
                    ex.participant_range_min,
                    ex.participant_range_max,
                    ex.title
                );
            }
        }
        CatalogAction::Show { id } => {
            let ex = catalog
                .find(&id)
                .ok_or_else(|| format!("exercise not found: {id}"))?;
            println!("{} ({})", ex.title, ex.id);
            println!("  Type:         {}", ex.block_type.display_name());
            println!("  Duration:     {}-{} min", ex.time_range_min, ex.time_range_max);
            println!(
                "  Participants: {}-{}",
                ex.participant_range_min, ex.participant_range_max
            );
            println!("  Assets:       {}", assets_label(ex));
            println!("  Dynamics:     {}", ex.dynamics);
            if !ex.description.is_empty() {
                println!("\n{}", ex.description);
            }
        }
    }
    Ok(())
}
