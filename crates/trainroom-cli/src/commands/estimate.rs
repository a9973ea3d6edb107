//! Time estimate command.

use clap::Args;
use trainroom_core::{estimate_block_time, Config};

use super::args::PlanArgs;

#[derive(Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Base minutes before adjustments (defaults to the window)
    #[arg(long)]
    pub base: Option<f64>,
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: EstimateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let plan = args.plan.resolve(&config);
    let base = args.base.unwrap_or(plan.block.window_minutes);

    let estimate = estimate_block_time(
        base,
        plan.level,
        plan.participants,
        plan.block.block_type,
        plan.room.template,
        plan.block.question_config.as_ref(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!(
        "{} block, {} participants ({}), {} room",
        plan.block.block_type.display_name(),
        plan.participants,
        plan.level,
        plan.room.template
    );
    println!("  Base:         {:>7.1} min", estimate.base_minutes);
    println!("  Experience:   {:>+7.1} min", estimate.experience_modifier);
    println!("  Overhead:     {:>+7.1} min", estimate.overhead);
    println!("  Interaction:  {:>+7.1} min", estimate.interaction);
    println!("  Total:        {:>7.1} min", estimate.total);

    let window = plan.block.window_minutes;
    if estimate.total <= window {
        println!("Fits the {window}-min window.");
    } else {
        println!(
            "Exceeds the {window}-min window by {:.1} min.",
            estimate.overage(window)
        );
    }
    Ok(())
}
