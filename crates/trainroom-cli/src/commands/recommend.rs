//! Exercise fit and recommendation commands.

use clap::Args;
use trainroom_core::{
    check_exercise_fit, get_quick_alternatives_from, get_recommendations_from, Config, PickKind,
    Recommendation,
};

use super::args::PlanArgs;

#[derive(Args)]
pub struct FitArgs {
    /// Exercise ID
    pub exercise_id: String,
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_fit(args: FitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;
    let plan = args.plan.resolve(&config);

    let exercise = catalog
        .find(&args.exercise_id)
        .ok_or_else(|| format!("exercise not found: {}", args.exercise_id))?;
    let fit = check_exercise_fit(exercise, &plan.block, &plan.room, plan.participants, plan.level);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
        return Ok(());
    }

    match (fit.fits, fit.reason.as_deref()) {
        (true, _) => println!(
            "{} fits: {:.1} of {} min.",
            exercise.title,
            fit.estimated_minutes.unwrap_or_default(),
            plan.block.window_minutes
        ),
        (false, Some(reason)) => println!("{} does not fit: {reason}", exercise.title),
        (false, None) => println!("{} does not fit.", exercise.title),
    }
    Ok(())
}

fn print_recommendations(recs: &[Recommendation]) {
    if recs.is_empty() {
        println!("No fitting exercises found.");
        return;
    }

    let mut printed_rescue_header = false;
    for (i, rec) in recs.iter().enumerate() {
        if rec.kind == PickKind::Rescue && !printed_rescue_header {
            println!("\nShorter rescue options:");
            printed_rescue_header = true;
        }
        println!(
            "{}. {:<26} score {:.2}  {:.1} min",
            i + 1,
            rec.exercise.id,
            rec.score,
            rec.estimated_minutes
        );
        println!("   {}", rec.reason);
    }
}

pub fn run_recommend(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;
    let plan = args.plan.resolve(&config);

    let recs = get_recommendations_from(
        catalog.exercises(),
        &plan.block,
        &plan.room,
        plan.participants,
        plan.level,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
    } else {
        print_recommendations(&recs);
    }
    Ok(())
}

pub fn run_alternatives(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;
    let plan = args.plan.resolve(&config);

    let alts = get_quick_alternatives_from(
        catalog.exercises(),
        &plan.block,
        &plan.room,
        plan.participants,
        plan.level,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&alts)?);
    } else {
        print_recommendations(&alts);
    }
    Ok(())
}
