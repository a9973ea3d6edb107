//! Clock conversion command.

use clap::Args;
use trainroom_core::{format_minutes_to_time, ClockTime};

#[derive(Args)]
pub struct ClockArgs {
    /// Elapsed minutes (fractions are rounded)
    #[arg(allow_hyphen_values = true)]
    pub minutes: f64,
    /// Start time as HH:MM (defaults to 00:00)
    #[arg(long)]
    pub start: Option<ClockTime>,
}

pub fn run(args: ClockArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_minutes_to_time(args.minutes, args.start));
    Ok(())
}
