use crate::reports;
use clap::Args;
use std::sync::Arc;
use swimset::allocator::AllocationMode;
use swimset::api::{generate_workout, parse_yard_range, WorkoutRequest};
use swimset::catalog::Catalog;
use swimset::config::Config;
use swimset::error::SwimResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// beginner, intermediate or advanced (case-insensitive)
    #[arg(short, long, default_value = "intermediate")]
    pub level: String,

    /// Target yards: a number ("1500") or a range ("1000-2000", midpoint is used)
    #[arg(short, long, default_value = "1000")]
    pub yards: String,

    #[arg(short, long, value_enum, default_value_t = AllocationMode::GrandTotal)]
    pub mode: AllocationMode,

    /// Try to splice a drill block into the main set (grand-total mode)
    #[arg(long, default_value_t = false)]
    pub drills: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Print the workout as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: GenerateArgs, catalog: Arc<Catalog>, config: Config) -> SwimResult<()> {
    let target = parse_yard_range(&args.yards);
    info!("🎯 Target: {} yds ({})", target, args.mode);

    let request = WorkoutRequest {
        level: args.level,
        target,
        mode: args.mode,
        include_drills: args.drills,
        seed: args.seed,
    };
    let workout = generate_workout(catalog, config, &request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&workout)?);
    } else {
        reports::print_workout(&workout);
    }
    Ok(())
}
