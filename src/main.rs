use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use std::sync::Arc;
use swimset::catalog::Catalog;
use swimset::config::Config;
use swimset::error::SwimResult;
use tracing::{error, info, warn};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Yardage-matching swim workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON catalog to use instead of the built-in one
    #[arg(global = true, long)]
    catalog: Option<String>,

    /// JSON file with allocation parameters; CLI flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a workout for a level and yard target
    Generate(cmd::generate::GenerateArgs),
    /// Print the block catalog
    Catalog(cmd::catalog::CatalogArgs),
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&str>) -> SwimResult<Arc<Catalog>> {
    match path {
        Some(p) => Ok(Arc::new(Catalog::load_from_file(p)?)),
        None => {
            info!("📚 Using built-in catalog");
            Ok(Catalog::shared())
        }
    }
}

/// File config (if any) as the base, explicit CLI flags on top.
fn resolve_config(
    cli_config: &Config,
    file: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> SwimResult<Config> {
    let Some(path) = file else {
        cli_config.check()?;
        return Ok(cli_config.clone());
    };

    info!("⚙️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    match sub_matches {
        Some(m) => config.merge_from_cli(cli_config, m),
        None => warn!("No subcommand matches found, CLI overrides ignored"),
    }
    config.check()?;
    Ok(config)
}

fn main() {
    // Raw matches tell user input apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);
    info!("🏊 Initializing Swimset...");

    let catalog = load_catalog(cli.catalog.as_deref()).unwrap_or_else(|e| {
        error!("❌ Could not load catalog: {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Generate(args) => {
            let sub_matches = matches.subcommand_matches("generate");
            resolve_config(&args.config, cli.config.as_deref(), sub_matches)
                .and_then(|config| cmd::generate::run(args, catalog, config))
        }
        Commands::Catalog(args) => {
            let sub_matches = matches.subcommand_matches("catalog");
            resolve_config(&args.config, cli.config.as_deref(), sub_matches).map(|config| {
                cmd::catalog::run(args, &catalog, &config);
            })
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
