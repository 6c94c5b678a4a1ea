use crate::reports;
use clap::Args;
use strum::IntoEnumIterator;
use swimset::catalog::Catalog;
use swimset::config::Config;
use swimset::levels::Level;

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub config: Config,

    /// Only show one level
    #[arg(short, long)]
    pub level: Option<String>,
}

pub fn run(args: CatalogArgs, catalog: &Catalog, config: &Config) {
    let levels: Vec<Level> = match args.level.as_deref() {
        Some(input) => vec![Level::resolve(input, config.allocation.default_level)],
        None => Level::iter().collect(),
    };

    for level in levels {
        reports::print_catalog_level(catalog, level);
    }
    reports::print_fillers(catalog);
}
