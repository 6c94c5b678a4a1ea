use crate::error::{SwimError, SwimResult};
use crate::levels::Level;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub allocation: AllocationParams,
    #[command(flatten)]
    pub drills: DrillParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationParams {
    /// Level used when the requested one is unknown or missing from the catalog
    #[arg(long, default_value_t = Level::Intermediate)]
    pub default_level: Level,

    /// Hard cap on greedy block picks per allocation
    #[arg(long, default_value_t = 200)]
    pub iteration_cap: usize,

    /// Totals accepted by the reconciler and drill injector land on this grid
    #[arg(long, default_value_t = 50)]
    pub rounding_unit: u32,
}

impl Default for AllocationParams {
    fn default() -> Self {
        Self {
            default_level: Level::Intermediate,
            iteration_cap: 200,
            rounding_unit: 50,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillParams {
    #[arg(long, default_value_t = 100)]
    pub max_drill_overshoot: u32,
}

impl Default for DrillParams {
    fn default() -> Self {
        Self {
            max_drill_overshoot: 100,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SwimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SwimError::Config(format!("Could not read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects values the allocation engine cannot work with.
    pub fn check(&self) -> SwimResult<()> {
        if self.allocation.rounding_unit == 0 {
            return Err(SwimError::Config(
                "rounding_unit must be greater than zero".to_string(),
            ));
        }
        if self.allocation.iteration_cap == 0 {
            return Err(SwimError::Config(
                "iteration_cap must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays only the flags the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(allocation, default_level);
        update_if_present!(allocation, iteration_cap);
        update_if_present!(allocation, rounding_unit);
        update_if_present!(drills, max_drill_overshoot);
    }
}
