pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{local::LocalStorage, remote_db::RemoteDatabase};
pub use config::AppConfig;
pub use core::{setup::SetupService, stats::StatsService};
pub use domain::maturity::{
    calculate_age, calculate_age_today, classify, get_islamic_level, IslamicLevel, Role,
};
pub use utils::error::{AppError, Result};
