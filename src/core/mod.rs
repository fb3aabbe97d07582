pub mod quotes;
pub mod repository;
pub mod seed;
pub mod setup;
pub mod stats;

pub use crate::domain::model::{ApiResponse, Quote};
pub use crate::domain::ports::{Database, Pipeline, Storage};
pub use crate::utils::error::Result;
