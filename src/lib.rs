pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::RangeFile;
pub use crate::core::{
    from, from_now, from_now_utc, Boundary, BoundaryPolicy, Direction, RangeBuilder, RangeConfig,
    Step, Steppable, Steps, Unit,
};
pub use crate::utils::error::{Result, TimeStreamError};
