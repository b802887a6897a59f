#[cfg(feature = "cli")]
pub mod cli;
pub mod range_file;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use range_file::{BoundaryConfig, OutputConfig, RangeFile, RangeSection, StepConfig};
