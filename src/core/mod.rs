pub mod builder;
pub mod range;
pub mod steps;

pub use crate::domain::instant::Steppable;
pub use crate::domain::unit::Unit;
pub use crate::utils::error::Result;
pub use builder::{from, from_now, from_now_utc, RangeBuilder};
pub use range::{Boundary, BoundaryPolicy, Direction, RangeConfig, Step};
pub use steps::Steps;
