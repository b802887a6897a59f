//! Fluent builder for date-time ranges.
//!
//! ```
//! use timestream::{RangeBuilder, Unit};
//! use chrono::NaiveDateTime;
//!
//! let t0: NaiveDateTime = "2024-06-01T10:00:00".parse().unwrap();
//! let points: Vec<_> = RangeBuilder::new(t0)
//!     .to_offset(3, Unit::Seconds)?
//!     .every(2, Unit::Seconds)?
//!     .stream()
//!     .collect();
//! assert_eq!(points.len(), 2);
//! # Ok::<(), timestream::TimeStreamError>(())
//! ```
//!
//! The direction of travel comes from the endpoints alone: a range whose end lies
//! before its start runs backward whatever the sign of the configured step.

use crate::core::range::{Boundary, Direction, RangeConfig, Step};
use crate::core::steps::Steps;
use crate::domain::instant::Steppable;
use crate::domain::unit::Unit;
use crate::utils::error::{Result, TimeStreamError};
use crate::utils::validation::{
    validate_non_zero_amount, validate_non_zero_duration, validate_required_field,
};
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBuilder<T> {
    start: T,
    boundary: Option<Boundary<T>>,
    step: Option<Step>,
}

impl<T: Steppable> RangeBuilder<T> {
    pub fn new(start: T) -> Self {
        Self {
            start,
            boundary: None,
            step: None,
        }
    }

    /// 起點可能不存在時使用 (例如來自配置檔)
    pub fn from_optional(start: Option<T>) -> Result<Self> {
        let start = validate_required_field("from", &start)?.clone();
        Ok(Self::new(start))
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    /// Ends the range at `end`, including it.
    pub fn to(self, end: T) -> Self {
        self.bounded(Boundary::inclusive(end))
    }

    /// Ends the range just before `end`.
    pub fn until(self, end: T) -> Self {
        self.bounded(Boundary::exclusive(end))
    }

    /// Inclusive end at `start` advanced by `amount` of `unit`; `amount` may be negative.
    pub fn to_offset(self, amount: i64, unit: Unit) -> Result<Self> {
        let end = self.offset_end("to", amount, unit)?;
        Ok(self.to(end))
    }

    pub fn until_offset(self, amount: i64, unit: Unit) -> Result<Self> {
        let end = self.offset_end("until", amount, unit)?;
        Ok(self.until(end))
    }

    pub fn to_offset_checked(self, amount: i64, unit: Option<Unit>) -> Result<Self> {
        let unit = *validate_required_field("to.unit", &unit)?;
        self.to_offset(amount, unit)
    }

    pub fn until_offset_checked(self, amount: i64, unit: Option<Unit>) -> Result<Self> {
        let unit = *validate_required_field("until.unit", &unit)?;
        self.until_offset(amount, unit)
    }

    /// Sets the step. Only the magnitude of `amount` is kept.
    pub fn every(self, amount: i64, unit: Unit) -> Result<Self> {
        validate_non_zero_amount("every", amount)?;
        self.stepped("every", Step::units(amount, unit))
    }

    pub fn every_checked(self, amount: i64, unit: Option<Unit>) -> Result<Self> {
        let unit = *validate_required_field("every.unit", &unit)?;
        self.every(amount, unit)
    }

    /// Sets the step from a duration. Only its length is kept.
    pub fn every_duration(self, delta: TimeDelta) -> Result<Self> {
        validate_non_zero_duration("every", delta)?;
        self.stepped("every", Step::duration(delta))
    }

    pub fn every_duration_checked(self, delta: Option<TimeDelta>) -> Result<Self> {
        let delta = *validate_required_field("every.duration", &delta)?;
        self.every_duration(delta)
    }

    pub fn build(self) -> RangeConfig<T> {
        let step = self
            .step
            .unwrap_or_else(|| Step::units(1, T::DEFAULT_UNIT));
        let config = RangeConfig::new(self.start, self.boundary, step);
        match config.boundary() {
            Some(boundary) => tracing::debug!(
                "Range configured: step {}, {:?} towards {:?} end",
                config.step(),
                config.direction(),
                boundary.policy
            ),
            None => tracing::debug!("Range configured: step {}, unbounded", config.step()),
        }
        config
    }

    /// Builds the configuration and starts a single traversal of it.
    pub fn stream(self) -> Steps<T> {
        self.build().into_iter()
    }

    fn bounded(mut self, boundary: Boundary<T>) -> Self {
        self.boundary = Some(boundary);
        self
    }

    fn stepped(mut self, field: &str, step: Step) -> Result<Self> {
        let forward = step.apply(&self.start, Direction::Forward);
        let backward = step.apply(&self.start, Direction::Backward);
        if forward.is_none() && backward.is_none() {
            return Err(TimeStreamError::InvalidStepMagnitude {
                field: field.to_string(),
                value: step.to_string(),
            });
        }
        self.step = Some(step);
        Ok(self)
    }

    fn offset_end(&self, field: &str, amount: i64, unit: Unit) -> Result<T> {
        self.start
            .advance(amount, unit)
            .ok_or_else(|| TimeStreamError::BoundaryOutOfRange {
                field: field.to_string(),
                amount,
                unit,
            })
    }
}

impl<T: Steppable> From<T> for RangeBuilder<T> {
    fn from(start: T) -> Self {
        Self::new(start)
    }
}

/// Starts a range at `start`.
pub fn from<T: Steppable>(start: T) -> RangeBuilder<T> {
    RangeBuilder::new(start)
}

/// Starts a range at the current local wall-clock time.
pub fn from_now() -> RangeBuilder<NaiveDateTime> {
    RangeBuilder::new(Local::now().naive_local())
}

pub fn from_now_utc() -> RangeBuilder<DateTime<Utc>> {
    RangeBuilder::new(Utc::now())
}
