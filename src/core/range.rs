use crate::core::steps::Steps;
use crate::domain::instant::Steppable;
use crate::domain::unit::Unit;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the end instant itself belongs to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    Inclusive,
    Exclusive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary<T> {
    pub end: T,
    pub policy: BoundaryPolicy,
}

impl<T: Ord> Boundary<T> {
    pub fn inclusive(end: T) -> Self {
        Self {
            end,
            policy: BoundaryPolicy::Inclusive,
        }
    }

    pub fn exclusive(end: T) -> Self {
        Self {
            end,
            policy: BoundaryPolicy::Exclusive,
        }
    }

    /// Whether `point` has not yet passed the end when moving in `direction`.
    pub fn admits(&self, point: &T, direction: Direction) -> bool {
        match (self.policy, direction) {
            (BoundaryPolicy::Inclusive, Direction::Forward) => *point <= self.end,
            (BoundaryPolicy::Inclusive, Direction::Backward) => *point >= self.end,
            (BoundaryPolicy::Exclusive, Direction::Forward) => *point < self.end,
            (BoundaryPolicy::Exclusive, Direction::Backward) => *point > self.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Unbounded ranges always run forward; bounded ones run towards their end.
    pub fn infer<T: Ord>(start: &T, boundary: Option<&Boundary<T>>) -> Self {
        match boundary {
            Some(boundary) if boundary.end < *start => Direction::Backward,
            _ => Direction::Forward,
        }
    }

    pub fn signum(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// True when `to` lies strictly beyond `from` in this direction.
    pub fn advanced<T: Ord>(self, from: &T, to: &T) -> bool {
        match self {
            Direction::Forward => to > from,
            Direction::Backward => to < from,
        }
    }
}

/// Distance between two consecutive points. Always holds a positive magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Units { amount: i64, unit: Unit },
    Duration(TimeDelta),
}

impl Step {
    pub fn units(amount: i64, unit: Unit) -> Self {
        Step::Units {
            amount: amount.saturating_abs(),
            unit,
        }
    }

    pub fn duration(delta: TimeDelta) -> Self {
        if delta < TimeDelta::zero() {
            Step::Duration(-delta)
        } else {
            Step::Duration(delta)
        }
    }

    pub fn apply<T: Steppable>(&self, point: &T, direction: Direction) -> Option<T> {
        match *self {
            Step::Units { amount, unit } => point.advance(direction.signum() * amount, unit),
            Step::Duration(delta) => match direction {
                Direction::Forward => point.advance_by(delta),
                Direction::Backward => point.advance_by(-delta),
            },
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Units { amount, unit } => write!(f, "{} {}", amount, unit),
            Step::Duration(delta) => write!(f, "{}", delta),
        }
    }
}

/// Frozen range configuration.
///
/// Producing a sequence never mutates the configuration, so `iter` can be called
/// any number of times and every call starts a fresh traversal at `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConfig<T> {
    start: T,
    boundary: Option<Boundary<T>>,
    step: Step,
    direction: Direction,
}

impl<T: Steppable> RangeConfig<T> {
    pub(crate) fn new(start: T, boundary: Option<Boundary<T>>, step: Step) -> Self {
        let direction = Direction::infer(&start, boundary.as_ref());
        Self {
            start,
            boundary,
            step,
            direction,
        }
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn boundary(&self) -> Option<&Boundary<T>> {
        self.boundary.as_ref()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_bounded(&self) -> bool {
        self.boundary.is_some()
    }

    pub fn iter(&self) -> Steps<T> {
        Steps::new(
            self.start.clone(),
            self.boundary.clone(),
            self.step,
            self.direction,
        )
    }
}

impl<'a, T: Steppable> IntoIterator for &'a RangeConfig<T> {
    type Item = T;
    type IntoIter = Steps<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Steppable> IntoIterator for RangeConfig<T> {
    type Item = T;
    type IntoIter = Steps<T>;

    fn into_iter(self) -> Self::IntoIter {
        Steps::new(self.start, self.boundary, self.step, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_admits() {
        let inclusive = Boundary::inclusive(5);
        assert!(inclusive.admits(&5, Direction::Forward));
        assert!(inclusive.admits(&4, Direction::Forward));
        assert!(!inclusive.admits(&6, Direction::Forward));
        assert!(inclusive.admits(&5, Direction::Backward));
        assert!(!inclusive.admits(&4, Direction::Backward));

        let exclusive = Boundary::exclusive(5);
        assert!(!exclusive.admits(&5, Direction::Forward));
        assert!(exclusive.admits(&4, Direction::Forward));
        assert!(!exclusive.admits(&5, Direction::Backward));
        assert!(exclusive.admits(&6, Direction::Backward));
    }

    #[test]
    fn test_direction_inference() {
        assert_eq!(Direction::infer(&3, None), Direction::Forward);
        assert_eq!(
            Direction::infer(&3, Some(&Boundary::inclusive(3))),
            Direction::Forward
        );
        assert_eq!(
            Direction::infer(&3, Some(&Boundary::exclusive(7))),
            Direction::Forward
        );
        assert_eq!(
            Direction::infer(&3, Some(&Boundary::inclusive(-1))),
            Direction::Backward
        );
    }

    #[test]
    fn test_step_keeps_only_magnitude() {
        assert_eq!(Step::units(-2, Unit::Seconds), Step::units(2, Unit::Seconds));
        assert_eq!(
            Step::duration(TimeDelta::seconds(-2)),
            Step::Duration(TimeDelta::seconds(2))
        );
        assert_eq!(Step::units(i64::MIN, Unit::Nanos).to_string(), format!("{} nanos", i64::MAX));
        assert_eq!(Step::units(3, Unit::Minutes).to_string(), "3 minutes");
        assert_eq!(Step::duration(TimeDelta::seconds(2)).to_string(), "PT2S");
    }
}
