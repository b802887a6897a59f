use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity used to express steps and boundary offsets.
///
/// Units up to `Hours` (and `HalfDays`) are fixed-length. `Days` and `Weeks` are
/// calendar days and `Months` and longer use calendar month arithmetic, so their
/// exact length depends on the instant type being advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
}

/// A signed amount of a unit, resolved into the arithmetic chrono offers for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span {
    Exact(TimeDelta),
    Days(i64),
    Months(i64),
}

impl Unit {
    pub const ALL: [Unit; 14] = [
        Unit::Nanos,
        Unit::Micros,
        Unit::Millis,
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
        Unit::HalfDays,
        Unit::Days,
        Unit::Weeks,
        Unit::Months,
        Unit::Years,
        Unit::Decades,
        Unit::Centuries,
        Unit::Millennia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Nanos => "nanos",
            Unit::Micros => "micros",
            Unit::Millis => "millis",
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::HalfDays => "half_days",
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Months => "months",
            Unit::Years => "years",
            Unit::Decades => "decades",
            Unit::Centuries => "centuries",
            Unit::Millennia => "millennia",
        }
    }

    /// `None` when `amount` of this unit overflows chrono's representation.
    pub(crate) fn span(self, amount: i64) -> Option<Span> {
        let span = match self {
            Unit::Nanos => Span::Exact(TimeDelta::nanoseconds(amount)),
            Unit::Micros => Span::Exact(TimeDelta::microseconds(amount)),
            Unit::Millis => Span::Exact(TimeDelta::try_milliseconds(amount)?),
            Unit::Seconds => Span::Exact(TimeDelta::try_seconds(amount)?),
            Unit::Minutes => Span::Exact(TimeDelta::try_minutes(amount)?),
            Unit::Hours => Span::Exact(TimeDelta::try_hours(amount)?),
            Unit::HalfDays => Span::Exact(TimeDelta::try_hours(amount.checked_mul(12)?)?),
            Unit::Days => Span::Days(amount),
            Unit::Weeks => Span::Days(amount.checked_mul(7)?),
            Unit::Months => Span::Months(amount),
            Unit::Years => Span::Months(amount.checked_mul(12)?),
            Unit::Decades => Span::Months(amount.checked_mul(120)?),
            Unit::Centuries => Span::Months(amount.checked_mul(1_200)?),
            Unit::Millennia => Span::Months(amount.checked_mul(12_000)?),
        };
        Some(span)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "ns" | "nano" | "nanos" | "nanoseconds" => Unit::Nanos,
            "us" | "micro" | "micros" | "microseconds" => Unit::Micros,
            "ms" | "milli" | "millis" | "milliseconds" => Unit::Millis,
            "s" | "sec" | "second" | "seconds" => Unit::Seconds,
            "m" | "min" | "minute" | "minutes" => Unit::Minutes,
            "h" | "hour" | "hours" => Unit::Hours,
            "half_day" | "half_days" | "halfdays" => Unit::HalfDays,
            "d" | "day" | "days" => Unit::Days,
            "w" | "week" | "weeks" => Unit::Weeks,
            "mo" | "month" | "months" => Unit::Months,
            "y" | "year" | "years" => Unit::Years,
            "decade" | "decades" => Unit::Decades,
            "century" | "centuries" => Unit::Centuries,
            "millennium" | "millennia" => Unit::Millennia,
            other => return Err(format!("unknown time unit '{}'", other)),
        };
        Ok(unit)
    }
}
