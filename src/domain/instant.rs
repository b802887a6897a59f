use crate::domain::unit::{Span, Unit};
use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

/// A totally ordered point in time that can be moved by a signed offset.
///
/// Both advance operations return `None` when the result cannot be represented
/// by the type, either because it overflows or because the type has no notion
/// of the requested unit (sub-day units on a calendar date).
///
/// For `DateTime<Tz>` a calendar step (days, weeks, months) that lands in a
/// daylight-saving gap of the zone has no local time to map to and also yields
/// `None`. A traversal stops there, before its boundary, and logs a warning.
pub trait Steppable: Clone + Ord {
    /// Unit of the step used when a range is built without `every`.
    const DEFAULT_UNIT: Unit;

    fn advance(&self, amount: i64, unit: Unit) -> Option<Self>;

    fn advance_by(&self, delta: TimeDelta) -> Option<Self>;
}

fn by_days<T>(
    amount: i64,
    forward: impl FnOnce(Days) -> Option<T>,
    backward: impl FnOnce(Days) -> Option<T>,
) -> Option<T> {
    let days = Days::new(amount.unsigned_abs());
    if amount >= 0 {
        forward(days)
    } else {
        backward(days)
    }
}

fn by_months<T>(
    amount: i64,
    forward: impl FnOnce(Months) -> Option<T>,
    backward: impl FnOnce(Months) -> Option<T>,
) -> Option<T> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        forward(months)
    } else {
        backward(months)
    }
}

impl Steppable for NaiveDateTime {
    const DEFAULT_UNIT: Unit = Unit::Seconds;

    fn advance(&self, amount: i64, unit: Unit) -> Option<Self> {
        match unit.span(amount)? {
            Span::Exact(delta) => self.checked_add_signed(delta),
            Span::Days(days) => by_days(
                days,
                |d| self.checked_add_days(d),
                |d| self.checked_sub_days(d),
            ),
            Span::Months(months) => by_months(
                months,
                |m| self.checked_add_months(m),
                |m| self.checked_sub_months(m),
            ),
        }
    }

    fn advance_by(&self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(delta)
    }
}

impl<Tz: TimeZone> Steppable for DateTime<Tz> {
    const DEFAULT_UNIT: Unit = Unit::Seconds;

    fn advance(&self, amount: i64, unit: Unit) -> Option<Self> {
        match unit.span(amount)? {
            Span::Exact(delta) => self.clone().checked_add_signed(delta),
            Span::Days(days) => by_days(
                days,
                |d| self.clone().checked_add_days(d),
                |d| self.clone().checked_sub_days(d),
            ),
            Span::Months(months) => by_months(
                months,
                |m| self.clone().checked_add_months(m),
                |m| self.clone().checked_sub_months(m),
            ),
        }
    }

    fn advance_by(&self, delta: TimeDelta) -> Option<Self> {
        self.clone().checked_add_signed(delta)
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

// 日期只接受整天的位移，其餘單位視為無法表示
fn whole_days(delta: TimeDelta) -> Option<i64> {
    if delta.subsec_nanos() == 0 && delta.num_seconds() % SECONDS_PER_DAY == 0 {
        Some(delta.num_days())
    } else {
        None
    }
}

impl Steppable for NaiveDate {
    const DEFAULT_UNIT: Unit = Unit::Days;

    fn advance(&self, amount: i64, unit: Unit) -> Option<Self> {
        match unit.span(amount)? {
            Span::Exact(delta) => self.advance_by(delta),
            Span::Days(days) => by_days(
                days,
                |d| self.checked_add_days(d),
                |d| self.checked_sub_days(d),
            ),
            Span::Months(months) => by_months(
                months,
                |m| self.checked_add_months(m),
                |m| self.checked_sub_months(m),
            ),
        }
    }

    fn advance_by(&self, delta: TimeDelta) -> Option<Self> {
        let days = whole_days(delta)?;
        by_days(
            days,
            |d| self.checked_add_days(d),
            |d| self.checked_sub_days(d),
        )
    }
}
