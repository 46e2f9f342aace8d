use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// calendar-aware time between two pawn contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoldingPeriod {
    pub months: u32,
    pub days: u32,
}

impl HoldingPeriod {
    pub const ZERO: HoldingPeriod = HoldingPeriod { months: 0, days: 0 };

    pub fn new(months: u32, days: u32) -> Self {
        Self { months, days }
    }

    /// calendar difference from `start` to `end`.
    ///
    /// A negative day component borrows the length of the month before
    /// `end`'s month (28 to 31 days), a negative month component borrows a
    /// year, and years are folded into months. A start day past the end of
    /// the borrowed month rolls over to that month's last day, so jan 31 to
    /// mar 1 is one month and one day. `end` before `start` gives a zero
    /// period.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            return Self::ZERO;
        }

        let mut years = end.year() - start.year();
        let mut months = end.month() as i32 - start.month() as i32;
        let mut days = end.day() as i32 - start.day() as i32;

        if days < 0 {
            months -= 1;
            let (prev_year, prev_month) = previous_month(end.year(), end.month());
            let borrowed = days_in_month(prev_year, prev_month) as i32;
            // a plain borrow (borrowed - start.day + end.day) goes negative
            // when the borrowed month is shorter than the start day, e.g.
            // jan 31 -> mar 1 gives 29 - 31 + 1 = -1 and would collapse the
            // whole period to zero. Clamping the start day to the borrowed
            // month's last day gives 1 month 1 day instead.
            days = (borrowed - start.day() as i32).max(0) + end.day() as i32;
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        let total_months = years * 12 + months;
        if total_months < 0 || days < 0 {
            return Self::ZERO;
        }

        Self {
            months: total_months as u32,
            days: days as u32,
        }
    }

    /// period between two optional dates, zero unless both are set
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self::between(start, end),
            _ => Self::ZERO,
        }
    }

    /// period between two `YYYY-MM-DD` strings; malformed text gives zero
    pub fn from_iso(start: &str, end: &str) -> Self {
        Self::from_dates(parse_date(start), parse_date(end))
    }

    /// period from `start` until today on the supplied clock
    pub fn elapsed_since(start: NaiveDate, time_provider: &SafeTimeProvider) -> Self {
        Self::between(start, time_provider.now().date_naive())
    }

    pub fn is_empty(&self) -> bool {
        self.months == 0 && self.days == 0
    }
}

impl fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bulan {} hari", self.months, self.days)
    }
}

/// parse a `YYYY-MM-DD` date, `None` for anything else
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// number of days in the given month, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
