//! Expiry calendar for NSE/BSE index derivatives.
//!
//! Each index settles weekly on its own weekday; monthly contracts settle
//! on the last Thursday of the month regardless of the weekly cycle.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::domain::shared::Symbol;

/// Weekly expiries projected into the future.
pub const WEEKLY_COUNT: usize = 8;

/// Months of monthly expiries projected, current month included.
pub const MONTHLY_MONTHS: usize = 4;

/// The weekday a symbol's weekly contracts expire on.
///
/// Unlisted symbols follow the NIFTY cycle.
#[must_use]
pub fn expiry_weekday(symbol: &Symbol) -> Weekday {
    match symbol.as_str() {
        "MIDCPNIFTY" => Weekday::Mon,
        "FINNIFTY" => Weekday::Tue,
        "BANKNIFTY" => Weekday::Wed,
        "SENSEX" => Weekday::Fri,
        "NIFTY" => Weekday::Thu,
        _ => Weekday::Thu,
    }
}

/// Upcoming expiry dates for a symbol, sorted ascending and deduplicated.
///
/// Projects the next [`WEEKLY_COUNT`] weekly expiries (the reference date
/// itself counts when it falls on the expiry weekday) plus the monthly
/// expiry of the current and the next [`MONTHLY_MONTHS`] - 1 months.
/// Monthly dates already in the past are skipped.
#[must_use]
pub fn upcoming_expiries(symbol: &Symbol, from: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(WEEKLY_COUNT + MONTHLY_MONTHS);

    let Some(first) = next_weekday_on_or_after(from, expiry_weekday(symbol)) else {
        return dates;
    };

    let mut weekly = first;
    for _ in 0..WEEKLY_COUNT {
        dates.push(weekly);
        let Some(next) = weekly.checked_add_days(Days::new(7)) else {
            break;
        };
        weekly = next;
    }

    let (mut year, mut month) = (from.year(), from.month());
    for _ in 0..MONTHLY_MONTHS {
        if let Some(expiry) = last_weekday_of_month(year, month, Weekday::Thu) {
            if expiry >= from {
                dates.push(expiry);
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    dates.sort_unstable();
    dates.dedup();
    dates
}

/// The nearest upcoming expiry for a symbol, if the calendar is non-empty.
#[must_use]
pub fn nearest_expiry(symbol: &Symbol, from: NaiveDate) -> Option<NaiveDate> {
    upcoming_expiries(symbol, from).into_iter().next()
}

fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead =
        (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(ahead)))
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;

    let mut date = first_of_next.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}
