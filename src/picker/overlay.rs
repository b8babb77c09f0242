use super::nav::Navigator;
use time::{
    Date,
    Month::{self, *},
};

/// Oldest year offered by the year shortcut list
pub(crate) const FIRST_LISTED_YEAR: i32 = 1900;

pub(crate) const MONTHS: [Month; 12] = [
    January, February, March, April, May, June, July, August, September, October, November,
    December,
];

/// Years offered by the year shortcut list, newest first
pub(crate) fn listed_years(today: Date) -> impl DoubleEndedIterator<Item = i32> {
    (FIRST_LISTED_YEAR.min(today.year())..=today.year()).rev()
}

pub(crate) fn year_count(today: Date) -> usize {
    listed_years(today).count()
}

pub(crate) fn year_at(today: Date, index: usize) -> Option<i32> {
    listed_years(today).nth(index)
}

/// Position of `year` in the year list, if it is listed
pub(crate) fn year_position(today: Date, year: i32) -> Option<usize> {
    listed_years(today).position(|y| y == year)
}

pub(crate) fn month_at(index: usize) -> Option<Month> {
    MONTHS.get(index).copied()
}

pub(crate) fn month_position(month: Month) -> usize {
    usize::from(u8::from(month)) - 1
}

/// An entry in the month shortcut list.  Months that cannot be jumped to are
/// still listed, but disabled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthEntry {
    pub(crate) month: Month,
    pub(crate) enabled: bool,
    pub(crate) current: bool,
}

pub(crate) fn month_entries(nav: &Navigator) -> [MonthEntry; 12] {
    MONTHS.map(|month| MonthEntry {
        month,
        enabled: nav.month_enabled(month),
        current: nav.shown().month() == month,
    })
}
