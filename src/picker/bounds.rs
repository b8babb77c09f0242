use super::grid::CalendarCell;
use time::{Date, Month};

/// How far back a selectable date may lie, in years
pub(crate) const MAX_AGE_YEARS: i32 = 150;

/// The window of selectable dates as seen from a fixed `today`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    today: Date,
}

impl Bounds {
    pub(crate) fn new(today: Date) -> Bounds {
        Bounds { today }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        is_selectable(date, self.today)
    }

    /// Spillover cells are display-only, whatever their date
    pub(crate) fn cell_selectable(&self, cell: &CalendarCell) -> bool {
        cell.in_month && self.contains(cell.date)
    }
}

/// Nothing after today is selectable, nor anything more than
/// [`MAX_AGE_YEARS`] before it
pub(crate) fn is_selectable(date: Date, today: Date) -> bool {
    date <= today && years_before(today, MAX_AGE_YEARS) <= date
}

// 29 February in a year without one rolls over to 1 March.
fn years_before(date: Date, years: i32) -> Date {
    let year = date.year() - years;
    date.replace_year(year)
        .or_else(|_| Date::from_calendar_date(year, Month::March, 1))
        .unwrap_or(Date::MIN)
}
