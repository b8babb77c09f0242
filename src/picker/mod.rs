mod bounds;
mod grid;
mod nav;
mod overlay;
mod state;
mod widget;
pub(crate) use self::state::{DatePicker, PickerInput, PickerOutput};
pub(crate) use self::widget::PickerPopup;
use std::cmp::Ordering;
use std::fmt;
use time::{Date, Month};

/// Earliest year whose month grid (including spillover days) fits within the
/// range of `time::Date`
const MIN_YEAR: i32 = Date::MIN.year() + 1;

/// Latest year whose month grid (including spillover days) fits within the
/// range of `time::Date`
const MAX_YEAR: i32 = Date::MAX.year() - 1;

/// A calendar month as displayed by the picker's grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// Returns `None` if a full grid for the month cannot be represented
    pub(crate) fn new(year: i32, month: Month) -> Option<YearMonth> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&year)
            .then_some(YearMonth { year, month })
    }

    /// The month containing `date`, clamped to the representable range
    pub(crate) fn of(date: Date) -> YearMonth {
        if date.year() < MIN_YEAR {
            YearMonth {
                year: MIN_YEAR,
                month: Month::January,
            }
        } else if date.year() > MAX_YEAR {
            YearMonth {
                year: MAX_YEAR,
                month: Month::December,
            }
        } else {
            YearMonth {
                year: date.year(),
                month: date.month(),
            }
        }
    }

    pub(crate) fn year(self) -> i32 {
        self.year
    }

    pub(crate) fn month(self) -> Month {
        self.month
    }

    pub(crate) fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("first day of a month in the supported range should be valid")
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub(crate) fn previous(self) -> Option<YearMonth> {
        match self.month {
            Month::January => YearMonth::new(self.year - 1, Month::December),
            m => Some(YearMonth {
                year: self.year,
                month: m.previous(),
            }),
        }
    }

    pub(crate) fn next(self) -> Option<YearMonth> {
        match self.month {
            Month::December => YearMonth::new(self.year + 1, Month::January),
            m => Some(YearMonth {
                year: self.year,
                month: m.next(),
            }),
        }
    }

    fn key(self) -> (i32, u8) {
        (self.year, u8::from(self.month))
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &YearMonth) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &YearMonth) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
