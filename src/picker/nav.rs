use super::YearMonth;
use thiserror::Error;
use time::{Date, Month};

/// Tracks which month the picker is showing, independently of the selected
/// date.  Moving forwards stops at the month containing `today`; moving
/// backwards is only limited by the range of representable dates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Navigator {
    today: Date,
    shown: YearMonth,
}

impl Navigator {
    pub(crate) fn new(today: Date) -> Navigator {
        Navigator {
            today,
            shown: YearMonth::of(today),
        }
    }

    pub(crate) fn shown(&self) -> YearMonth {
        self.shown
    }

    /// Show the month of `value`, or of today if there is no value
    pub(crate) fn reset_to(&mut self, value: Option<Date>) {
        self.shown = YearMonth::of(value.unwrap_or(self.today));
    }

    fn latest(&self) -> YearMonth {
        YearMonth::of(self.today)
    }

    fn starts_by_today(&self, ym: YearMonth) -> bool {
        ym.first_day() <= self.today
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.shown = self.shown.previous().ok_or(OutOfTimeError)?;
        Ok(())
    }

    pub(crate) fn can_go_next(&self) -> bool {
        self.shown.next().is_some_and(|ym| self.starts_by_today(ym))
    }

    /// Returns `false` (leaving the state unchanged) if the next month starts
    /// after today
    pub(crate) fn next_month(&mut self) -> bool {
        match self.shown.next() {
            Some(ym) if self.starts_by_today(ym) => {
                self.shown = ym;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn month_enabled(&self, month: Month) -> bool {
        YearMonth::new(self.shown.year(), month).is_some_and(|ym| self.starts_by_today(ym))
    }

    /// Returns `false` (leaving the state unchanged) if `month` of the shown
    /// year starts after today
    pub(crate) fn jump_to_month(&mut self, month: Month) -> bool {
        match YearMonth::new(self.shown.year(), month) {
            Some(ym) if self.starts_by_today(ym) => {
                self.shown = ym;
                true
            }
            _ => false,
        }
    }

    /// Keeps the shown month unless that would put the display past today's
    /// month, in which case today's month is shown.  Returns `false` if
    /// `year` is outside the representable range.
    pub(crate) fn jump_to_year(&mut self, year: i32) -> bool {
        let Some(ym) = YearMonth::new(year, self.shown.month()) else {
            return false;
        };
        self.shown = ym.min(self.latest());
        true
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
