use super::YearMonth;
use std::iter::successors;
use time::{Date, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// The grid always shows six weeks, whether or not the month needs them
pub(crate) const GRID_WEEKS: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * GRID_WEEKS;

pub(super) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarCell {
    pub(crate) date: Date,
    /// `false` for spillover days from the neighboring months
    pub(crate) in_month: bool,
}

impl CalendarCell {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }
}

pub(crate) type Grid = [CalendarCell; GRID_CELLS];

/// Number of spillover days from the previous month shown before the 1st
pub(crate) fn leading_days(shown: YearMonth) -> usize {
    shown.first_day().weekday().index0()
}

pub(crate) fn build_grid(shown: YearMonth) -> Grid {
    let first = shown.first_day();
    let start = iter_days_before(first)
        .take(leading_days(shown))
        .last()
        .unwrap_or(first);
    let mut days = successors(Some(start), |&d| d.next_day());
    std::array::from_fn(|_| {
        let date = days
            .next()
            .expect("supported months should leave room for a full grid");
        CalendarCell {
            date,
            in_month: shown.contains(date),
        }
    })
}

/// Index of `date`'s cell in the grid for `shown`, if it is displayed at all
pub(crate) fn cell_index(shown: YearMonth, date: Date) -> Option<usize> {
    let offset = (date - shown.first_day()).whole_days();
    let index = i64::try_from(leading_days(shown)).ok()? + offset;
    usize::try_from(index).ok().filter(|&i| i < GRID_CELLS)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::{macros::date, Month};

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_grid_starting_midweek() {
        let grid = build_grid(ym(2023, Month::November));
        assert_eq!(grid[0].date, date!(2023 - 10 - 29));
        assert!(!grid[0].in_month);
        assert_eq!(grid[2].date, date!(2023 - 10 - 31));
        assert_eq!(grid[3].date, date!(2023 - 11 - 01));
        assert!(grid[3].in_month);
        assert_eq!(grid[32].date, date!(2023 - 11 - 30));
        assert!(grid[32].in_month);
        assert_eq!(grid[33].date, date!(2023 - 12 - 01));
        assert!(!grid[33].in_month);
        assert_eq!(grid[41].date, date!(2023 - 12 - 09));
    }

    #[test]
    fn test_grid_starting_sunday() {
        let grid = build_grid(ym(2026, Month::February));
        assert_eq!(grid[0].date, date!(2026 - 02 - 01));
        assert!(grid[0].in_month);
        assert_eq!(grid[27].day(), 28);
        assert!(grid[27].in_month);
        // Two full weeks of March pad the grid out to six weeks
        assert_eq!(grid[28].date, date!(2026 - 03 - 01));
        assert_eq!(grid[41].date, date!(2026 - 03 - 14));
        assert_eq!(grid.iter().filter(|c| !c.in_month).count(), 14);
    }

    #[test]
    fn test_grid_leap_february_spillover() {
        let grid = build_grid(ym(2024, Month::March));
        assert_eq!(leading_days(ym(2024, Month::March)), 5);
        assert_eq!(grid[0].date, date!(2024 - 02 - 25));
        assert_eq!(grid[4].date, date!(2024 - 02 - 29));
        assert_eq!(grid[5].date, date!(2024 - 03 - 01));
    }

    #[test]
    fn test_cell_index() {
        let shown = ym(2026, Month::October);
        assert_eq!(cell_index(shown, date!(2026 - 09 - 27)), Some(0));
        assert_eq!(cell_index(shown, date!(2026 - 10 - 19)), Some(22));
        assert_eq!(cell_index(shown, date!(2026 - 09 - 26)), None);
        assert_eq!(cell_index(shown, date!(2026 - 11 - 07)), Some(41));
        assert_eq!(cell_index(shown, date!(2026 - 11 - 08)), None);
    }

    proptest! {
        #[test]
        fn grid_layout_invariants(year in 1800i32..2200, month in 1u8..=12) {
            let month = Month::try_from(month).unwrap();
            let shown = ym(year, month);
            let grid = build_grid(shown);
            let lead = shown.first_day().weekday().number_days_from_sunday();
            prop_assert_eq!(grid.iter().take_while(|c| !c.in_month).count(), usize::from(lead));
            let in_month = grid.iter().filter(|c| c.in_month).collect::<Vec<_>>();
            prop_assert_eq!(in_month[0].day(), 1);
            let last = in_month[in_month.len() - 1].date;
            prop_assert!(last.next_day().map_or(true, |d| d.month() != month));
            for (i, c) in in_month.iter().enumerate() {
                prop_assert_eq!(usize::from(c.day()), i + 1);
                prop_assert_eq!(cell_index(shown, c.date), Some(usize::from(lead) + i));
            }
            for pair in grid.windows(2) {
                prop_assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
            }
            prop_assert_eq!(grid[0].date.weekday(), Weekday::Sunday);
        }
    }
}
