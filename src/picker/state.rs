use super::bounds::Bounds;
use super::grid::{build_grid, cell_index, CalendarCell, Grid, DAYS_IN_WEEK, GRID_CELLS};
use super::nav::Navigator;
use super::overlay::{
    month_at, month_entries, month_position, year_at, year_count, year_position, MonthEntry,
};
use super::YearMonth;
use time::Date;
use tracing::debug;

/// Which surface of the picker is visible.  At most one shortcut overlay can
/// be open, and it is always stacked on top of the calendar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerMode {
    Closed,
    Calendar,
    Years { cursor: usize },
    Months { cursor: usize },
}

/// A single-date picker bounded to dates between 150 years ago and today.
///
/// The picker never changes its own value: a committed date is handed to the
/// owner, which feeds whatever it accepts back in with
/// [`DatePicker::set_value`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker {
    label: &'static str,
    value: Option<Date>,
    bounds: Bounds,
    nav: Navigator,
    cursor: usize,
    mode: PickerMode,
}

impl DatePicker {
    pub(crate) fn new(label: &'static str, today: Date) -> DatePicker {
        let mut picker = DatePicker {
            label,
            value: None,
            bounds: Bounds::new(today),
            nav: Navigator::new(today),
            cursor: 0,
            mode: PickerMode::Closed,
        };
        picker.home_cursor();
        picker
    }

    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn value(&self) -> Option<Date> {
        self.value
    }

    pub(crate) fn today(&self) -> Date {
        self.bounds.today()
    }

    pub(crate) fn mode(&self) -> PickerMode {
        self.mode
    }

    pub(crate) fn is_open(&self) -> bool {
        self.mode != PickerMode::Closed
    }

    pub(crate) fn shown(&self) -> YearMonth {
        self.nav.shown()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn can_go_next(&self) -> bool {
        self.nav.can_go_next()
    }

    pub(crate) fn grid(&self) -> Grid {
        build_grid(self.nav.shown())
    }

    pub(crate) fn cell_selectable(&self, cell: &CalendarCell) -> bool {
        self.bounds.cell_selectable(cell)
    }

    pub(crate) fn month_entries(&self) -> [MonthEntry; 12] {
        month_entries(&self.nav)
    }

    /// Accept a new value from the owner.  A changed value relocates the
    /// display to the value's month (or today's month if cleared).
    pub(crate) fn set_value(&mut self, value: Option<Date>) {
        if value != self.value {
            self.value = value;
            self.nav.reset_to(value);
            self.home_cursor();
        }
    }

    pub(crate) fn open(&mut self) {
        debug!(label = self.label, shown = %self.nav.shown(), "opening date picker");
        self.mode = PickerMode::Calendar;
    }

    pub(crate) fn close(&mut self) {
        self.mode = PickerMode::Closed;
    }

    pub(crate) fn show_years(&mut self) {
        if self.is_open() {
            let year = self.nav.shown().year();
            let cursor = year_position(self.today(), year).unwrap_or(0);
            self.mode = PickerMode::Years { cursor };
        }
    }

    pub(crate) fn show_months(&mut self) {
        if self.is_open() {
            let cursor = month_position(self.nav.shown().month());
            self.mode = PickerMode::Months { cursor };
        }
    }

    pub(crate) fn close_overlay(&mut self) {
        if matches!(self.mode, PickerMode::Years { .. } | PickerMode::Months { .. }) {
            self.mode = PickerMode::Calendar;
        }
    }

    pub(crate) fn previous_month(&mut self) -> bool {
        let moved = self.nav.previous_month().is_ok();
        if moved {
            self.home_cursor();
        }
        moved
    }

    pub(crate) fn next_month(&mut self) -> bool {
        let moved = self.nav.next_month();
        if moved {
            self.home_cursor();
        }
        moved
    }

    /// Commits the year at `index` in the year list and closes the overlay
    pub(crate) fn select_year(&mut self, index: usize) -> bool {
        let Some(year) = year_at(self.today(), index) else {
            return false;
        };
        if !self.nav.jump_to_year(year) {
            return false;
        }
        self.home_cursor();
        self.mode = PickerMode::Calendar;
        true
    }

    /// Commits the month at `index` in the month list and closes the overlay.
    /// Disabled months are refused and leave the overlay open.
    pub(crate) fn select_month(&mut self, index: usize) -> bool {
        let Some(month) = month_at(index) else {
            return false;
        };
        if !self.nav.jump_to_month(month) {
            return false;
        }
        self.home_cursor();
        self.mode = PickerMode::Calendar;
        true
    }

    /// Handles a tap on the grid cell at `index`.  Spillover days and dates
    /// outside the selectable window are ignored.  Otherwise the picker
    /// closes and the tapped date is returned for the owner to apply.
    pub(crate) fn tap(&mut self, index: usize) -> Option<Date> {
        let cell = *self.grid().get(index)?;
        if !self.bounds.cell_selectable(&cell) {
            return None;
        }
        debug!(label = self.label, date = %cell.date, "date committed");
        self.mode = PickerMode::Closed;
        Some(cell.date)
    }

    pub(crate) fn handle_input(&mut self, input: PickerInput) -> PickerOutput {
        match self.mode {
            PickerMode::Closed => PickerOutput::Invalid,
            PickerMode::Calendar => self.handle_calendar_input(input),
            PickerMode::Years { cursor } => match input {
                PickerInput::Up => self.move_overlay_cursor(cursor.checked_sub(1)),
                PickerInput::Down => {
                    let next = Some(cursor + 1).filter(|&c| c < year_count(self.today()));
                    self.move_overlay_cursor(next)
                }
                PickerInput::Enter => PickerOutput::from(self.select_year(cursor)),
                PickerInput::Months => {
                    self.show_months();
                    PickerOutput::Ok
                }
                PickerInput::Years | PickerInput::Close => {
                    self.close_overlay();
                    PickerOutput::Ok
                }
                _ => PickerOutput::Invalid,
            },
            PickerMode::Months { cursor } => match input {
                PickerInput::Up => self.move_overlay_cursor(cursor.checked_sub(1)),
                PickerInput::Down => {
                    let next = Some(cursor + 1).filter(|&c| month_at(c).is_some());
                    self.move_overlay_cursor(next)
                }
                PickerInput::Enter => PickerOutput::from(self.select_month(cursor)),
                PickerInput::Years => {
                    self.show_years();
                    PickerOutput::Ok
                }
                PickerInput::Months | PickerInput::Close => {
                    self.close_overlay();
                    PickerOutput::Ok
                }
                _ => PickerOutput::Invalid,
            },
        }
    }

    fn handle_calendar_input(&mut self, input: PickerInput) -> PickerOutput {
        match input {
            PickerInput::Up => self.move_cursor(self.cursor.checked_sub(DAYS_IN_WEEK)),
            PickerInput::Down => self.move_cursor(Some(self.cursor + DAYS_IN_WEEK)),
            PickerInput::Left => self.move_cursor(self.cursor.checked_sub(1)),
            PickerInput::Right => self.move_cursor(Some(self.cursor + 1)),
            PickerInput::PreviousMonth => PickerOutput::from(self.previous_month()),
            PickerInput::NextMonth => PickerOutput::from(self.next_month()),
            PickerInput::Years => {
                self.show_years();
                PickerOutput::Ok
            }
            PickerInput::Months => {
                self.show_months();
                PickerOutput::Ok
            }
            PickerInput::Enter => match self.tap(self.cursor) {
                Some(date) => PickerOutput::Commit(date),
                None => PickerOutput::Invalid,
            },
            PickerInput::Close => {
                self.close();
                PickerOutput::Closed
            }
        }
    }

    fn move_cursor(&mut self, target: Option<usize>) -> PickerOutput {
        match target.filter(|&i| i < GRID_CELLS) {
            Some(i) => {
                self.cursor = i;
                PickerOutput::Ok
            }
            None => PickerOutput::Invalid,
        }
    }

    fn move_overlay_cursor(&mut self, target: Option<usize>) -> PickerOutput {
        let Some(target) = target else {
            return PickerOutput::Invalid;
        };
        match &mut self.mode {
            PickerMode::Years { cursor } | PickerMode::Months { cursor } => {
                *cursor = target;
                PickerOutput::Ok
            }
            _ => PickerOutput::Invalid,
        }
    }

    // Put the cursor on the selected date if it is shown, else on today if it
    // is shown, else on the 1st.
    fn home_cursor(&mut self) {
        let shown = self.nav.shown();
        self.cursor = self
            .value
            .and_then(|d| cell_index(shown, d).filter(|_| shown.contains(d)))
            .or_else(|| cell_index(shown, self.today()).filter(|_| shown.contains(self.today())))
            .or_else(|| cell_index(shown, shown.first_day()))
            .unwrap_or(0);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerInput {
    Up,
    Down,
    Left,
    Right,
    PreviousMonth,
    NextMonth,
    Years,
    Months,
    Enter,
    Close,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerOutput {
    Ok,
    Invalid,
    Commit(Date),
    Closed,
}

impl From<bool> for PickerOutput {
    fn from(ok: bool) -> PickerOutput {
        if ok {
            PickerOutput::Ok
        } else {
            PickerOutput::Invalid
        }
    }
}
