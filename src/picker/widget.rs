use super::grid::{CalendarCell, DAYS_IN_WEEK};
use super::overlay::listed_years;
use super::state::{DatePicker, PickerMode};
use crate::listing::render_list;
use crate::theme::{
    picker::{
        CURRENT_ENTRY_STYLE, CURSOR_STYLE, DISABLED_STYLE, HINT_STYLE, NAV_DISABLED_STYLE,
        SELECTED_STYLE, SPILLOVER_STYLE, TITLE_STYLE,
    },
    BASE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, ListItem, StatefulWidget, Widget},
};

static WEEKDAY_HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

static HINT: &str = "y year  m month  < > page";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Month header, weekday header, six weeks, a blank line, and the key hint
const INNER_HEIGHT: u16 = 10;

/// Border plus one column/line of padding on every side
const OUTER_WIDTH: u16 = GRID_WIDTH + 4;

const OUTER_HEIGHT: u16 = INNER_HEIGHT + 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerPopup;

impl StatefulWidget for PickerPopup {
    type State = DatePicker;

    /*
     * ................................
     * .┌───────── Start date ───────┐.
     * .│October 2026             ‹ ›│.
     * .│ Su  Mo  Tu  We  Th  Fr  Sa │.
     * .│ 27  28  29  30   1   2   3 │.
     * .│ ...                        │.
     * .│                            │.
     * .│y year  m month  < > page   │.
     * .└────────────────────────────┘.
     * ................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.is_open() {
            return;
        }
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", state.label()))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let inner = block_area.inner(Margin::new(1, 1));
        calendar_text(state).render(inner, buf);
        match state.mode() {
            PickerMode::Years { cursor } => {
                let shown = state.shown().year();
                let items = listed_years(state.today()).map(|year| {
                    let style = if year == shown {
                        CURRENT_ENTRY_STYLE
                    } else {
                        BASE_STYLE
                    };
                    ListItem::new(year.to_string()).style(style)
                });
                render_list(block_area, buf, " Select Year ", items, cursor);
            }
            PickerMode::Months { cursor } => {
                let items = state.month_entries().map(|entry| {
                    let style = if !entry.enabled {
                        DISABLED_STYLE
                    } else if entry.current {
                        CURRENT_ENTRY_STYLE
                    } else {
                        BASE_STYLE
                    };
                    ListItem::new(entry.month.to_string()).style(style)
                });
                render_list(block_area, buf, " Select Month ", items, cursor);
            }
            PickerMode::Calendar | PickerMode::Closed => (),
        }
    }
}

fn calendar_text(state: &DatePicker) -> Text<'static> {
    let mut lines = Vec::with_capacity(usize::from(INNER_HEIGHT));
    lines.push(header_line(state));
    lines.push(Line::styled(WEEKDAY_HEADER, WEEKDAY_STYLE));
    let grid = state.grid();
    for (week_no, week) in grid.chunks(DAYS_IN_WEEK).enumerate() {
        let spans = week.iter().enumerate().map(|(i, cell)| {
            let index = week_no * DAYS_IN_WEEK + i;
            Span::styled(show_day(state, cell), day_style(state, cell, index))
        });
        lines.push(Line::from_iter(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(HINT, HINT_STYLE));
    Text::from(lines).style(BASE_STYLE)
}

fn header_line(state: &DatePicker) -> Line<'static> {
    let title = state.shown().to_string();
    let pad = usize::from(GRID_WIDTH)
        .saturating_sub(title.len())
        .saturating_sub(3);
    let next_style = if state.can_go_next() {
        TITLE_STYLE
    } else {
        NAV_DISABLED_STYLE
    };
    Line::from_iter([
        Span::styled(title, TITLE_STYLE),
        Span::raw(" ".repeat(pad)),
        Span::styled("‹", TITLE_STYLE),
        Span::raw(" "),
        Span::styled("›", next_style),
    ])
}

fn show_day(state: &DatePicker, cell: &CalendarCell) -> String {
    if cell.date == state.today() {
        format!("[{:2}]", cell.day())
    } else {
        format!(" {:2} ", cell.day())
    }
}

fn day_style(state: &DatePicker, cell: &CalendarCell, index: usize) -> Style {
    let mut style = if !cell.in_month {
        SPILLOVER_STYLE
    } else if !state.cell_selectable(cell) {
        DISABLED_STYLE
    } else {
        BASE_STYLE
    };
    if cell.in_month && state.value() == Some(cell.date) {
        style = style.patch(SELECTED_STYLE);
    }
    if index == state.cursor() && state.mode() == PickerMode::Calendar {
        style = style.patch(CURSOR_STYLE);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn lines(buf: &Buffer) -> Vec<String> {
        buf.content()
            .chunks(usize::from(buf.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn render(picker: &mut DatePicker) -> Vec<String> {
        let area = Rect::new(0, 0, 40, 16);
        let mut buffer = Buffer::empty(area);
        PickerPopup.render(area, &mut buffer, picker);
        lines(&buffer)
    }

    #[test]
    fn test_closed_renders_nothing() {
        let mut picker = DatePicker::new("Start date", date!(2026 - 10 - 19));
        let rendered = render(&mut picker);
        assert!(rendered.iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_calendar() {
        let mut picker = DatePicker::new("Start date", date!(2026 - 10 - 19));
        picker.set_value(Some(date!(2024 - 03 - 15)));
        picker.open();
        let rendered = render(&mut picker);
        assert!(rendered.iter().any(|l| l.contains(" Start date ")));
        assert!(rendered.iter().any(|l| l.contains("March 2024")));
        assert!(rendered
            .iter()
            .any(|l| l.contains("Su  Mo  Tu  We  Th  Fr  Sa")));
        assert!(rendered
            .iter()
            .any(|l| l.contains(" 25  26  27  28  29   1   2 ")));
        assert!(rendered
            .iter()
            .any(|l| l.contains(" 31   1   2   3   4   5   6 ")));
    }

    #[test]
    fn test_today_marked() {
        let mut picker = DatePicker::new("End date", date!(2026 - 10 - 19));
        picker.open();
        let rendered = render(&mut picker);
        assert!(rendered.iter().any(|l| l.contains("October 2026")));
        assert!(rendered.iter().any(|l| l.contains("[19]")));
    }

    #[test]
    fn test_month_overlay() {
        let mut picker = DatePicker::new("Start date", date!(2026 - 10 - 19));
        picker.open();
        picker.show_months();
        let rendered = render(&mut picker);
        assert!(rendered.iter().any(|l| l.contains(" Select Month ")));
        assert!(rendered.iter().any(|l| l.contains("> October")));
        assert!(!rendered.iter().any(|l| l.contains("Su  Mo")));
    }
}
