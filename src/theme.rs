use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const FOCUS_STYLE: Style = BASE_STYLE.fg(Color::LightCyan).add_modifier(Modifier::BOLD);

pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SCORE_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const LIST_CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) mod status {
    use super::*;

    pub(crate) const PENDING_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

    pub(crate) const APPROVED_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

    pub(crate) const REJECTED_STYLE: Style = BASE_STYLE.fg(Color::LightRed);
}

pub(crate) mod picker {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const NAV_DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const SPILLOVER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const DISABLED_STYLE: Style = BASE_STYLE
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT);

    pub(crate) const SELECTED_STYLE: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

    pub(crate) const CURRENT_ENTRY_STYLE: Style =
        BASE_STYLE.fg(Color::LightBlue).add_modifier(Modifier::BOLD);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
