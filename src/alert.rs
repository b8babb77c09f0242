use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

const MAX_WIDTH: u16 = 48;

static DISMISS: &str = "Press the Any Key to dismiss.";

/// A blocking message; any key dismisses it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Alert {
    pub(crate) title: &'static str,
    pub(crate) message: String,
}

impl Alert {
    pub(crate) fn new<S: Into<String>>(title: &'static str, message: S) -> Alert {
        Alert {
            title,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AlertPopup<'a> {
    pub(crate) alert: &'a Alert,
    pub(crate) style: Style,
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(vec![
            Line::raw(self.alert.message.as_str()),
            Line::raw(""),
            Line::raw(DISMISS),
        ]);
        let inner_width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(MAX_WIDTH)
            .min(area.width.saturating_sub(4));
        let message_width = u16::try_from(self.alert.message.len()).unwrap_or(u16::MAX);
        let message_lines = if inner_width == 0 {
            1
        } else {
            message_width.div_ceil(inner_width).max(1)
        };
        let height = message_lines
            .saturating_add(2)
            .min(area.height)
            .saturating_add(2);
        let width = inner_width.saturating_add(2);
        let [alert_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [alert_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(alert_area);
        let outer_area = Rect {
            x: alert_area.x.saturating_sub(1),
            y: alert_area.y,
            width: alert_area.width.saturating_add(2),
            height: alert_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(format!(" {} ", self.alert.title))
                    .title_alignment(Alignment::Center),
            )
            .wrap(Wrap { trim: true })
            .style(self.style)
            .render(alert_area, buf);
    }
}
