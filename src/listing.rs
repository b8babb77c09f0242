use crate::theme::{BASE_STYLE, LIST_CURSOR_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    widgets::{Block, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Draws a bordered, titled list over whatever is in `area`, scrolled so
/// that the item at `cursor` is visible and highlighted
pub(crate) fn render_list<I>(
    area: Rect,
    buf: &mut Buffer,
    title: &'static str,
    items: I,
    cursor: usize,
) where
    I: IntoIterator<Item = ListItem<'static>>,
{
    Clear.render(area, buf);
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(title)
                .title_alignment(Alignment::Center),
        )
        .style(BASE_STYLE)
        .highlight_style(LIST_CURSOR_STYLE)
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(cursor));
    StatefulWidget::render(list, area, buf, &mut list_state);
}

/// A centred popup of at most `width` by `height`, never extending past
/// `area`
pub(crate) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [popup] = Layout::horizontal([width.min(area.width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([height.min(area.height)])
        .flex(Flex::Center)
        .areas(popup);
    popup.intersection(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area_is_centred() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_area(area, 60, 20), Rect::new(10, 2, 60, 20));
    }

    #[test]
    fn test_popup_area_clamped() {
        for width in 0..4 {
            let area = Rect::new(3, 1, width, 2);
            let popup = popup_area(area, 60, 20);
            assert_eq!(popup.intersection(area), popup);
            assert!(popup.width <= width);
            assert!(popup.height <= 2);
        }
    }

    #[test]
    fn test_render_list_scrolls_to_cursor() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        let items = (1..=10).map(|i| ListItem::new(format!("Item {i}")));
        render_list(area, &mut buffer, " Things ", items, 7);
        let rows = buffer
            .content()
            .chunks(usize::from(area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>();
        assert!(rows[0].contains(" Things "));
        assert!(rows.iter().any(|r| r.contains("> Item 8")));
        assert!(!rows.iter().any(|r| r.contains("Item 1 ")));
    }
}
