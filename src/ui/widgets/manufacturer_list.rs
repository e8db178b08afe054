//! Manufacturer catalog list with the loading footer.

use crate::domain::Manufacturer;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct ManufacturerList<'a> {
    items: &'a [&'a Manufacturer],
    selected: usize,
    loading: bool,
    has_more: bool,
    focused: bool,
    filtered: bool,
}

impl<'a> ManufacturerList<'a> {
    pub fn new(items: &'a [&'a Manufacturer], selected: usize) -> Self {
        Self {
            items,
            selected,
            loading: false,
            has_more: true,
            focused: true,
            filtered: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    fn item(m: &'a Manufacturer) -> ListItem<'a> {
        let mut header = vec![Span::styled(
            m.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if m.suggested {
            header.push(Span::styled(
                "  ★ Recommended",
                Style::default().fg(Color::Yellow),
            ));
        }

        ListItem::new(vec![
            Line::from(header),
            Line::from(vec![
                Span::raw(format!("{}  ", m.location)),
                Span::styled(m.rating_label(), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("  {} employees", m.employees),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                m.specialties.join(" · "),
                Style::default().fg(Color::Magenta),
            )),
            Line::from(Span::styled(
                m.description.as_str(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ])
    }

    fn footer(&self) -> (&'static str, Color) {
        if self.loading {
            ("Loading more manufacturers...", Color::Yellow)
        } else if self.has_more {
            ("Scroll down to load more", Color::DarkGray)
        } else {
            ("You've reached the end of the list", Color::DarkGray)
        }
    }
}

impl Widget for ManufacturerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Manufacturers ({}) ", self.items.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        if self.items.is_empty() && !self.loading {
            let message = if self.filtered {
                "No manufacturers match the selected filters."
            } else {
                "No manufacturers loaded yet."
            };
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = self.items.iter().map(|m| Self::item(m)).collect();
            let mut state = ListState::default();
            state.select(Some(self.selected.min(self.items.len().saturating_sub(1))));
            let list = List::new(items)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("▌");
            StatefulWidget::render(list, list_area, buf, &mut state);
        }

        let (text, color) = self.footer();
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .render(footer_area, buf);
    }
}
