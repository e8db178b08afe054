//! Filter checkboxes for the manufacturer catalog.

use crate::domain::filter::filter_options;
use crate::domain::FilterSelection;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub struct FilterPanel<'a> {
    selection: &'a FilterSelection,
    /// Index into `filter_options()`
    cursor: usize,
    focused: bool,
}

impl<'a> FilterPanel<'a> {
    pub fn new(selection: &'a FilterSelection, cursor: usize, focused: bool) -> Self {
        Self {
            selection,
            cursor,
            focused,
        }
    }

    /// Rows with category headings interleaved; returns the row of the cursor
    fn rows(&self) -> (Vec<ListItem<'static>>, usize) {
        let mut rows = Vec::new();
        let mut cursor_row = 0;
        let mut last_category = None;

        for (idx, (category, value)) in filter_options().into_iter().enumerate() {
            if last_category != Some(category) {
                if last_category.is_some() {
                    rows.push(ListItem::new(""));
                }
                rows.push(ListItem::new(Span::styled(
                    category.title(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                last_category = Some(category);
            }

            let checked = self.selection.is_selected(category, value);
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if idx == self.cursor {
                cursor_row = rows.len();
            }
            rows.push(
                ListItem::new(format!(" [{}] {}", if checked { "x" } else { " " }, value))
                    .style(style),
            );
        }
        (rows, cursor_row)
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.selection.active_count();
        let title = if active > 0 {
            format!(" Filters ({}) ", active)
        } else {
            " Filters ".to_string()
        };
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };

        let (rows, cursor_row) = self.rows();
        let mut state = ListState::default();
        if self.focused {
            state.select(Some(cursor_row));
        }

        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterCategory;

    #[test]
    fn test_rows_include_headings() {
        let selection = FilterSelection::new();
        let (rows, cursor_row) = FilterPanel::new(&selection, 0, true).rows();
        // One heading per category, a spacer between categories
        let options = filter_options().len();
        assert_eq!(rows.len(), options + 4 + 3);
        assert_eq!(cursor_row, 1);
    }

    #[test]
    fn test_cursor_skips_headings() {
        let selection = FilterSelection::new();
        let first_employees = FilterCategory::Location.options().len();
        let (_, cursor_row) = FilterPanel::new(&selection, first_employees, true).rows();
        // Location heading + options, spacer, Employees heading
        assert_eq!(cursor_row, first_employees + 3);
    }

    #[test]
    fn test_checked_values_render() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterCategory::Location, "Turkey");
        let area = Rect::new(0, 0, 30, 40);
        let mut buf = Buffer::empty(area);
        FilterPanel::new(&selection, 0, false).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("[x] Turkey"));
        assert!(text.contains("Filters (1)"));
    }
}
