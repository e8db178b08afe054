//! Marketplace page: search box, category chips and product cards.

use super::text_input::{TextInputState, TextInputWidget};
use crate::domain::product::PRODUCT_CATEGORIES;
use crate::domain::Product;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct ProductList<'a> {
    items: &'a [&'a Product],
    selected: usize,
    category: &'a str,
    search: &'a TextInputState,
    searching: bool,
}

impl<'a> ProductList<'a> {
    pub fn new(items: &'a [&'a Product], selected: usize, search: &'a TextInputState) -> Self {
        Self {
            items,
            selected,
            category: "All",
            search,
            searching: false,
        }
    }

    pub fn category(mut self, category: &'a str) -> Self {
        self.category = category;
        self
    }

    pub fn searching(mut self, searching: bool) -> Self {
        self.searching = searching;
        self
    }

    fn chips(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for category in PRODUCT_CATEGORIES {
            let style = if category == self.category {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", category), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn card(product: &'a Product) -> ListItem<'a> {
        let label = Style::default().fg(Color::DarkGray);
        ListItem::new(vec![
            Line::from(vec![
                Span::styled(
                    product.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", product.brand), label),
            ]),
            Line::from(vec![
                Span::styled(product.category.as_str(), Style::default().fg(Color::Magenta)),
                Span::raw(" · "),
                Span::raw(product.material.as_str()),
            ]),
            Line::from(vec![
                Span::styled("MOQ: ", label),
                Span::raw(product.moq.as_str()),
                Span::styled("  Lead Time: ", label),
                Span::raw(product.lead_time.as_str()),
                Span::styled("  Origin: ", label),
                Span::raw(product.supplier_country.as_str()),
            ]),
            Line::from(""),
        ])
    }
}

impl Widget for ProductList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [search_area, chips_area, count_area, list_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        TextInputWidget::new(self.search.value(), self.search.cursor)
            .placeholder("Search products, brands...")
            .title("Search")
            .focused(self.searching)
            .render(search_area, buf);

        Paragraph::new(self.chips()).render(chips_area, buf);
        Paragraph::new(format!(" Showing {} products", self.items.len()))
            .style(Style::default().fg(Color::DarkGray))
            .render(count_area, buf);

        let block = Block::default().borders(Borders::ALL).title(" Marketplace ");
        if self.items.is_empty() {
            Paragraph::new("No products match this category and search.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block)
                .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = self.items.iter().map(|p| Self::card(p)).collect();
        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.items.len() - 1)));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▌");
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}
