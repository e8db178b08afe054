//! Help view widget showing all keybindings.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Help categories
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("1-5", "Dashboard / Projects / Manufacturers / Inbox / Marketplace"),
            ("Tab/S-Tab", "Next / previous page"),
            ("↑/k", "Move up"),
            ("↓/j", "Move down"),
            ("g", "Go to top"),
            ("G", "Go to bottom"),
            ("PgUp", "Page up"),
            ("PgDn", "Page down"),
        ],
    ),
    (
        "Selection & Actions",
        &[
            ("Enter", "Open / Confirm"),
            ("Esc", "Back / Cancel"),
            ("n", "Start a new project"),
            ("q", "Quit"),
        ],
    ),
    (
        "Project Details",
        &[
            ("↑/↓", "Choose a stage"),
            ("Enter", "Open the chosen stage's page"),
        ],
    ),
    (
        "Upload Wizard",
        &[
            ("Enter", "Upload the typed file (path or name:size)"),
            ("Ctrl+N", "Next step"),
            ("Ctrl+P", "Previous step"),
            ("Ctrl+K", "Skip remaining steps"),
            ("Ctrl+D", "Remove this step's file"),
        ],
    ),
    (
        "Manufacturers",
        &[
            ("Enter", "Contact manufacturer"),
            ("f", "Focus the filter panel"),
            ("Space", "Toggle the highlighted filter"),
            ("x", "Clear all filters"),
        ],
    ),
    (
        "Contact Request",
        &[("Ctrl+S", "Send request"), ("Esc", "Cancel")],
    ),
    (
        "Inbox",
        &[
            ("↑/↓", "Choose conversation"),
            ("i", "Write a message"),
            ("Enter", "Send message"),
        ],
    ),
    (
        "Marketplace",
        &[
            ("←/→", "Previous / next category"),
            ("i or /", "Search by product or brand"),
            ("Enter/Esc", "Finish searching"),
        ],
    ),
];

/// Lines moved by a page scroll
const PAGE: usize = 10;

/// Scroll position of the help view
#[derive(Debug, Clone)]
pub struct HelpViewState {
    pub scroll_offset: usize,
    total_lines: usize,
}

impl Default for HelpViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpViewState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            total_lines: HelpWidget::build_lines().len(),
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Never scrolls past the last line
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.total_lines.saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE);
    }
}

/// Help view widget
pub struct HelpWidget<'a> {
    state: &'a HelpViewState,
}

impl<'a> HelpWidget<'a> {
    pub fn new(state: &'a HelpViewState) -> Self {
        Self { state }
    }

    fn build_lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![Span::styled(
                "  atelier Help  ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                "Take a collection from tech pack to production.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for (section_name, bindings) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("─── {} ───", section_name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (key, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:12}", key), Style::default().fg(Color::Green)),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("  Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Green)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Green)),
            Span::styled(" to close help", Style::default().fg(Color::DarkGray)),
        ]));

        lines
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = Self::build_lines();
        let total = lines.len();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (?) ");
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let offset = self.state.scroll_offset.min(total.saturating_sub(visible));

        let visible_lines: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
        Paragraph::new(visible_lines).render(inner, buf);

        if total > visible {
            let mut scrollbar_state = ScrollbarState::new(total).position(offset);
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_state_scroll() {
        let mut state = HelpViewState::new();

        state.scroll_down(5);
        assert_eq!(state.scroll_offset, 5);

        state.scroll_up(3);
        assert_eq!(state.scroll_offset, 2);

        state.scroll_up(10);
        assert_eq!(state.scroll_offset, 0);

        state.scroll_down(10_000);
        assert_eq!(state.scroll_offset, HelpWidget::build_lines().len() - 1);
    }

    #[test]
    fn test_every_section_is_listed() {
        let text: String = HelpWidget::build_lines()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        for (section, _) in HELP_SECTIONS {
            assert!(text.contains(section), "{section}");
        }
    }
}
