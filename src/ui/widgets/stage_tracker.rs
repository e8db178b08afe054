//! Stage checklist rendering shared by the sidebar, dashboard and detail modal.

use crate::domain::{stage_checklist, Stage, StageStatus, StatusTag};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Terminal colour for a stage's status hint
pub fn tag_color(tag: StatusTag) -> Color {
    match tag {
        StatusTag::Neutral => Color::Gray,
        StatusTag::Design => Color::Magenta,
        StatusTag::Attention => Color::Yellow,
        StatusTag::Active => Color::Blue,
        StatusTag::Success => Color::Green,
    }
}

fn status_symbol(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "✓",
        StageStatus::Active => "●",
        StageStatus::Pending => "○",
    }
}

fn status_style(status: StageStatus) -> Style {
    match status {
        StageStatus::Completed => Style::default().fg(Color::Green),
        StageStatus::Active => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        StageStatus::Pending => Style::default().fg(Color::DarkGray),
    }
}

/// Checklist for one project's stage
pub struct StageTracker<'a> {
    stage: Stage,
    progress: Option<u8>,
    title: &'a str,
    /// Include the one-line description under each row
    detailed: bool,
    /// Row under the cursor, as an index into `TRACKER_STAGES`
    selected: Option<usize>,
}

impl<'a> StageTracker<'a> {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            progress: None,
            title: " Progress ",
            detailed: false,
            selected: None,
        }
    }

    /// Show a progress gauge above the checklist
    pub fn progress(mut self, percent: u8) -> Self {
        self.progress = Some(percent);
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (idx, entry) in stage_checklist(self.stage).into_iter().enumerate() {
            let style = status_style(entry.status);
            let cursor = if self.selected == Some(idx) { "▌" } else { " " };
            let mut row = Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} ", status_symbol(entry.status)), style),
                Span::styled(entry.stage.title, style),
            ]);
            if self.selected == Some(idx) {
                row = row.style(Style::default().bg(Color::DarkGray));
            }
            lines.push(row);
            if self.detailed {
                lines.push(Line::from(Span::styled(
                    format!("   {}", entry.stage.description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        lines
    }
}

impl Widget for StageTracker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        let list_area = match self.progress {
            Some(percent) if inner.height > 2 => {
                let [gauge_area, rest] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
                Gauge::default()
                    .gauge_style(Style::default().fg(tag_color(self.stage.status_tag())))
                    .percent(u16::from(percent))
                    .label(format!("{}% · {}", percent, self.stage.display_name()))
                    .render(gauge_area, buf);
                rest
            }
            _ => inner,
        };

        Paragraph::new(self.build_lines()).render(list_area, buf);
    }
}
