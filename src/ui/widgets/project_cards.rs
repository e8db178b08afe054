//! Project cards for the dashboard and projects pages, plus the detail modal.

use super::stage_tracker::{tag_color, StageTracker};
use crate::domain::{ArtifactKind, Project, Stage, TRACKER_STAGES};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Selectable list of project cards
pub struct ProjectCards<'a> {
    projects: &'a [Project],
    selected: Option<usize>,
    title: &'a str,
}

impl<'a> ProjectCards<'a> {
    pub fn new(projects: &'a [Project], selected: Option<usize>) -> Self {
        Self {
            projects,
            selected,
            title: " Projects ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn card(project: &Project) -> ListItem<'_> {
        let stage = project.current_stage;
        let color = tag_color(stage.status_tag());
        let filled = (project.progress.percent() / 10) as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(&project.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(stage.badge(), Style::default().fg(color)),
            ]),
            Line::from(vec![
                Span::styled(bar, Style::default().fg(color)),
                Span::raw(format!(" {}  ", project.progress)),
                Span::styled(stage.status_line(), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled(
                format!(
                    "Manufacturer: {}",
                    project.manufacturer.as_deref().unwrap_or("not selected")
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ])
    }
}

impl Widget for ProjectCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title);

        if self.projects.is_empty() {
            Paragraph::new("No projects yet.\n\nPress 'n' to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self.projects.iter().map(Self::card).collect();
        let mut state = ListState::default();
        state.select(self.selected);

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▌");
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

/// Modal with everything known about one project
pub struct ProjectDetail<'a> {
    project: &'a Project,
    selected_stage: usize,
}

impl<'a> ProjectDetail<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            selected_stage: stage_row(project.current_stage),
        }
    }

    /// Put the tracker cursor on a row of `TRACKER_STAGES`
    pub fn selected_stage(mut self, row: usize) -> Self {
        self.selected_stage = row.min(TRACKER_STAGES.len() - 1);
        self
    }

    /// Label for what Enter does on the selected row
    fn open_label(&self) -> String {
        let stage = TRACKER_STAGES[self.selected_stage].stage;
        if stage == Stage::Concept && self.project.current_stage == Stage::Concept {
            return "Upload files".to_string();
        }
        format!("Open {}", stage.destination().title())
    }

    fn info_lines(&self) -> Vec<Line<'a>> {
        let p = self.project;
        let stage = p.current_stage;
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Stage: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    stage.display_name(),
                    Style::default().fg(tag_color(stage.status_tag())),
                ),
                Span::raw(format!("  ({})", p.progress)),
            ]),
            Line::from(vec![
                Span::styled("Manufacturer: ", Style::default().fg(Color::DarkGray)),
                Span::raw(p.manufacturer.as_deref().unwrap_or("not selected")),
            ]),
            Line::from(vec![
                Span::styled("Created: ", Style::default().fg(Color::DarkGray)),
                Span::raw(p.created_at().format("%b %-d, %Y").to_string()),
                Span::styled(format!("  #{}", p.id.short()), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
            Line::from(p.description.as_str()),
            Line::from(""),
            Line::from(Span::styled("Files", Style::default().add_modifier(Modifier::BOLD))),
        ];

        for kind in ArtifactKind::ALL {
            let value = match p.artifacts.get(&kind) {
                Some(file) => Span::raw(file.name.as_str()),
                None => Span::styled("—", Style::default().fg(Color::DarkGray)),
            };
            lines.push(Line::from(vec![Span::raw(format!("  {}: ", kind.title())), value]));
        }
        lines
    }
}

impl Widget for ProjectDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.project.name));
        let inner = block.inner(area);
        block.render(area, buf);

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        let [info, tracker] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(body);

        Paragraph::new(self.info_lines())
            .wrap(Wrap { trim: true })
            .render(info, buf);

        StageTracker::new(self.project.current_stage)
            .progress(self.project.progress.percent())
            .detailed(true)
            .selected(Some(self.selected_stage))
            .render(tracker, buf);

        Paragraph::new(format!(
            " j/k: Choose stage | Enter: {} | Esc: Close ",
            self.open_label()
        ))
            .style(Style::default().fg(Color::DarkGray))
            .render(footer, buf);
    }
}

/// Tracker row for a stage. Stages past the checklist map to its last row.
pub fn stage_row(stage: Stage) -> usize {
    TRACKER_STAGES
        .iter()
        .position(|t| t.stage == stage)
        .unwrap_or(TRACKER_STAGES.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileRef;
    use std::collections::BTreeMap;

    fn screen(widget: impl Widget, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_card_shows_manufacturer_or_placeholder() {
        let projects = vec![
            Project::new("Linen Set", Stage::Concept),
            Project::new("Denim", Stage::OrderSamples).with_manufacturer("Premium Denim Co."),
        ];
        let text = screen(ProjectCards::new(&projects, Some(0)), 60, 12);
        assert!(text.contains("not selected"));
        assert!(text.contains("Premium Denim Co."));
        assert!(text.contains("[SAMPLES]"));
    }

    #[test]
    fn test_empty_cards() {
        let text = screen(ProjectCards::new(&[], None), 40, 6);
        assert!(text.contains("No projects yet."));
    }

    #[test]
    fn test_detail_lists_files_and_destination() {
        let mut artifacts = BTreeMap::new();
        artifacts.insert(ArtifactKind::TechPack, FileRef::new("pack.pdf", 1));
        let project = Project::new("Knits", Stage::FindManufacturers).with_artifacts(artifacts);

        let text = screen(ProjectDetail::new(&project), 100, 20);
        assert!(text.contains("pack.pdf"));
        assert!(text.contains("Enter: Open Manufacturers"));

        let text = screen(ProjectDetail::new(&project).selected_stage(2), 100, 20);
        assert!(text.contains("Enter: Open Inbox"));
    }

    #[test]
    fn test_stage_rows() {
        assert_eq!(stage_row(Stage::Concept), 0);
        assert_eq!(stage_row(Stage::OrderSamples), 2);
        assert_eq!(stage_row(Stage::Shipping), TRACKER_STAGES.len() - 1);
    }
}
