//! Navigation sidebar: pages, recent projects and the current project's stage.

use super::stage_tracker::{tag_color, StageTracker};
use crate::domain::{Project, Route};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub struct Sidebar<'a> {
    active: Route,
    recent: &'a [Project],
    current: Option<&'a Project>,
}

impl<'a> Sidebar<'a> {
    pub fn new(active: Route, recent: &'a [Project], current: Option<&'a Project>) -> Self {
        Self {
            active,
            recent,
            current,
        }
    }

    fn route_items(&self) -> Vec<ListItem<'static>> {
        Route::ALL
            .iter()
            .map(|route| {
                let style = if *route == self.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!(" {}  {}", route.shortcut(), route.title())).style(style)
            })
            .collect()
    }

    fn recent_items(&self) -> Vec<ListItem<'a>> {
        let current_id = self.current.map(|p| p.id);
        self.recent
            .iter()
            .map(|project| {
                let marker = if Some(project.id) == current_id { "▸" } else { " " };
                let color = tag_color(project.current_stage.status_tag());
                ListItem::new(vec![
                    Line::from(format!("{} {}", marker, project.name)),
                    Line::from(Span::styled(
                        format!("  {} · {}", project.current_stage.display_name(), project.progress),
                        Style::default().fg(color),
                    )),
                ])
            })
            .collect()
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tracker_height = if self.current.is_some() { 7 } else { 0 };
        let [brand, nav, recent, tracker] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(Route::ALL.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(tracker_height),
        ])
        .areas(area);

        Paragraph::new(" atelier")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::BOTTOM))
            .render(brand, buf);

        Widget::render(
            List::new(self.route_items()).block(Block::default().borders(Borders::ALL).title(" Go to ")),
            nav,
            buf,
        );

        let recent_block = Block::default().borders(Borders::ALL).title(" Recent ");
        if self.recent.is_empty() {
            Paragraph::new(" No projects yet.\n Press 'n' to start one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(recent_block)
                .render(recent, buf);
        } else {
            Widget::render(List::new(self.recent_items()).block(recent_block), recent, buf);
        }

        if let Some(project) = self.current {
            StageTracker::new(project.current_stage)
                .progress(project.progress.percent())
                .title(" Current Project ")
                .render(tracker, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    #[test]
    fn test_renders_routes_and_recent_projects() {
        let projects = vec![Project::new("Resort Capsule", Stage::Concept)];
        let area = Rect::new(0, 0, 28, 24);
        let mut buf = Buffer::empty(area);
        Sidebar::new(Route::Projects, &projects, projects.first()).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Manufacturers"));
        assert!(text.contains("▸ Resort Capsule"));
        assert!(text.contains("Current Project"));
    }

    #[test]
    fn test_route_items_cover_every_page() {
        let sidebar = Sidebar::new(Route::Samples, &[], None);
        assert_eq!(sidebar.route_items().len(), Route::ALL.len());
    }
}
