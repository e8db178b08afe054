//! Upload wizard modal: step indicator, current step and the file picker.

use super::text_input::{TextInputState, TextInputWidget};
use crate::domain::{ArtifactKind, StepState, UploadWizard};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

pub struct UploadWizardDialog<'a> {
    wizard: &'a UploadWizard,
    picker: &'a TextInputState,
    project_name: &'a str,
}

impl<'a> UploadWizardDialog<'a> {
    pub fn new(wizard: &'a UploadWizard, picker: &'a TextInputState, project_name: &'a str) -> Self {
        Self {
            wizard,
            picker,
            project_name,
        }
    }

    fn step_indicator(&self) -> Line<'static> {
        let current = self.wizard.current();
        let mut spans = Vec::new();
        for kind in ArtifactKind::ALL {
            let (mark, style) = match self.wizard.step(kind) {
                StepState::Uploaded(_) => ("✓", Style::default().fg(Color::Green)),
                StepState::Skipped => ("–", Style::default().fg(Color::DarkGray)),
                StepState::Empty if kind == current => {
                    ("●", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                }
                StepState::Empty => ("○", Style::default().fg(Color::DarkGray)),
            };
            let label_style = if kind == current {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            };
            spans.push(Span::styled(format!(" {} ", mark), style));
            spans.push(Span::styled(
                format!("{}. {}", kind.step_number(), kind.title()),
                label_style,
            ));
            if kind.next().is_some() {
                spans.push(Span::styled("  ──  ", Style::default().fg(Color::DarkGray)));
            }
        }
        Line::from(spans)
    }

    fn step_lines(&self) -> Vec<Line<'a>> {
        let kind = self.wizard.current();
        let status = match self.wizard.step(kind) {
            StepState::Uploaded(file) => Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(file.name.as_str()),
                Span::styled(
                    format!("  {}", format_size(file.size_bytes)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            StepState::Skipped => Line::from(Span::styled(
                "Skipped. Upload a file to replace the skip.",
                Style::default().fg(Color::DarkGray),
            )),
            StepState::Empty => Line::from(Span::styled(
                "No file yet.",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let rules = self.wizard.rules();
        vec![
            Line::from(Span::styled(
                format!("Step {} of 3: {}", kind.step_number(), kind.title()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(kind.description()),
            Line::from(""),
            status,
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} up to {}",
                    rules.describe_allowed(),
                    format_size(rules.max_size_bytes)
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    fn hint(&self) -> String {
        let mut parts = vec!["Enter: Upload", "^P/^N: Back/Next"];
        if self.wizard.can_skip_remaining() {
            parts.push("^K: Skip rest");
        }
        parts.push("^D: Remove");
        parts.push("Esc: Close");
        format!(" {} ", parts.join(" | "))
    }
}

impl Widget for UploadWizardDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Set up {} ", self.project_name));
        let inner = block.inner(area);
        block.render(area, buf);

        let [steps, body, picker, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.step_indicator()).render(steps, buf);
        Paragraph::new(self.step_lines())
            .wrap(Wrap { trim: true })
            .render(body, buf);
        TextInputWidget::new(&self.picker.value, self.picker.cursor)
            .title("File")
            .placeholder("path/to/file.pdf or name.pdf:12mb")
            .render(picker, buf);
        Paragraph::new(self.hint())
            .style(Style::default().fg(Color::DarkGray))
            .render(footer, buf);
    }
}
