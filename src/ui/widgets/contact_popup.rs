//! Contact request popup: manufacturer summary plus an editable request
//! message backed by tui-textarea.

use crate::domain::Manufacturer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tui_textarea::{Input, Key, TextArea};

/// Actions that can result from editor key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    /// Send the request (Ctrl+S)
    Send,
    /// Close without sending (Esc)
    Cancel,
}

/// Editable request text, alive while the popup is open
#[derive(Default)]
pub struct ContactEditor {
    textarea: Option<TextArea<'static>>,
    original: String,
}

impl ContactEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a pre-filled request
    pub fn open(&mut self, content: String) {
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        let mut textarea = TextArea::new(lines);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Request Details "),
        );
        self.textarea = Some(textarea);
        self.original = content;
    }

    pub fn close(&mut self) {
        self.textarea = None;
        self.original.clear();
    }

    pub fn is_active(&self) -> bool {
        self.textarea.is_some()
    }

    pub fn textarea(&self) -> Option<&TextArea<'static>> {
        self.textarea.as_ref()
    }

    pub fn content(&self) -> String {
        self.textarea
            .as_ref()
            .map(|t| t.lines().join("\n"))
            .unwrap_or_default()
    }

    pub fn is_modified(&self) -> bool {
        self.is_active() && self.content() != self.original
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return EditorAction::Send;
        }
        if key.code == KeyCode::Esc {
            return EditorAction::Cancel;
        }
        if let Some(textarea) = self.textarea.as_mut() {
            textarea.input(convert_key_event(key));
        }
        EditorAction::None
    }
}

/// Convert crossterm KeyEvent to tui-textarea Input
fn convert_key_event(key: KeyEvent) -> Input {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };

    Input { key, ctrl, alt, shift }
}

/// The contact popup
pub struct ContactPopup<'a> {
    manufacturer: &'a Manufacturer,
    project_name: &'a str,
    editor: &'a ContactEditor,
}

impl<'a> ContactPopup<'a> {
    pub fn new(manufacturer: &'a Manufacturer, project_name: &'a str, editor: &'a ContactEditor) -> Self {
        Self {
            manufacturer,
            project_name,
            editor,
        }
    }
}

impl Widget for ContactPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Contact {} ", self.manufacturer.name));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let m = self.manufacturer;
        let summary = vec![
            Line::from(vec![
                Span::styled(&m.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}  ", m.location)),
                Span::styled(m.rating_label(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                m.specialties.join(" · "),
                Style::default().fg(Color::Magenta),
            )),
            Line::from(Span::styled(
                format!("For project: {}", self.project_name),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if let Some(textarea) = self.editor.textarea() {
            textarea.render(chunks[1], buf);
        }

        let hint = if self.editor.is_modified() {
            " Ctrl+S: Send Request | Esc: Cancel | [edited] "
        } else {
            " Ctrl+S: Send Request | Esc: Cancel "
        };
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }
}

/// Shown after a request went out
pub struct ContactSentDialog<'a> {
    manufacturer: &'a str,
}

impl<'a> ContactSentDialog<'a> {
    pub fn new(manufacturer: &'a str) -> Self {
        Self { manufacturer }
    }
}

impl Widget for ContactSentDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Request Sent ");

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Your request is on its way to {}.", self.manufacturer),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("The project moved to Order Samples."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter/s", Style::default().fg(Color::Green)),
                Span::raw(": Open sample conversation   "),
                Span::styled("Esc/b", Style::default().fg(Color::Green)),
                Span::raw(": Keep browsing"),
            ]),
        ];

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
