//! Text input widget for single-line text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    value: &'a str,
    /// Cursor position in characters
    cursor: usize,
    placeholder: &'a str,
    title: &'a str,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            placeholder: "",
            title: "Input",
            focused: true,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let cursor_style = Style::default().fg(Color::Black).bg(Color::White);
        let hint_style = Style::default().fg(Color::DarkGray);

        if self.value.is_empty() {
            let mut x = inner.x;
            if self.focused {
                buf.set_string(x, inner.y, " ", cursor_style);
                x += 1;
            }
            buf.set_stringn(
                x,
                inner.y,
                self.placeholder,
                inner.width.saturating_sub(x - inner.x) as usize,
                hint_style,
            );
            return;
        }

        if !self.focused {
            buf.set_stringn(inner.x, inner.y, self.value, inner.width as usize, Style::default());
            return;
        }

        // Keep the cursor in view when the text is wider than the box
        let width = inner.width as usize;
        let skip = (self.cursor + 1).saturating_sub(width);
        let before: String = self.value.chars().skip(skip).take(self.cursor - skip).collect();
        let at: String = self.value.chars().skip(self.cursor).take(1).collect();
        let after: String = self.value.chars().skip(self.cursor + 1).collect();

        let mut x = inner.x;
        buf.set_string(x, inner.y, &before, Style::default());
        x += before.chars().count() as u16;
        buf.set_string(x, inner.y, if at.is_empty() { " " } else { &at }, cursor_style);
        x += 1;
        let room = (inner.x + inner.width).saturating_sub(x) as usize;
        buf.set_stringn(x, inner.y, &after, room, Style::default());
    }
}

/// State for text input
#[derive(Debug, Default, Clone)]
pub struct TextInputState {
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key event and report what happened
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    None,
    Changed,
    /// Enter
    Submit,
    /// Esc
    Cancel,
}

/// Dialog asking for a new project's name
pub struct NewProjectDialog<'a> {
    input: &'a TextInputState,
    error: Option<&'a str>,
}

impl<'a> NewProjectDialog<'a> {
    pub fn new(input: &'a TextInputState) -> Self {
        Self { input, error: None }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for NewProjectDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" New Project ");
        let inner = block.inner(area);
        block.render(area, buf);

        buf.set_stringn(
            inner.x + 1,
            inner.y + 1,
            "Name your collection. You will upload its design files next.",
            inner.width.saturating_sub(2) as usize,
            Style::default().fg(Color::White),
        );

        let input_area = Rect {
            x: inner.x + 1,
            y: inner.y + 3,
            width: inner.width.saturating_sub(2),
            height: 3.min(inner.height.saturating_sub(3)),
        };
        TextInputWidget::new(&self.input.value, self.input.cursor)
            .title("Project Name")
            .placeholder("e.g. Autumn Knitwear 2025")
            .render(input_area, buf);

        if let Some(error) = self.error {
            if inner.height > 7 {
                buf.set_string(inner.x + 1, inner.y + 7, error, Style::default().fg(Color::Red));
            }
        }

        buf.set_string(
            inner.x + 1,
            inner.y + inner.height.saturating_sub(2),
            "Enter: Create | Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        );
    }
}
