//! Sample inbox: contacted manufacturers and the selected conversation.

use super::text_input::{TextInputState, TextInputWidget};
use crate::services::Message;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// One conversation as the inbox shows it
pub struct Conversation<'a> {
    pub manufacturer: &'a str,
    pub messages: &'a [Message],
}

pub struct SamplesView<'a> {
    conversations: &'a [Conversation<'a>],
    selected: usize,
    composer: &'a TextInputState,
    composing: bool,
}

impl<'a> SamplesView<'a> {
    pub fn new(
        conversations: &'a [Conversation<'a>],
        selected: usize,
        composer: &'a TextInputState,
        composing: bool,
    ) -> Self {
        Self {
            conversations,
            selected,
            composer,
            composing,
        }
    }

    fn thread_lines(conversation: &Conversation<'a>) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for message in conversation.messages {
            let who = if message.from_me {
                "You"
            } else {
                conversation.manufacturer
            };
            lines.push(Line::from(vec![
                Span::styled(who, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", message.sent_at.format("%H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.extend(message.content.lines().map(Line::from));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Widget for SamplesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.conversations.is_empty() {
            Paragraph::new(
                "No sample conversations yet.\n\nContact a manufacturer from the \
                 Manufacturers page (3) to request samples.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Inbox "))
            .render(area, buf);
            return;
        }

        let [list_area, thread_area] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(area);

        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .map(|c| ListItem::new(format!(" {}", c.manufacturer)))
            .collect();
        let mut state = ListState::default();
        let selected = self.selected.min(self.conversations.len() - 1);
        state.select(Some(selected));
        StatefulWidget::render(
            List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Inbox "))
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)),
            list_area,
            buf,
            &mut state,
        );

        let conversation = &self.conversations[selected];
        let [messages_area, composer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(thread_area);

        let lines = Self::thread_lines(conversation);
        // Keep the newest messages in view
        let height = messages_area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(height) as u16;
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", conversation.manufacturer)),
            )
            .render(messages_area, buf);

        TextInputWidget::new(&self.composer.value, self.composer.cursor)
            .title(if self.composing { "Message (Enter: Send, Esc: Done)" } else { "Message (i)" })
            .placeholder("Ask about samples, pricing or lead times")
            .focused(self.composing)
            .render(composer_area, buf);
    }
}
