//! Search bar component
//!
//! Shows the current search text. While active it captures every key.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Default)]
pub struct SearchBar {
    /// Whether typing edits the search text
    pub active: bool,
    query: String,
}

impl SearchBar {
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }
}

impl Component for SearchBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearSearch)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SearchInput(c))
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterSearchMode => self.active = true,
            Action::ExitSearchMode => self.active = false,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.active {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::DarkGray))];
        if self.query.is_empty() && !self.active {
            spans.push(Span::styled(
                "Search by name...",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                self.query.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if self.active {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
        Ok(())
    }
}
