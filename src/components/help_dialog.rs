//! Help dialog component
//!
//! Lists every keyboard and mouse binding.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Debug, Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollHelpDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollHelpUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenHelp => self.scroll_offset = 0,
            // clamped to the content height on the next draw
            Action::ScrollHelpDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollHelpUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = build_help_content();
        let total = content.len();

        let dialog_area = centered_popup(area, 56, total as u16 + 2);
        frame.render_widget(Clear, dialog_area);

        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:14}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Search");
    add_shortcut(&mut lines, "/", "Edit the name filter");
    add_shortcut(&mut lines, "Enter / Esc", "Stop editing");
    add_shortcut(&mut lines, "Ctrl+u", "Clear while editing");
    add_shortcut(&mut lines, "Esc", "Clear the filter");

    add_section(&mut lines, "Sorting");
    add_shortcut(&mut lines, "1 .. 5", "Sort by ID, NAME, DATE, STATUS, AMOUNT");
    add_shortcut(&mut lines, "click header", "Same as the number key");
    add_shortcut(&mut lines, "again", "Ascending, then descending");

    add_section(&mut lines, "Pages");
    add_shortcut(&mut lines, "← / h / PgUp", "Previous page");
    add_shortcut(&mut lines, "→ / l / PgDn", "Next page");
    add_shortcut(&mut lines, "Home / g", "First page");
    add_shortcut(&mut lines, "End / G", "Last page");

    add_section(&mut lines, "General");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");
    add_shortcut(&mut lines, "Ctrl+c", "Quit immediately");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            assert_eq!(
                dialog
                    .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
                    .unwrap(),
                Some(Action::CloseModal)
            );
        }
    }

    #[test]
    fn test_scroll_keys_map_to_actions() {
        let mut dialog = HelpDialog::default();
        let down = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(down, Some(Action::ScrollHelpDown));
        assert_eq!(dialog.scroll_offset, 0);

        dialog.update(Action::ScrollHelpDown).unwrap();
        dialog.update(Action::ScrollHelpDown).unwrap();
        assert_eq!(dialog.scroll_offset, 2);

        let up = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(up, Some(Action::ScrollHelpUp));
        dialog.update(Action::ScrollHelpUp).unwrap();
        dialog.update(Action::ScrollHelpUp).unwrap();
        dialog.update(Action::ScrollHelpUp).unwrap();
        assert_eq!(dialog.scroll_offset, 0);
    }

    #[test]
    fn test_open_resets_scroll() {
        let mut dialog = HelpDialog { scroll_offset: 4 };
        dialog.update(Action::OpenHelp).unwrap();
        assert_eq!(dialog.scroll_offset, 0);
    }
}
