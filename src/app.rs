//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the dataset and the single `ViewState` value.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, HelpDialog, QuitDialog, SearchBar, TableComponent};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{pipeline, DomainState, TableSnapshot, ViewState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

/// Main application state - coordinates between components
pub struct App {
    /// Loaded rows, never mutated
    pub domain: DomainState,

    /// Search text, sort configuration and current page
    pub view: ViewState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    pub config: Config,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub search_bar: SearchBar,
    pub table: TableComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(config: Config, domain: DomainState) -> App {
        App {
            domain,
            view: ViewState::default(),
            modals: ModalStack::new(),
            should_quit: false,
            search_bar: SearchBar::default(),
            table: TableComponent::new(config.currency_symbol.clone()),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            config,
        }
    }

    /// Run the pipeline for the current view state
    pub fn snapshot(&self) -> TableSnapshot<'_> {
        pipeline::snapshot(&self.domain.rows, &self.view)
    }

    /// Replace the view state, keeping the page in range
    fn set_view(&mut self, next: ViewState) {
        let total_pages = pipeline::snapshot(&self.domain.rows, &next).total_pages;
        let next = next.clamped(total_pages);
        if next != self.view {
            debug!(
                search = %next.search_text,
                sort = ?next.sort.key,
                direction = %next.sort.direction,
                page = next.current_page,
                total_pages,
                "view state changed"
            );
            self.view = next;
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        info!(
            rows = self.domain.rows.len(),
            source = %self.domain.source,
            currency = %self.config.currency_symbol,
            "table view ready"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        let action = if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)?
        } else if self.search_bar.active {
            self.search_bar.handle_key_event(key)?
        } else {
            self.table.handle_key_event(key)?
        };
        trace!("Mapped: {key:?} => {action:?}");
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.update(Action::OpenHelp)?;
                self.modals.push(Modal::Help);
            }
            Action::ScrollHelpUp | Action::ScrollHelpDown => {
                self.help_dialog.update(action)?;
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode | Action::ExitSearchMode => {
                self.search_bar.update(action)?;
            }
            Action::SearchInput(c) => self.set_view(self.view.push_search_char(c)),
            Action::SearchBackspace => self.set_view(self.view.pop_search_char()),
            Action::ClearSearch => self.set_view(self.view.with_search("")),

            // ─────────────────────────────────────────────────────────────────
            // Sorting
            // ─────────────────────────────────────────────────────────────────
            Action::SortBy(column) => self.set_view(self.view.request_sort(column)),

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::PrevPage => self.set_view(self.view.prev_page()),
            Action::NextPage => {
                let total_pages = self.snapshot().total_pages;
                self.set_view(self.view.next_page(total_pages));
            }
            Action::FirstPage => self.set_view(self.view.first_page()),
            Action::LastPage => {
                let total_pages = self.snapshot().total_pages;
                self.set_view(self.view.last_page(total_pages));
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        self.search_bar.set_query(&self.view.search_text);
        self.search_bar.draw(frame, layout.search)?;

        let snapshot = pipeline::snapshot(&self.domain.rows, &self.view);
        self.table
            .set_snapshot(&snapshot, &self.view, &self.domain.source);
        self.table.draw(frame, layout.table)?;

        render_help_bar(frame, layout.help, self.search_bar.active);

        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }

        Ok(())
    }
}

fn render_help_bar(frame: &mut Frame, area: Rect, searching: bool) {
    let key = |label: &'static str, color: Color| {
        Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };

    let spans = if searching {
        vec![
            key(" Enter/Esc ", Color::Green),
            Span::raw("Done  "),
            key(" Backspace ", Color::Yellow),
            Span::raw("Delete  "),
            key(" Ctrl+u ", Color::Yellow),
            Span::raw("Clear"),
        ]
    } else {
        vec![
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" 1-5 ", Color::Cyan),
            Span::raw("Sort "),
            key(" ←/→ ", Color::Cyan),
            Span::raw("Page "),
            key(" ? ", Color::White),
            Span::raw("Help "),
            key(" q ", Color::Yellow),
            Span::raw("Quit"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::Amount;
    use crate::model::view::SortDirection;
    use crate::model::{Column, DataSource, Row, Status};
    use ratatui::{backend::TestBackend, Terminal};

    fn row(id: i64, name: &str, amount: f64) -> Row {
        Row {
            id,
            name: name.to_string(),
            date: "2024-05-01".to_string(),
            status: Status::Active,
            amount: Amount::Number(amount),
        }
    }

    fn app_with(rows: Vec<Row>) -> App {
        App::new(
            Config::default(),
            DomainState::new(rows, DataSource::Embedded),
        )
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.snapshot().rows.iter().map(|r| r.name.clone()).collect()
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut next = app.handle_key_event(key).unwrap();
        while let Some(action) = next {
            next = app.update(action).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn many(count: usize) -> Vec<Row> {
        (1..=count as i64)
            .map(|i| row(i, &format!("Row {:03}", i), i as f64))
            .collect()
    }

    #[test]
    fn test_scenario_sort_toggle_and_search() {
        let mut app = app_with(vec![row(1, "Bob", 50.0), row(2, "Amy", 20.0)]);
        assert_eq!(visible_names(&app), vec!["Bob", "Amy"]);

        app.update(Action::SortBy(Column::Name)).unwrap();
        assert_eq!(visible_names(&app), vec!["Amy", "Bob"]);

        app.update(Action::SortBy(Column::Name)).unwrap();
        assert_eq!(visible_names(&app), vec!["Bob", "Amy"]);
        assert_eq!(app.view.sort.direction, SortDirection::Descending);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "am");
        assert_eq!(visible_names(&app), vec!["Amy"]);
        assert_eq!(app.view.current_page, 1);
    }

    #[test]
    fn test_search_resets_page() {
        let mut app = app_with(many(35));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view.current_page, 3);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.view.current_page, 1);
        assert_eq!(app.snapshot().matched, 35);
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let mut app = app_with(many(25));

        press(&mut app, KeyCode::Left);
        assert_eq!(app.view.current_page, 1);

        press(&mut app, KeyCode::End);
        assert_eq!(app.view.current_page, 3);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.view.current_page, 3);
        assert_eq!(app.snapshot().rows.len(), 5);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.view.current_page, 1);
    }

    #[test]
    fn test_empty_dataset_has_one_page() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Right);

        let snapshot = app.snapshot();
        assert_eq!(snapshot.total_pages, 1);
        assert_eq!(snapshot.current_page, 1);
        assert!(snapshot.rows.is_empty());
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut app = app_with(many(3));

        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_bar.active);

        // 'q' is text while searching, not quit
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.view.search_text, "q");
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.view.search_text, "");

        press(&mut app, KeyCode::Enter);
        assert!(!app.search_bar.active);
    }

    #[test]
    fn test_esc_clears_search_outside_search_mode() {
        let mut app = app_with(many(3));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "001");
        press(&mut app, KeyCode::Enter);
        assert_eq!(visible_names(&app), vec!["Row 001"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view.search_text, "");
        assert_eq!(visible_names(&app).len(), 3);
    }

    #[test]
    fn test_quit_dialog_flow() {
        let mut app = app_with(many(3));

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app_with(many(3));
        press(&mut app, KeyCode::Char('/'));

        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }

    #[test]
    fn test_help_dialog_blocks_table_keys() {
        let mut app = app_with(many(25));

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modals.top(), Some(&Modal::Help));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.view.current_page, 1);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_dialog.scroll_offset, 1);

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_draw_renders_search_table_and_pager() {
        let mut app = app_with(many(12));
        app.update(Action::EnterSearchMode).unwrap();
        app.update(Action::SearchInput('1')).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: Vec<String> = buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect())
            .collect();

        assert!(screen[1].contains("/ 1"));
        assert!(screen[3].contains("(4 of 12 rows)"));
        assert!(screen[22].contains("Page 1 of 1"));
        assert!(screen[23].contains("Done"));
    }
}
