//! Layout calculations for the UI

use ratatui::layout::{Constraint, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub search: Rect,
    pub table: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + area.width.saturating_sub(width) / 2;
    let popup_y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Search line on top, table with its pager, key hints at the bottom
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let [search, table, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    MainLayout {
        search,
        table,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_popup(area, 40, 10), Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_popup(small, 40, 10), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_main_layout() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.help, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.table, Rect::new(0, 3, 80, 20));
    }
}
