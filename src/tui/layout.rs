use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Chat screen layout: sidebar on the left, conversation column on the right
/// with a header, the message pane, the input line and a status bar.
pub struct ChatLayout {
    pub sidebar_area: Rect,
    pub header_area: Rect,
    pub messages_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl ChatLayout {
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Sidebar
                Constraint::Percentage(70), // Conversation column
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Topic/stance header
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Input (bordered)
                Constraint::Length(1), // Status bar
            ])
            .split(columns[1]);

        Self {
            sidebar_area: columns[0],
            header_area: rows[0],
            messages_area: rows[1],
            input_area: rows[2],
            status_area: rows[3],
        }
    }
}

/// Centered box used by the login screen.
pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
