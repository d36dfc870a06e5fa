use mafateeh_core::MafateehError;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::io;

pub fn terminal_error(err: io::Error) -> MafateehError {
    MafateehError::Terminal(err.to_string())
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Keep a list cursor inside `len` rows.
pub fn clamp_cursor(cursor: Option<usize>, len: usize) -> Option<usize> {
    match (cursor, len) {
        (_, 0) => None,
        (None, _) => Some(0),
        (Some(i), len) => Some(i.min(len - 1)),
    }
}
