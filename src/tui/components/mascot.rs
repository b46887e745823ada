// Mascot component
//
// A small face in the bottom-right corner. Eyes follow the mouse by up to one
// cell, close for a blink, and close with a "z" while the widget sleeps.

use crate::theme::Theme;
use crate::widget::MascotFace;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const WIDTH: u16 = 11;
pub const HEIGHT: u16 = 5;

/// Interior columns and rows
const COLS: usize = WIDTH as usize - 2;
const ROWS: usize = HEIGHT as usize - 2;

/// Resting eye columns; the middle row is the resting eye row
const LEFT_EYE: usize = 2;
const RIGHT_EYE: usize = 6;

/// Interior rows of the face as plain strings
pub fn face_rows(face: MascotFace) -> Vec<String> {
    let mut rows = vec![vec![' '; COLS]; ROWS];
    let mid = ROWS / 2;

    match face {
        MascotFace::Awake { dx, dy } => {
            let row = (mid as i32 + dy as i32).clamp(0, ROWS as i32 - 1) as usize;
            for eye in [LEFT_EYE, RIGHT_EYE] {
                let col = (eye as i32 + dx as i32).clamp(0, COLS as i32 - 1) as usize;
                rows[row][col] = '●';
            }
        }
        MascotFace::Blinking => {
            rows[mid][LEFT_EYE] = '─';
            rows[mid][RIGHT_EYE] = '─';
        }
        MascotFace::Asleep => {
            rows[mid][LEFT_EYE] = '─';
            rows[mid][RIGHT_EYE] = '─';
            rows[0][COLS - 1] = 'z';
        }
    }

    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// Area the mascot occupies inside `area` (bottom-right corner)
pub fn area_in(area: Rect) -> Rect {
    let width = WIDTH.min(area.width);
    let height = HEIGHT.min(area.height);
    Rect::new(
        area.right().saturating_sub(width + 1),
        area.bottom().saturating_sub(height),
        width,
        height,
    )
}

pub fn render(f: &mut Frame, area: Rect, face: MascotFace, theme: &Theme) {
    let color = match face {
        MascotFace::Asleep => theme.muted,
        _ => theme.accent,
    };
    let eye_style = Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = face_rows(face)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, eye_style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme.background));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awake_eyes_rest_in_the_middle() {
        let rows = face_rows(MascotFace::Awake { dx: 0, dy: 0 });
        assert_eq!(rows[1], "  ●   ●  ");
        assert_eq!(rows[0].trim(), "");
    }

    #[test]
    fn eyes_shift_toward_pointer() {
        let rows = face_rows(MascotFace::Awake { dx: 1, dy: -1 });
        assert_eq!(rows[0], "   ●   ● ");
    }

    #[test]
    fn asleep_shows_closed_eyes_and_z() {
        let rows = face_rows(MascotFace::Asleep);
        assert!(rows[0].ends_with('z'));
        assert_eq!(rows[1], "  ─   ─  ");
    }
}
