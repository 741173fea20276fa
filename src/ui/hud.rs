use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::COLOR_HUD;
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Values shown in the HUD that do not live in [`GameState`].
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub tick_rate: u32,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: HudInfo) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(state, info, usize::from(status_area.width)))
            .alignment(Alignment::Right)
            .style(Style::default().fg(COLOR_HUD)),
        status_area,
    );

    play_area
}

/// Builds the status text, falling back to short labels when it would not fit.
#[must_use]
pub fn status_line(state: &GameState, info: HudInfo, available_width: usize) -> String {
    let full = format_line(state, info, false);
    if full.width() <= available_width {
        return full;
    }

    format_line(state, info, true)
}

fn format_line(state: &GameState, info: HudInfo, compact: bool) -> String {
    let labels = if compact {
        ["S", "B", "L", "R"]
    } else {
        ["Score", "Best", "Length", "Resets"]
    };
    let grid = state.grid();

    [
        format!("{}: {}", labels[0], state.score),
        format!("{}: {}", labels[1], state.best_score),
        format!("{}: {}", labels[2], state.snake.len()),
        format!("{}: {}", labels[3], state.resets),
        format!("{}x{} @ {}/s", grid.width(), grid.height(), info.tick_rate),
    ]
    .join(SEPARATOR)
}
