use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    COLOR_BORDER, COLOR_FOOD, COLOR_SNAKE_BODY, COLOR_SNAKE_HEAD, GLYPH_FOOD, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD,
};
use crate::game::{CellKind, GameState, GameStatus};
use crate::grid::{Grid, Position};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::render_pause_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);

    let block = Block::bordered()
        .title(" toroid-snake ")
        .border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, state);

    if state.status == GameStatus::Paused {
        render_pause_menu(frame, play_area);
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let grid = state.grid();
    let buffer = frame.buffer_mut();

    let visible = state
        .snake
        .positions()
        .copied()
        .chain(std::iter::once(state.food.position));
    for position in visible {
        let Some((x, y)) = logical_to_terminal(inner, grid, position) else {
            continue;
        };

        match state.cell_kind(position) {
            CellKind::Head => buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(COLOR_SNAKE_HEAD)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => {
                buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(COLOR_SNAKE_BODY));
            }
            CellKind::Food => buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD)),
            CellKind::Empty => {}
        }
    }
}

/// Maps a grid cell to a terminal cell, or `None` when it falls outside `inner`.
fn logical_to_terminal(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if !grid.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
