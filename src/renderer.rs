use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{BoundaryPolicy, Theme};
use crate::engine::{GameOverReason, GameState, GameStatus};
use crate::snake::Position;
use crate::spawner::PowerUpKind;

const GLYPH_SNAKE: &str = "█";
const GLYPH_SNAKE_TAIL: &str = "▓";
const GLYPH_FOOD: &str = "●";

/// Supplemental values displayed alongside the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    pub paused: bool,
    pub theme: &'a Theme,
}

/// Renders the full game frame from immutable state.
///
/// The engine never writes output; this is the only place game state is
/// turned into terminal cells.
pub fn render(frame: &mut Frame<'_>, state: &GameState, info: HudInfo<'_>) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let theme = info.theme;
    let border_style = match state.grid().policy() {
        // The border is the wall ring; draw it solid.
        BoundaryPolicy::Blocking => Style::new().fg(theme.border_fg),
        // No walls; a dim frame just marks where the torus folds.
        BoundaryPolicy::Wrapping => Style::new()
            .fg(theme.border_fg)
            .add_modifier(Modifier::DIM),
    };
    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_power_up(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);
    render_hud(frame, hud_area, state, info);

    if info.paused {
        render_overlay(frame, play_area, "Paused", theme);
    } else if let GameStatus::Over(reason) = state.status {
        render_overlay(frame, play_area, game_over_text(reason), theme);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state, state.food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_power_up(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some(power_up) = state.power_up else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, state, power_up.position) else {
        return;
    };

    let glyph = match power_up.kind {
        PowerUpKind::ScoreBonus => "$",
        PowerUpKind::Shrink => "▼",
        PowerUpKind::Invincibility => "★",
        PowerUpKind::Teleport => "◊",
    };

    frame.buffer_mut().set_string(
        x,
        y,
        glyph,
        Style::new().fg(theme.power_up).add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let tail = state.snake.segments().last().copied();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state, *segment) else {
            continue;
        };

        let style = if *segment == head {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else if Some(*segment) == tail {
            Style::new().fg(theme.snake_tail)
        } else {
            Style::new().fg(theme.snake_body)
        };

        let glyph = if Some(*segment) == tail && *segment != head {
            GLYPH_SNAKE_TAIL
        } else {
            GLYPH_SNAKE
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: HudInfo<'_>) {
    let mut text = format!(
        " Score: {}   Best: {}   Length: {}",
        state.score,
        info.high_score,
        state.snake.len()
    );

    if let Some(effect) = state.snake.status() {
        text.push_str(&format!("   Invincible: {}", effect.remaining_ticks));
    }

    let hud = Paragraph::new(Line::from(text)).style(Style::new().fg(info.theme.hud_fg));
    frame.render_widget(hud, area);
}

fn render_overlay(frame: &mut Frame<'_>, area: Rect, text: &str, theme: &Theme) {
    let [_, line_area, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let overlay = Paragraph::new(Line::from(text))
        .centered()
        .style(
            Style::new()
                .fg(theme.overlay_fg)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(overlay, line_area);
}

fn game_over_text(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::WallCollision => "Hit the wall! Enter restarts, Q quits.",
        GameOverReason::SelfCollision => "You bit yourself! Enter restarts, Q quits.",
        GameOverReason::BoardFull => "Board cleared, you win! Enter restarts, Q quits.",
    }
}

/// Maps a logical grid cell to a terminal cell inside the play block.
///
/// Under the blocking policy the drawn border stands in for the wall ring,
/// so interior coordinates shift by one; under wrapping every cell is
/// playable and maps directly.
fn logical_to_terminal(inner: Rect, state: &GameState, position: Position) -> Option<(u16, u16)> {
    let bounds = state.grid().size();
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let shift = match state.grid().policy() {
        BoundaryPolicy::Blocking => 1,
        BoundaryPolicy::Wrapping => 0,
    };

    let x_offset = u16::try_from(position.x - shift).ok()?;
    let y_offset = u16::try_from(position.y - shift).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::config::{BoundaryPolicy, GridSize};
    use crate::engine::GameState;
    use crate::snake::Position;

    use super::logical_to_terminal;

    fn inner_rect() -> Rect {
        Rect::new(1, 1, 28, 13)
    }

    #[test]
    fn blocking_interior_cell_shifts_past_the_border() {
        let state = GameState::new_with_seed(
            GridSize {
                width: 30,
                height: 15,
            },
            BoundaryPolicy::Blocking,
            false,
            1,
        );

        assert_eq!(
            logical_to_terminal(inner_rect(), &state, Position { x: 1, y: 1 }),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner_rect(), &state, Position { x: 5, y: 3 }),
            Some((5, 3))
        );
    }

    #[test]
    fn wrapping_cells_map_directly() {
        let state = GameState::new_with_seed(
            GridSize {
                width: 28,
                height: 13,
            },
            BoundaryPolicy::Wrapping,
            false,
            1,
        );

        assert_eq!(
            logical_to_terminal(inner_rect(), &state, Position { x: 0, y: 0 }),
            Some((1, 1))
        );
    }

    #[test]
    fn out_of_bounds_positions_are_skipped() {
        let state = GameState::new_with_seed(
            GridSize {
                width: 30,
                height: 15,
            },
            BoundaryPolicy::Blocking,
            false,
            1,
        );

        assert_eq!(
            logical_to_terminal(inner_rect(), &state, Position { x: -1, y: 2 }),
            None
        );
        assert_eq!(
            logical_to_terminal(inner_rect(), &state, Position { x: 30, y: 2 }),
            None
        );
    }
}
