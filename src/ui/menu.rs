use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;
use crate::game::Outcome;
use crate::grid::Cell;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to steer"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::default().fg(theme.menu_title)),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    outcome: Option<Outcome>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let title = match outcome {
        Some(Outcome::BoardFull) => "YOU WIN",
        _ => "GAME OVER",
    };
    let lines = vec![
        Line::from(title).style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(outcome_text(outcome)),
        Line::from(""),
        Line::from("[R] Play again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Human-readable cause line for the game-over popup.
#[must_use]
pub fn outcome_text(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Collided {
            cell: Cell::Wall, ..
        }) => "Cause: hit wall",
        Some(Outcome::Collided {
            cell: Cell::SnakeTail,
            ..
        }) => "Cause: bit your tail",
        Some(Outcome::Collided { .. }) => "Cause: hit yourself",
        Some(Outcome::BoardFull) => "The board is full!",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use crate::game::Outcome;
    use crate::grid::{Cell, Position};
    use crate::input::Direction;

    use super::outcome_text;

    #[test]
    fn outcome_text_names_collision_cause() {
        let at = Position::new(0, 0);

        assert_eq!(
            outcome_text(Some(Outcome::Collided {
                at,
                cell: Cell::Wall
            })),
            "Cause: hit wall"
        );
        assert_eq!(
            outcome_text(Some(Outcome::Collided {
                at,
                cell: Cell::SnakeBody(Direction::Left)
            })),
            "Cause: hit yourself"
        );
        assert_eq!(
            outcome_text(Some(Outcome::Collided {
                at,
                cell: Cell::SnakeTail
            })),
            "Cause: bit your tail"
        );
        assert_eq!(outcome_text(Some(Outcome::BoardFull)), "The board is full!");
        assert_eq!(outcome_text(None), "");
    }
}
