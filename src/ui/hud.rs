use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::renderer::GameView;

const HUD_MARGIN_X: u16 = 1;
const TABLE_SEPARATOR: &str = " │ ";

/// Renders the title row and the two HUD rows, returning the area left for the board.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &GameView<'_>, theme: &Theme) -> Rect {
    let [title_area, play_area, score_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(view, theme)).alignment(Alignment::Center),
        inset_horizontal(score_area, HUD_MARGIN_X),
    );

    frame.render_widget(
        Paragraph::new(Line::from("Move: WASD/arrows │ P: pause │ R: restart │ Q/Esc: quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_help)),
        inset_horizontal(help_area, HUD_MARGIN_X),
    );

    play_area
}

fn status_line(view: &GameView<'_>, theme: &Theme) -> Line<'static> {
    let score_style = Style::default().fg(theme.hud_score);
    let speed_style = Style::default().fg(theme.hud_speed);

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(view.score.to_string(), score_style),
        Span::raw(TABLE_SEPARATOR),
        Span::raw("Speed: "),
        Span::styled(format!("{}ms", view.speed_ms), speed_style),
        Span::raw(TABLE_SEPARATOR),
        Span::raw("Length: "),
        Span::styled(view.snake.len().to_string(), score_style),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
