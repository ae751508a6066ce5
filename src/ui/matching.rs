use super::{draw_header, draw_help, draw_points, study_title};
use crate::app::App;
use crate::ui::layout::{calculate_study_chunks, grid_cells};
use crate::utils::option_key;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const COLUMNS: usize = 4;

pub fn draw_matching(f: &mut Frame, app: &App) {
    let layout = calculate_study_chunks(f.area());
    let game = &app.matching;

    let status = if game.is_complete() {
        "All pairs matched!".to_string()
    } else {
        format!("{} / {} matched", game.matched.len(), game.cards.len() / 2)
    };
    draw_header(
        f,
        layout.header_area,
        format!("{} - {}", study_title(app, "Matching"), status),
    );
    draw_points(f, layout.points_area, app.store.points());

    let rows = game.cards.len().div_ceil(COLUMNS);
    let cells = grid_cells(layout.body_area, rows, COLUMNS);

    for (i, (card, area)) in game.cards.iter().zip(cells).enumerate() {
        let (border, text_style) = if game.is_matched(i) {
            (
                Style::default().fg(Color::Green),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::DIM),
            )
        } else if game.is_selected(i) {
            let color = if game.is_revealing() {
                Color::Red
            } else {
                Color::Yellow
            };
            (
                Style::default().fg(color).add_modifier(Modifier::BOLD),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default())
        };

        let title = option_key(i)
            .map(|k| format!("[{}]", k))
            .unwrap_or_default();
        let widget = Paragraph::new(card.text.as_str())
            .style(text_style)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            );
        f.render_widget(widget, area);
    }

    draw_help(
        f,
        layout.help_area,
        &[("1-8", "Select Card"), ("r", "Reshuffle"), ("Esc", "Back")],
    );
}
