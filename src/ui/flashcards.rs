use super::{draw_header, draw_help, draw_points, study_title};
use crate::app::App;
use crate::ui::layout::calculate_study_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_flashcards(f: &mut Frame, app: &App) {
    let layout = calculate_study_chunks(f.area());
    let questions = app.store.questions();
    let deck = &app.flashcards;

    draw_header(
        f,
        layout.header_area,
        format!(
            "{} - Card {} / {}",
            study_title(app, "Flashcards"),
            deck.current_index + 1,
            questions.len()
        ),
    );
    draw_points(f, layout.points_area, app.store.points());

    let Some(card) = questions.get(deck.current_index) else {
        return;
    };

    let (title, label, body, color) = if deck.is_flipped {
        ("Answer", "Correct Answer:", card.answer.as_str(), Color::Green)
    } else {
        ("Question", "Question:", card.question.as_str(), Color::Cyan)
    };

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(body));

    let card_widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    f.render_widget(card_widget, layout.body_area);

    draw_help(
        f,
        layout.help_area,
        &[
            ("Space", "Flip"),
            ("←/→", "Previous/Next"),
            ("r", "Restart"),
            ("Esc", "Back"),
        ],
    );
}
