use super::{draw_header, draw_help, draw_points, study_title};
use crate::app::App;
use crate::ui::layout::{calculate_fill_blank_chunks, calculate_study_chunks};
use crate::utils::option_key;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_fill_blank(f: &mut Frame, app: &App) {
    let layout = calculate_study_chunks(f.area());
    let round = &app.fill_blank;

    draw_header(f, layout.header_area, study_title(app, "Fill in the Blank"));
    draw_points(f, layout.points_area, app.store.points());

    let Some(exercise) = &round.exercise else {
        let loading = Paragraph::new("Loading question...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, layout.body_area);
        draw_help(f, layout.help_area, &[("Esc", "Back")]);
        return;
    };

    let parts = calculate_fill_blank_chunks(layout.body_area);

    let mut question_title = "Question".to_string();
    if round.is_loading() {
        question_title.push_str(" (loading next...)");
    }
    let question = Paragraph::new(exercise.question.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(question_title));
    f.render_widget(question, parts.question_area);

    let (answer_line, answer_color) = match round.feedback() {
        Some(true) => (format!("{}  Correct!", round.selected.join(", ")), Color::Green),
        Some(false) => (
            format!("{}  Not quite, try again", round.selected.join(", ")),
            Color::Red,
        ),
        None if round.selected.is_empty() => ("Pick two words".to_string(), Color::DarkGray),
        None => (round.selected.join(", "), Color::Yellow),
    };
    let answer = Paragraph::new(answer_line)
        .style(Style::default().fg(answer_color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(answer, parts.answer_area);

    let items: Vec<ListItem> = exercise
        .options
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let key = option_key(i).unwrap_or(' ');
            let style = if round.fixed.contains(word) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if round.selected.contains(word) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", key),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(word.clone(), style),
            ]))
        })
        .collect();
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, parts.options_area);

    if round.is_correct() {
        draw_help(
            f,
            layout.help_area,
            &[("n", "Next Question"), ("r", "New Question"), ("Esc", "Back")],
        );
    } else {
        draw_help(
            f,
            layout.help_area,
            &[("1-6", "Pick Word"), ("r", "New Question"), ("Esc", "Back")],
        );
    }
}
