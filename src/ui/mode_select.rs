use super::{draw_header, draw_help, draw_points, study_title};
use crate::app::{App, STUDY_MODES};
use crate::models::Route;
use crate::ui::layout::calculate_study_chunks;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn label(route: Route) -> &'static str {
    match route {
        Route::Flashcards => "Flashcards",
        Route::Matching => "Matching",
        Route::FillInBlank => "Fill in the Blank",
        Route::Home | Route::ModeSelect => "",
    }
}

fn describe(route: Route) -> &'static str {
    match route {
        Route::Flashcards => "Flip through the questions and reveal each answer",
        Route::Matching => "Pair every question with its answer",
        Route::FillInBlank => "Complete a question with its missing words",
        Route::Home | Route::ModeSelect => "",
    }
}

pub fn draw_mode_select(f: &mut Frame, app: &App) {
    let layout = calculate_study_chunks(f.area());

    draw_header(f, layout.header_area, study_title(app, "Choose a Study Mode"));
    draw_points(f, layout.points_area, app.store.points());

    let items: Vec<ListItem> = STUDY_MODES
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let selected = i == app.mode_index;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::from(Span::styled(format!("{}{}", marker, label(*route)), style)),
                Line::from(Span::styled(
                    format!("    {}", describe(*route)),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(format!(
        "{} questions",
        app.store.questions().len()
    )));
    f.render_widget(list, layout.body_area);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "Start"),
            ("Esc", "New PDF"),
            ("q", "Quit"),
        ],
    );
}
