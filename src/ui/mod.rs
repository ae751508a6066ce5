pub mod layout;
mod fill_blank;
mod flashcards;
mod home;
mod matching;
mod mode_select;

use crate::app::App;
use crate::models::Route;
use layout::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub use fill_blank::draw_fill_blank;
pub use flashcards::draw_flashcards;
pub use home::draw_home;
pub use matching::draw_matching;
pub use mode_select::draw_mode_select;

pub fn draw(f: &mut Frame, app: &App) {
    match app.route {
        Route::Home => draw_home(f, app),
        Route::ModeSelect => draw_mode_select(f, app),
        Route::Flashcards => draw_flashcards(f, app),
        Route::Matching => draw_matching(f, app),
        Route::FillInBlank => draw_fill_blank(f, app),
    }

    if let Some(message) = &app.notification {
        draw_notification(f, message);
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// One line of `key label` pairs for the help bar.
fn help_line(keys: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key.to_string(), key_style()),
                Span::from(format!(" {}  ", label)),
            ]
        })
        .collect();
    Line::from(spans)
}

fn draw_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let help = Paragraph::new(help_line(keys))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn draw_header(f: &mut Frame, area: Rect, text: String) {
    let header = Paragraph::new(text)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_points(f: &mut Frame, area: Rect, points: u32) {
    let text = Paragraph::new(format!("{}", points))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Points"));
    f.render_widget(text, area);
}

/// Header text for a study view: the quiz title when there is one.
fn study_title(app: &App, mode: &str) -> String {
    match app.store.title() {
        Some(title) => format!("{} - {}", mode, title),
        None => mode.to_string(),
    }
}

fn draw_notification(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Notice"),
        );
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::generator::sample_questions;
    use crate::models::AiResponse;
    use crate::store::SessionStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded_app() -> App {
        let mut app = App::new(
            SessionStore::new(),
            PathBuf::from("/nonexistent/pdfs"),
            StdRng::seed_from_u64(5),
        );
        app.handle_ai_response(AiResponse::QuizReady {
            questions: sample_questions(),
            title: Some("Cell Biology".to_string()),
        });
        app
    }

    #[test]
    fn test_help_line_pairs_keys_and_labels() {
        let line = help_line(&[("Enter", "Select"), ("Esc", "Back")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter Select  Esc Back  ");
        assert_eq!(line.spans.len(), 4);
    }

    #[test]
    fn test_home_renders_without_files() {
        let app = App::new(
            SessionStore::new(),
            PathBuf::from("/nonexistent/pdfs"),
            StdRng::seed_from_u64(5),
        );
        let screen = render(&app);
        assert!(screen.contains("No PDF files found"));
        assert!(screen.contains("AI: Disabled"));
    }

    #[test]
    fn test_mode_select_shows_title_and_modes() {
        let app = loaded_app();
        let screen = render(&app);
        assert!(screen.contains("Cell Biology"));
        assert!(screen.contains("Flashcards"));
        assert!(screen.contains("Matching"));
        assert!(screen.contains("Fill in the Blank"));
    }

    #[test]
    fn test_flashcards_show_points_and_card() {
        let mut app = loaded_app();
        app.navigate(Route::Flashcards);
        app.store.set_points(3);

        let screen = render(&app);
        assert!(screen.contains("Card 1 / 4"));
        assert!(screen.contains("Points"));
        assert!(screen.contains("3"));
        assert!(screen.contains("The mitochondria is the powerhouse"));
    }

    #[test]
    fn test_matching_renders_all_cards() {
        let mut app = loaded_app();
        app.navigate(Route::Matching);

        let screen = render(&app);
        assert!(screen.contains("[1]"));
        assert!(screen.contains("[8]"));
        assert!(screen.contains("ATP"));
    }

    #[test]
    fn test_fill_blank_loading_state() {
        let mut app = loaded_app();
        app.navigate(Route::FillInBlank);

        let screen = render(&app);
        assert!(screen.contains("Loading question"));
    }

    #[test]
    fn test_notification_popup() {
        let mut app = loaded_app();
        app.notify("Failed to generate quiz");
        let screen = render(&app);
        assert!(screen.contains("Failed to generate quiz"));
        assert!(screen.contains("Press any key"));
    }
}
