use super::{draw_help, key_style};
use crate::app::App;
use crate::pdf::file_label;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const MAX_NAME_WIDTH: usize = 60;

pub fn draw_home(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(f.area());

    let title = Paragraph::new(concat!("PDF Study v", env!("CARGO_PKG_VERSION")))
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = if app.pdf_files.is_empty() {
        vec![ListItem::new(format!(
            "No PDF files found in {}",
            app.pdf_dir.display()
        ))
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.pdf_files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let mut name = truncate_string(&file_label(path), MAX_NAME_WIDTH);
                if app.generating && app.chosen_file.as_deref() == Some(path.as_path()) {
                    name.push_str("  (generating quiz...)");
                }
                let style = if i == app.selected_file_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(name).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("PDF Files"),
    );
    f.render_widget(list, chunks[1]);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);

    let ai_status_content = match &app.ai_model {
        Some(model) => vec![
            Line::from("AI: Enabled"),
            Line::from(format!("Model: {}", model)),
        ],
        None => vec![
            Line::from("AI: Disabled"),
            Line::from("Set OPENROUTER_API_KEY"),
        ],
    };
    let ai_status = Paragraph::new(ai_status_content)
        .style(
            Style::default()
                .fg(if app.ai_model.is_some() {
                    Color::Green
                } else {
                    Color::Yellow
                })
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("AI Status"));
    f.render_widget(ai_status, footer[0]);

    if app.generating {
        let waiting = Paragraph::new("Generating quiz, please wait...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(waiting, footer[1]);
    } else {
        draw_help(
            f,
            footer[1],
            &[
                ("↑/↓", "Navigate"),
                ("Enter", "Generate Quiz"),
                ("r", "Refresh"),
                ("q", "Quit"),
            ],
        );
    }
}
