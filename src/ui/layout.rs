use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct StudyLayout {
    pub header_area: Rect,
    pub points_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct FillBlankLayout {
    pub question_area: Rect,
    pub answer_area: Rect,
    pub options_area: Rect,
}

/// Header row (title + points box), body, and key help.
pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(chunks[0]);

    StudyLayout {
        header_area: header_chunks[0],
        points_area: header_chunks[1],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_fill_blank_chunks(body: Rect) -> FillBlankLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(body);

    FillBlankLayout {
        question_area: chunks[0],
        answer_area: chunks[1],
        options_area: chunks[2],
    }
}

/// Split `area` into a `rows` x `cols` grid, row-major.
pub fn grid_cells(area: Rect, rows: usize, cols: usize) -> Vec<Rect> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .collect()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
