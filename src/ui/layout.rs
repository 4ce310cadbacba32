use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct LookupAreas {
    pub size: Rect,
    pub header: Rect,
    pub log: Rect,
    pub profile: Rect,
    pub transactions: Rect,
    pub status_line: Rect,
    pub input_line: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct GraphAreas {
    pub size: Rect,
    pub header: Rect,
    pub nodes: Rect,
    pub canvas: Rect,
    pub log: Rect,
    pub status_line: Rect,
    pub input_line: Rect,
}

pub fn lookup_areas(size: Rect) -> LookupAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(vertical[1]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(main_chunks[1]);

    LookupAreas {
        size,
        header: vertical[0],
        log: main_chunks[0],
        profile: right_chunks[0],
        transactions: right_chunks[1],
        status_line: vertical[2],
        input_line: vertical[3],
    }
}

pub fn graph_areas(size: Rect) -> GraphAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(vertical[1]);

    GraphAreas {
        size,
        header: vertical[0],
        nodes: main_chunks[0],
        canvas: main_chunks[1],
        log: vertical[2],
        status_line: vertical[3],
        input_line: vertical[4],
    }
}
