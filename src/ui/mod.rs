use chrono::{Local, TimeZone};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, InputMode, Mode, StatusLevel};
use crate::lookup::{LogEntry, LogLevel, Profile, Transaction};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    match app.mode {
        Mode::Lookup => {
            let areas = layout::lookup_areas(size);
            draw_header(f, areas.header, app);
            draw_log_panel(f, areas.log, &app.log);
            draw_profile_card(f, areas.profile, &app.profile);
            draw_transactions(f, areas.transactions, &app.transactions);
            draw_status_line(f, areas.status_line, app);
            draw_input_line(f, areas.input_line, app);
        }
        Mode::Graph => {
            let areas = layout::graph_areas(size);
            draw_header(f, areas.header, app);
            draw_node_list(f, areas.nodes, app);
            draw_graph_canvas(f, areas.canvas, app);
            draw_log_panel(f, areas.log, &app.log);
            draw_status_line(f, areas.status_line, app);
            draw_input_line(f, areas.input_line, app);
        }
    }

    if app.help_open {
        draw_help_popup(f, size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let endpoint = if app.rpc_endpoint.is_empty() {
        "connecting…"
    } else {
        app.rpc_endpoint.as_str()
    };
    let title = Line::from(vec![
        Span::styled(
            "enscope",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("RPC", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {endpoint} ")),
        Span::styled("Mode", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.mode.title())),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(left, chunks[0]);

    let activity = if app.lookup_in_progress {
        Span::styled("looking up…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("idle", Style::default().fg(Color::DarkGray))
    };
    let chain = app
        .chain_id
        .map(|id| format!("chain {id}  "))
        .unwrap_or_default();
    let right = Paragraph::new(Line::from(vec![Span::raw(chain), activity]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn draw_log_panel(f: &mut Frame, area: Rect, log: &[LogEntry]) {
    let items: Vec<ListItem> = log
        .iter()
        .map(|entry| {
            let style = match entry.level {
                LogLevel::Info => Style::default().fg(Color::Gray),
                LogLevel::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.time.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(list, area);
}

fn draw_profile_card(f: &mut Frame, area: Rect, profile: &Profile) {
    let row = |label: &str, value: &Option<String>| {
        Line::from(vec![
            Span::styled(
                format!("{label:<12}"),
                Style::default().fg(Color::DarkGray),
            ),
            match value {
                Some(value) => Span::raw(value.clone()),
                None => Span::styled("—", Style::default().fg(Color::DarkGray)),
            },
        ])
    };

    let lines = vec![
        row("Name", &profile.name),
        row("Address", &profile.address),
        row("Balance", &profile.balance.as_ref().map(|b| format!("{b} ETH"))),
        row("Reverse", &profile.reverse),
        row("Resolver", &profile.resolver),
        row("URL", &profile.url),
        row("Avatar", &profile.avatar),
        row("Description", &profile.description),
    ];

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn draw_transactions(f: &mut Frame, area: Rect, transactions: &[Transaction]) {
    let items: Vec<ListItem> = transactions
        .iter()
        .map(|tx| {
            let to = tx
                .to
                .as_deref()
                .map(short_addr)
                .unwrap_or_else(|| "create".to_string());
            let when = tx
                .timestamp
                .and_then(|ts| Local.timestamp_opt(ts as i64, 0).single())
                .map(|dt| dt.format("%m-%d %H:%M").to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<9}", tx.block_number),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{} ", short_hash(&tx.hash, 12))),
                Span::styled(
                    format!("{} → {} ", short_addr(&tx.from), to),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{} ETH ", tx.value),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::styled(when, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let title = format!("Transactions ({})", transactions.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_node_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let style = if idx == app.selected_node {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(node.id.clone(), style))
        })
        .collect();

    let title = format!("Nodes ({})", app.graph.nodes.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_graph_canvas(f: &mut Frame, area: Rect, app: &App) {
    let graph = &app.graph;
    let max_x = graph.nodes.iter().map(|n| n.x).max().unwrap_or(0) as f64;
    let max_y = graph.nodes.iter().map(|n| n.y).max().unwrap_or(0) as f64;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Graph"))
        .x_bounds([0.0, max_x + 200.0])
        .y_bounds([0.0, max_y + 150.0])
        .paint(|ctx| {
            // Grid y grows downward; canvas y grows upward
            let flip = |y: i64| max_y + 150.0 - y as f64;

            for edge in &graph.edges {
                let source = graph.nodes.iter().find(|n| n.id == edge.source);
                let target = graph.nodes.iter().find(|n| n.id == edge.target);
                if let (Some(source), Some(target)) = (source, target) {
                    ctx.draw(&CanvasLine {
                        x1: source.x as f64,
                        y1: flip(source.y),
                        x2: target.x as f64,
                        y2: flip(target.y),
                        color: Color::DarkGray,
                    });
                }
            }

            for (idx, node) in graph.nodes.iter().enumerate() {
                let style = if idx == app.selected_node {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::LightCyan)
                };
                ctx.print(
                    node.x as f64,
                    flip(node.y),
                    Line::from(Span::styled(format!("● {}", node.title), style)),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let style = match level {
                StatusLevel::Info => Style::default().fg(Color::LightGreen),
                StatusLevel::Warn => Style::default().fg(Color::Yellow),
                StatusLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(text.to_string(), style))
        }
        None => Line::from(Span::styled(
            "q quit  Tab mode  i edit  Enter submit  ? help",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_input_line(f: &mut Frame, area: Rect, app: &App) {
    let prefix = match app.mode {
        Mode::Lookup => "lookup",
        Mode::Graph => "graph",
    };
    let (marker, style) = match app.input_mode {
        InputMode::Editing => ("▸", Style::default().fg(Color::White)),
        InputMode::Normal => (" ", Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{marker} {prefix} "),
            Style::default().fg(Color::LightCyan),
        ),
        Span::styled(app.active_input().to_string(), style),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if app.input_mode == InputMode::Editing {
        let cursor_x = area.x + 2 + prefix.len() as u16 + 1 + app.active_input().len() as u16;
        f.set_cursor(cursor_x.min(area.right().saturating_sub(1)), area.y);
    }
}

fn draw_help_popup(f: &mut Frame, size: Rect) {
    let area = centered_rect(50, 40, size);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("q          quit"),
        Line::from("Tab        switch Lookup / Graph"),
        Line::from("i or /     edit the input line"),
        Line::from("Enter      submit input (Editing)"),
        Line::from("Enter      look up selected node (Graph)"),
        Line::from("j / k      select graph node"),
        Line::from("Esc        leave editing / close help"),
    ];
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, size: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn short_hash(value: &str, len: usize) -> String {
    if value.len() <= len {
        return value.to_string();
    }
    format!("{}…", &value[..len])
}

fn short_addr(value: &str) -> String {
    if value.len() <= 10 {
        return value.to_string();
    }
    format!("{}..{}", &value[..6], &value[value.len() - 4..])
}
