use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

use enscope::app::{App, InputMode, Mode};
use enscope::config;
use enscope::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use enscope::ui;

#[derive(Debug, Parser)]
#[command(
    name = "enscope",
    version,
    about = "enscope: an ENS lookup TUI over public RPC and explorer APIs"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (e.g. https://cloudflare-eth.com)
    #[arg(long)]
    rpc: Option<String>,

    /// Block-explorer API base URL
    #[arg(long)]
    explorer: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load();
    if let Some(rpc) = args.rpc.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        config.rpc = Some(rpc.to_string());
    }
    if let Some(explorer) = args
        .explorer
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        config.explorer = Some(explorer.to_string());
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runtime = RuntimeBridge::new(config)?;
    let app = App::new();

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::Connected { endpoint, chain_id } => {
                app.apply_connected(endpoint, chain_id)
            }
            RuntimeEvent::Lookup(update) => app.apply_update(update),
            RuntimeEvent::Error { message } => app.apply_error(message),
        }
    }

    if let Some(input) = app.take_lookup_request() {
        let _ = runtime.send(RuntimeCommand::Lookup { input });
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::Char('i') | KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Enter => {
            if app.mode == Mode::Graph {
                app.lookup_selected_node();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.mode == Mode::Graph {
                app.select_next_node();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.mode == Mode::Graph {
                app.select_prev_node();
            }
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.submit_input();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.active_input_mut().pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.active_input_mut().push(ch);
        }
        _ => {}
    }
}
