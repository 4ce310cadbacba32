//! Application state consumed by the presentation layer

use std::time::{Duration, Instant};

use crate::domain::graph::{self, Graph};
use crate::lookup::{LogEntry, LookupUpdate, Profile, Transaction};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lookup,
    Graph,
}

impl Mode {
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Lookup => "Lookup",
            Mode::Graph => "Graph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub input_mode: InputMode,
    /// Name-or-address input for the lookup screen
    pub lookup_input: String,
    /// Tuple-list input for the graph screen
    pub graph_input: String,
    /// Session log, newest first; survives across lookups
    pub log: Vec<LogEntry>,
    pub profile: Profile,
    pub transactions: Vec<Transaction>,
    pub graph: Graph,
    pub selected_node: usize,
    pub lookup_in_progress: bool,
    pub rpc_endpoint: String,
    pub chain_id: Option<u64>,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_lookup: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::Lookup,
            input_mode: InputMode::Normal,
            lookup_input: String::new(),
            graph_input: String::new(),
            log: Vec::new(),
            profile: Profile::default(),
            transactions: Vec::new(),
            graph: Graph::default(),
            selected_node: 0,
            lookup_in_progress: false,
            rpc_endpoint: String::new(),
            chain_id: None,
            status: None,
            help_open: false,
            should_quit: false,
            pending_lookup: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    /// Queue a lookup; a fresh lookup discards the previous profile and
    /// transaction list wholesale. Nothing stops a second lookup from
    /// being queued while one is in flight; the later one wins.
    pub fn request_lookup(&mut self, input: impl Into<String>) {
        let input = input.into();
        if input.is_empty() {
            return;
        }
        self.profile = Profile::default();
        self.transactions.clear();
        self.lookup_in_progress = true;
        self.pending_lookup = Some(input);
    }

    pub fn take_lookup_request(&mut self) -> Option<String> {
        self.pending_lookup.take()
    }

    /// Submit the active input line for the current screen
    pub fn submit_input(&mut self) {
        match self.mode {
            Mode::Lookup => {
                let input = self.lookup_input.trim().to_string();
                if input.is_empty() {
                    self.set_status("Enter a name or address first", StatusLevel::Warn);
                    return;
                }
                self.request_lookup(input);
            }
            Mode::Graph => {
                self.graph = graph::parse(&self.graph_input);
                self.selected_node = 0;
                self.set_status(
                    format!(
                        "Parsed {} nodes, {} edges",
                        self.graph.nodes.len(),
                        self.graph.edges.len()
                    ),
                    StatusLevel::Info,
                );
            }
        }
    }

    pub fn active_input(&self) -> &str {
        match self.mode {
            Mode::Lookup => &self.lookup_input,
            Mode::Graph => &self.graph_input,
        }
    }

    pub fn active_input_mut(&mut self) -> &mut String {
        match self.mode {
            Mode::Lookup => &mut self.lookup_input,
            Mode::Graph => &mut self.graph_input,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Lookup => Mode::Graph,
            Mode::Graph => Mode::Lookup,
        };
    }

    pub fn select_next_node(&mut self) {
        if self.selected_node + 1 < self.graph.nodes.len() {
            self.selected_node += 1;
        }
    }

    pub fn select_prev_node(&mut self) {
        self.selected_node = self.selected_node.saturating_sub(1);
    }

    /// Re-run the lookup for the selected graph node
    pub fn lookup_selected_node(&mut self) {
        let Some(node) = self.graph.nodes.get(self.selected_node) else {
            self.set_status("No graph node selected", StatusLevel::Warn);
            return;
        };
        let id = node.id.clone();
        self.set_status(format!("Looking up {id}"), StatusLevel::Info);
        self.request_lookup(id);
    }

    /// Apply one incremental lookup update from the worker
    pub fn apply_update(&mut self, update: LookupUpdate) {
        match update {
            LookupUpdate::Log(entry) => self.log.insert(0, entry),
            LookupUpdate::Profile(profile) => self.profile = profile,
            LookupUpdate::ProfileCleared => self.profile = Profile::default(),
            LookupUpdate::Transactions(transactions) => self.transactions = transactions,
            LookupUpdate::Finished => self.lookup_in_progress = false,
        }
    }

    pub fn apply_connected(&mut self, endpoint: String, chain_id: u64) {
        self.rpc_endpoint = endpoint;
        self.chain_id = Some(chain_id);
        self.set_status(format!("Connected (chain {chain_id})"), StatusLevel::Info);
    }

    pub fn apply_error(&mut self, message: String) {
        self.set_status(message, StatusLevel::Error);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
