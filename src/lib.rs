//! enscope - a terminal ENS lookup tool
//!
//! Library target so integration tests can exercise the lookup pipeline
//! and the graph parser directly; the binary in `main.rs` wires the same
//! modules to a ratatui front end.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod lookup;
pub mod ui;
