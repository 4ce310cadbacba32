//! Lookup pipeline - the orchestration core

mod orchestrator;
mod types;

pub use orchestrator::{is_address_like, normalize_avatar, run_lookup, LookupSink};
pub use types::{
    format_ether, LogEntry, LogLevel, LookupUpdate, Profile, Transaction,
};
