//! Ethereum infrastructure - ENS wire helpers and the Alloy provider

pub mod ens;
mod provider;

pub use provider::{create_provider, AlloyEnsProvider, EnsProvider};
