//! Filesystem-backed adapters.

mod json_config_store;

pub use json_config_store::JsonConfigStore;
