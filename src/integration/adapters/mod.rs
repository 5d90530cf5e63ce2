//! Adapter implementations for issue synchronization ports.

pub mod file;
pub mod memory;
