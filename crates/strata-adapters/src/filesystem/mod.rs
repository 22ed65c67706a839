//! Filesystem adapters.
//!
//! - [`LocalFilesystem`]: production, backed by `std::fs`
//! - [`MemoryFilesystem`]: testing, backed by in-memory maps

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
