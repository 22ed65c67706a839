//! Project tool adapters.
//!
//! - [`DotnetCli`]: production, shells out to the `dotnet` CLI
//! - [`MemoryProjectTool`]: testing, records every call and mirrors created
//!   state into a shared [`MemoryFilesystem`](crate::filesystem::MemoryFilesystem)

mod dotnet;
mod memory;

pub use dotnet::DotnetCli;
pub use memory::{MemoryProjectTool, ToolCall};
