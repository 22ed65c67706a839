//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `strata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the pipeline, implemented by infrastructure
//!   - `ProjectTool`: the external build/package tool
//!   - `Filesystem`: file operations
//!   - `Prompter`: the single interactive confirm point
//!   - `StatusReporter`: per-stage status lines
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by the pipeline driver)

pub mod output;

pub use output::{Filesystem, Prompter, ProjectTool, StatusReporter};
