//! Strata Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Strata
//! solution scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │            Pipeline Driver              │
//! │      (Eight Ordered Stages + Build)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (ProjectTool, Filesystem, Prompter, …)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    strata-adapters (Infrastructure)     │
//! │  (DotnetCli, LocalFilesystem, fakes)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Config, ComponentGraph, Packages,      │
//! │  Templates - No External Dependencies)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::{
//!     application::PipelineDriver,
//!     domain::ScaffoldConfig,
//! };
//!
//! // 1. Validate configuration
//! let (config, warnings) = ScaffoldConfig::builder()
//!     .name("Shop")
//!     .db_provider("postgres")
//!     .include_tests(true)
//!     .build()
//!     .unwrap();
//!
//! // 2. Run the pipeline (with injected adapters)
//! let driver = PipelineDriver::new(tool, filesystem, prompter, reporter, starter_files);
//! let report = driver.run(&config, std::path::Path::new(".")).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PipelineDriver, PipelineReport, Stage, VerificationOutcome,
        ports::{Filesystem, Prompter, ProjectTool, StatusReporter},
    };
    pub use crate::domain::{
        Component, ComponentGraph, ComponentId, ComponentKind, DbProvider, FrameworkVersion,
        PackageRequirement, ProjectTemplate, ScaffoldConfig, ScaffoldConfigBuilder, StarterFile,
        Template, ValidationWarning,
    };
    pub use crate::error::{StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
