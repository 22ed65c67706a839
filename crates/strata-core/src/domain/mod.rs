// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Strata.
//!
//! Pure scaffolding logic with no I/O: configuration validation, the
//! component graph, the package matrix, and the template renderer. Everything
//! that touches the filesystem or the external project tool goes through
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or external-tool calls
//! - **Immutable entities**: Derived once, read-only thereafter
//! - **Deterministic**: Same configuration, same graph, same rendered text

pub mod component;
pub mod config;
pub mod error;
pub mod packages;
pub mod template;

// Re-exports for convenience
pub use component::{Component, ComponentGraph, ComponentId, ComponentKind, ProjectTemplate};
pub use config::{
    DbProvider, FrameworkVersion, PackageBand, ScaffoldConfig, ScaffoldConfigBuilder,
    ValidationWarning,
};
pub use error::{DomainError, ErrorCategory};
pub use packages::{PackageRequirement, resolve as resolve_packages};
pub use template::{FeatureFlag, Placeholder, Segment, StarterFile, Template};
