//! Package matrix: the table-driven mapping from (component kind, feature
//! flags, version band, database provider) to concrete NuGet dependencies.
//!
//! # Design Rationale
//!
//! The original tool scattered `dotnet add package` calls with inline version
//! strings across its stages. This module replaces that with a single static
//! matrix: each package choice is described exactly once, and resolution is a
//! pure table walk. Adding a package means adding one entry here — no other
//! file changes.
//!
//! # Ordering contract
//!
//! Requirements come out ordered by component creation order and, within a
//! component, by declaration order: validation/mapping packages first, then
//! data-access, then messaging. The orchestrator installs them strictly in
//! that sequence.

use crate::domain::component::{ComponentGraph, ComponentId, ComponentKind};
use crate::domain::config::{DbProvider, PackageBand, ScaffoldConfig};
use crate::domain::error::DomainError;

// ── Version lines ────────────────────────────────────────────────────────────

/// Version-sensitive packages ship one line per .NET major; only the newest
/// supported major gets the current line (see `FrameworkVersion::band`).
const EF_CORE_CURRENT: &str = "9.0.0";
const EF_CORE_STABLE: &str = "8.0.11";
const MVC_TESTING_CURRENT: &str = "9.0.0";
const MVC_TESTING_STABLE: &str = "8.0.11";

// Version-insensitive packages: one fixed line across all bands.
const FLUENT_VALIDATION: &str = "11.9.2";
const AUTOMAPPER: &str = "13.0.1";
const MEDIATR: &str = "12.4.1";
const MOQ: &str = "4.20.72";
const FLUENT_ASSERTIONS: &str = "6.12.2";

/// One resolved dependency for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    pub component: ComponentId,
    pub package: &'static str,
    pub version: String,
}

impl PackageRequirement {
    fn new(component: &ComponentId, package: &'static str, version: &str) -> Self {
        Self {
            component: component.clone(),
            package,
            version: version.to_string(),
        }
    }
}

/// The data-access package selected by a provider. Exactly one per provider,
/// mutually exclusive by construction.
fn data_access_package(provider: DbProvider) -> &'static str {
    match provider {
        DbProvider::SqlServer => "Microsoft.EntityFrameworkCore.SqlServer",
        DbProvider::Postgres => "Npgsql.EntityFrameworkCore.PostgreSQL",
        DbProvider::Sqlite => "Microsoft.EntityFrameworkCore.Sqlite",
    }
}

fn ef_core_version(band: PackageBand) -> &'static str {
    match band {
        PackageBand::Current => EF_CORE_CURRENT,
        PackageBand::Stable => EF_CORE_STABLE,
    }
}

fn mvc_testing_version(band: PackageBand) -> &'static str {
    match band {
        PackageBand::Current => MVC_TESTING_CURRENT,
        PackageBand::Stable => MVC_TESTING_STABLE,
    }
}

/// Resolve the full ordered requirement list for a graph.
///
/// Total over the closed cross-product of provider × band × cqrs × tests; the
/// [`DomainError::PackageMatrixGap`] arm exists for the (statically
/// unreachable) case of a component kind the matrix does not know.
pub fn resolve(
    graph: &ComponentGraph,
    config: &ScaffoldConfig,
) -> Result<Vec<PackageRequirement>, DomainError> {
    let band = config.framework().band();
    let mut requirements = Vec::new();

    for component in graph.components() {
        match component.kind {
            // Domain stays dependency-free; that is the point of the layer.
            ComponentKind::Domain => {}

            ComponentKind::Application => {
                // Declaration order: validation/mapping, then messaging.
                requirements.push(PackageRequirement::new(
                    &component.id,
                    "FluentValidation",
                    FLUENT_VALIDATION,
                ));
                requirements.push(PackageRequirement::new(
                    &component.id,
                    "AutoMapper",
                    AUTOMAPPER,
                ));
                if config.enable_cqrs() {
                    requirements.push(PackageRequirement::new(&component.id, "MediatR", MEDIATR));
                }
            }

            ComponentKind::Infrastructure => {
                requirements.push(PackageRequirement::new(
                    &component.id,
                    "Microsoft.EntityFrameworkCore",
                    ef_core_version(band),
                ));
                requirements.push(PackageRequirement::new(
                    &component.id,
                    data_access_package(config.db_provider()),
                    ef_core_version(band),
                ));
            }

            // The web host gets its framework from the SDK; no extra packages.
            ComponentKind::Presentation => {}

            ComponentKind::Test => {
                requirements.push(PackageRequirement::new(&component.id, "Moq", MOQ));
                requirements.push(PackageRequirement::new(
                    &component.id,
                    "FluentAssertions",
                    FLUENT_ASSERTIONS,
                ));
                // The presentation test project additionally hosts the app
                // in-process and swaps the database for an in-memory one.
                if component.id.as_str().ends_with(".WebApi.Tests") {
                    requirements.push(PackageRequirement::new(
                        &component.id,
                        "Microsoft.AspNetCore.Mvc.Testing",
                        mvc_testing_version(band),
                    ));
                    requirements.push(PackageRequirement::new(
                        &component.id,
                        "Microsoft.EntityFrameworkCore.InMemory",
                        ef_core_version(band),
                    ));
                }
            }
        }
    }

    if requirements.is_empty() {
        // A graph always contains Application + Infrastructure, so an empty
        // result means the matrix walk above is broken.
        return Err(DomainError::PackageMatrixGap {
            component: "(all)".into(),
            detail: "resolution produced no requirements".into(),
        });
    }

    Ok(requirements)
}

// ── tests ─────────────────────────────────────────────────────────────────────
