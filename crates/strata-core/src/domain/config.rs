//! Scaffold configuration: the immutable record every stage reads.
//!
//! The original tool threaded its options through global shell state; here
//! configuration is a single validated value constructed once at startup and
//! passed explicitly to every stage. Nothing mutates it after
//! [`ScaffoldConfigBuilder::build`] returns.
//!
//! ## Validation policy
//!
//! | Input                       | Outcome                                   |
//! |-----------------------------|-------------------------------------------|
//! | missing / empty name        | fatal `MissingRequiredOption`             |
//! | unsafe name (separators, …) | fatal `InvalidSolutionName`               |
//! | unknown database provider   | fatal `InvalidEnumValue`                  |
//! | unrecognized framework      | **non-fatal** [`ValidationWarning`]       |
//!
//! The framework asymmetry is deliberate forward-compatibility: a runtime
//! version this build has never heard of is passed through to `dotnet`
//! verbatim, which may well understand it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Closed set of supported database providers.
///
/// Selecting a provider picks exactly one data-access package (see
/// `domain::packages`) and one connection-string shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbProvider {
    SqlServer,
    Postgres,
    Sqlite,
}

impl DbProvider {
    pub const ALLOWED: &'static [&'static str] = &["sqlserver", "postgres", "sqlite"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Provider-shaped connection-string literal for the generated
    /// `appsettings.json`. The database name is derived from the solution
    /// name.
    pub fn connection_string(&self, solution_name: &str) -> String {
        match self {
            Self::SqlServer => format!(
                "Server=(localdb)\\\\MSSQLLocalDB;Database={solution_name};Trusted_Connection=True;MultipleActiveResultSets=true"
            ),
            Self::Postgres => format!(
                "Host=localhost;Port=5432;Database={solution_name};Username=postgres;Password=postgres"
            ),
            Self::Sqlite => format!("Data Source={solution_name}.db"),
        }
    }
}

impl FromStr for DbProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(DomainError::InvalidEnumValue {
                option: "db-provider",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl fmt::Display for DbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which package-version line the runtime version selects.
///
/// Version-sensitive packages (EF Core and friends) ship one line per .NET
/// major. The matrix collapses that to two bands: the newest supported major
/// gets the current line, every older or unrecognized version shares the
/// previous stable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageBand {
    /// net9.0 — current package line.
    Current,
    /// net6.0 through net8.0, plus anything unrecognized.
    Stable,
}

/// Target framework moniker, e.g. `net8.0`.
///
/// Recognized monikers are `netN.0` for N in 6..=9. Anything else is kept
/// verbatim (it is still forwarded to `dotnet new --framework`) and surfaces
/// as a warning rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkVersion {
    raw: String,
    major: Option<u8>,
}

impl FrameworkVersion {
    const MIN_MAJOR: u8 = 6;
    const MAX_MAJOR: u8 = 9;

    /// Newest supported LTS; the default when `--framework` is omitted.
    pub fn default_lts() -> Self {
        Self {
            raw: "net8.0".into(),
            major: Some(8),
        }
    }

    /// Parse a moniker, returning a warning (not an error) when the shape or
    /// range is unrecognized.
    pub fn parse(raw: &str) -> (Self, Option<ValidationWarning>) {
        let major = raw
            .strip_prefix("net")
            .and_then(|rest| rest.strip_suffix(".0"))
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (Self::MIN_MAJOR..=Self::MAX_MAJOR).contains(n));

        let warning = if major.is_none() {
            Some(ValidationWarning::UnrecognizedFramework {
                value: raw.to_string(),
            })
        } else {
            None
        };

        (
            Self {
                raw: raw.to_string(),
                major,
            },
            warning,
        )
    }

    /// The moniker exactly as the user supplied it.
    pub fn moniker(&self) -> &str {
        &self.raw
    }

    pub fn is_recognized(&self) -> bool {
        self.major.is_some()
    }

    /// Version band for version-sensitive packages. Only the newest supported
    /// major selects [`PackageBand::Current`].
    pub fn band(&self) -> PackageBand {
        match self.major {
            Some(n) if n == Self::MAX_MAJOR => PackageBand::Current,
            _ => PackageBand::Stable,
        }
    }
}

impl Default for FrameworkVersion {
    fn default() -> Self {
        Self::default_lts()
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A non-fatal validation finding. The pipeline proceeds; the CLI prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    UnrecognizedFramework { value: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFramework { value } => write!(
                f,
                "framework '{value}' is not a recognized moniker (expected net6.0..net9.0); \
                 passing it through to the project tool as-is"
            ),
        }
    }
}

/// The immutable option record driving the whole pipeline.
///
/// Constructed via [`ScaffoldConfig::builder`]; all fields are read-only
/// accessors thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldConfig {
    name: String,
    enable_cqrs: bool,
    framework: FrameworkVersion,
    db_provider: DbProvider,
    include_tests: bool,
}

impl ScaffoldConfig {
    pub fn builder() -> ScaffoldConfigBuilder {
        ScaffoldConfigBuilder::default()
    }

    /// Solution name; propagated into every generated identifier and path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enable_cqrs(&self) -> bool {
        self.enable_cqrs
    }

    pub fn framework(&self) -> &FrameworkVersion {
        &self.framework
    }

    pub fn db_provider(&self) -> DbProvider {
        self.db_provider
    }

    pub fn include_tests(&self) -> bool {
        self.include_tests
    }

    /// The connection-string literal rendered into `appsettings.json`.
    pub fn connection_string(&self) -> String {
        self.db_provider.connection_string(&self.name)
    }
}

/// Builder validating the option set into a [`ScaffoldConfig`].
///
/// `build()` returns the config together with any non-fatal warnings so the
/// caller can surface them; fatal problems are `DomainError`s.
#[derive(Debug, Default)]
pub struct ScaffoldConfigBuilder {
    name: Option<String>,
    enable_cqrs: bool,
    framework: Option<String>,
    db_provider: Option<String>,
    include_tests: bool,
}

impl ScaffoldConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn enable_cqrs(mut self, enabled: bool) -> Self {
        self.enable_cqrs = enabled;
        self
    }

    /// Raw framework moniker; parsed (and possibly warned about) at build.
    pub fn framework(mut self, raw: impl Into<String>) -> Self {
        self.framework = Some(raw.into());
        self
    }

    /// Raw provider string; must be in the closed set at build.
    pub fn db_provider(mut self, raw: impl Into<String>) -> Self {
        self.db_provider = Some(raw.into());
        self
    }

    pub fn include_tests(mut self, enabled: bool) -> Self {
        self.include_tests = enabled;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<(ScaffoldConfig, Vec<ValidationWarning>), DomainError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(DomainError::MissingRequiredOption { option: "name" }),
        };
        validate_name(&name)?;

        let db_provider = match self.db_provider {
            Some(raw) => raw.parse::<DbProvider>()?,
            None => DbProvider::SqlServer,
        };

        let mut warnings = Vec::new();
        let framework = match self.framework {
            Some(raw) => {
                let (fw, warning) = FrameworkVersion::parse(&raw);
                warnings.extend(warning);
                fw
            }
            None => FrameworkVersion::default_lts(),
        };

        Ok((
            ScaffoldConfig {
                name,
                enable_cqrs: self.enable_cqrs,
                framework,
                db_provider,
                include_tests: self.include_tests,
            },
            warnings,
        ))
    }
}

/// The name ends up in directory names, project files, and C# namespaces, so
/// it has to be filesystem-safe on every platform.
fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.starts_with('.') {
        return Err(DomainError::InvalidSolutionName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DomainError::InvalidSolutionName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(DomainError::InvalidSolutionName {
            name: name.into(),
            reason: format!("character '{bad}' is not allowed"),
        });
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(name: &str) -> Result<(ScaffoldConfig, Vec<ValidationWarning>), DomainError> {
        ScaffoldConfig::builder().name(name).build()
    }

    // ── name validation ───────────────────────────────────────────────────

    #[test]
    fn missing_name_is_fatal() {
        assert!(matches!(
            ScaffoldConfig::builder().build(),
            Err(DomainError::MissingRequiredOption { option: "name" })
        ));
    }

    #[test]
    fn empty_name_is_fatal() {
        assert!(matches!(
            minimal("  "),
            Err(DomainError::MissingRequiredOption { .. })
        ));
    }

    #[test]
    fn path_separator_in_name_is_fatal() {
        assert!(matches!(
            minimal("a/b"),
            Err(DomainError::InvalidSolutionName { .. })
        ));
        assert!(minimal("a\\b").is_err());
    }

    #[test]
    fn dotfile_name_is_fatal() {
        assert!(minimal(".hidden").is_err());
    }

    #[test]
    fn valid_names_pass() {
        for name in &["Shop", "OrderService", "my-api", "my_app", "app123"] {
            assert!(minimal(name).is_ok(), "failed for: {name}");
        }
    }

    // ── db provider ───────────────────────────────────────────────────────

    #[test]
    fn provider_parses_closed_set() {
        assert_eq!("sqlserver".parse::<DbProvider>().unwrap(), DbProvider::SqlServer);
        assert_eq!("postgres".parse::<DbProvider>().unwrap(), DbProvider::Postgres);
        assert_eq!("PostgreSQL".parse::<DbProvider>().unwrap(), DbProvider::Postgres);
        assert_eq!("sqlite".parse::<DbProvider>().unwrap(), DbProvider::Sqlite);
    }

    #[test]
    fn unknown_provider_is_fatal() {
        let err = "mongodb".parse::<DbProvider>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidEnumValue { option: "db-provider", .. }));
    }

    #[test]
    fn provider_defaults_to_sqlserver() {
        let (cfg, _) = minimal("Shop").unwrap();
        assert_eq!(cfg.db_provider(), DbProvider::SqlServer);
    }

    #[test]
    fn connection_strings_are_provider_shaped() {
        assert!(DbProvider::SqlServer.connection_string("Shop").starts_with("Server="));
        assert!(DbProvider::Postgres.connection_string("Shop").starts_with("Host="));
        assert!(DbProvider::Sqlite.connection_string("Shop").starts_with("Data Source="));
    }

    // ── framework versions ────────────────────────────────────────────────

    #[test]
    fn framework_defaults_to_lts() {
        let (cfg, warnings) = minimal("Shop").unwrap();
        assert_eq!(cfg.framework().moniker(), "net8.0");
        assert!(warnings.is_empty());
    }

    #[test]
    fn recognized_framework_has_no_warning() {
        for raw in &["net6.0", "net7.0", "net8.0", "net9.0"] {
            let (fw, warning) = FrameworkVersion::parse(raw);
            assert!(fw.is_recognized(), "should recognize {raw}");
            assert!(warning.is_none());
        }
    }

    #[test]
    fn unrecognized_framework_warns_but_proceeds() {
        let (cfg, warnings) = ScaffoldConfig::builder()
            .name("Shop")
            .framework("net12.0")
            .build()
            .unwrap();
        assert_eq!(cfg.framework().moniker(), "net12.0");
        assert!(!cfg.framework().is_recognized());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn only_newest_major_selects_current_band() {
        assert_eq!(FrameworkVersion::parse("net9.0").0.band(), PackageBand::Current);
        assert_eq!(FrameworkVersion::parse("net8.0").0.band(), PackageBand::Stable);
        assert_eq!(FrameworkVersion::parse("net6.0").0.band(), PackageBand::Stable);
        // Unrecognized versions share the stable band.
        assert_eq!(FrameworkVersion::parse("banana").0.band(), PackageBand::Stable);
    }

    // ── immutability surface ──────────────────────────────────────────────

    #[test]
    fn config_carries_all_options() {
        let (cfg, _) = ScaffoldConfig::builder()
            .name("Shop")
            .enable_cqrs(true)
            .framework("net9.0")
            .db_provider("postgres")
            .include_tests(true)
            .build()
            .unwrap();

        assert_eq!(cfg.name(), "Shop");
        assert!(cfg.enable_cqrs());
        assert_eq!(cfg.framework().moniker(), "net9.0");
        assert_eq!(cfg.db_provider(), DbProvider::Postgres);
        assert!(cfg.include_tests());
        assert!(cfg.connection_string().contains("Database=Shop"));
    }
}
