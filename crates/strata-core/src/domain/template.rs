//! Starter-file templates and their renderer.
//!
//! A template is parsed **once** into a small abstract syntax of literal
//! segments, placeholder references, and conditional regions, then rendered
//! in a single pass. This replaces the whole-text repeated-substitution
//! approach of the original tool: because substitution happens on parsed
//! placeholder nodes only, a substituted value is never rescanned, which
//! closes the placeholder-collision gap the old approach carried. (User input
//! cannot smuggle a placeholder in anyway — solution-name validation rejects
//! braces — but the renderer no longer relies on that.)
//!
//! ## Syntax
//!
//! - Placeholders: `{{PROJECT_NAME}}`, `{{FRAMEWORK}}`, `{{DB_PROVIDER}}`,
//!   `{{CONNECTION_STRING}}`. An unknown `{{TOKEN}}` is left verbatim in the
//!   output — deliberate tolerance, not an error.
//! - Conditional regions: `{{#if cqrs}}` / `{{#if tests}}` and `{{/if}}`,
//!   each alone on its own line. A disabled region collapses to a single
//!   blank line. No nesting, no else-branch; regions resolve independently.
//!
//! Rendering is a pure function of `(Template, ScaffoldConfig)`: no side
//! effects, and byte-identical output for identical inputs.

use std::path::PathBuf;

use crate::domain::config::ScaffoldConfig;
use crate::domain::error::DomainError;

// ── Placeholders and flags ───────────────────────────────────────────────────

/// The closed set of substitutable tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    ProjectName,
    Framework,
    DbProvider,
    ConnectionString,
}

impl Placeholder {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "PROJECT_NAME" => Some(Self::ProjectName),
            "FRAMEWORK" => Some(Self::Framework),
            "DB_PROVIDER" => Some(Self::DbProvider),
            "CONNECTION_STRING" => Some(Self::ConnectionString),
            _ => None,
        }
    }

    fn resolve(&self, config: &ScaffoldConfig) -> String {
        match self {
            Self::ProjectName => config.name().to_string(),
            Self::Framework => config.framework().moniker().to_string(),
            Self::DbProvider => config.db_provider().as_str().to_string(),
            Self::ConnectionString => config.connection_string(),
        }
    }
}

/// Feature flags a conditional region may be gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFlag {
    Cqrs,
    Tests,
}

impl FeatureFlag {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "cqrs" => Some(Self::Cqrs),
            "tests" => Some(Self::Tests),
            _ => None,
        }
    }

    fn enabled(&self, config: &ScaffoldConfig) -> bool {
        match self {
            Self::Cqrs => config.enable_cqrs(),
            Self::Tests => config.include_tests(),
        }
    }
}

// ── AST ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
    Conditional {
        flag: FeatureFlag,
        body: Vec<Segment>,
    },
}

/// A parsed template, ready for repeated pure rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text into segments.
    ///
    /// # Errors
    ///
    /// `MalformedTemplate` on an unterminated region, a stray `{{/if}}`, or a
    /// nested region. An `{{#if <unknown-flag>}}` marker is **not** an error;
    /// it is kept as literal text, consistent with the unknown-placeholder
    /// policy.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, DomainError> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut open_region: Option<(FeatureFlag, Vec<Segment>)> = None;

        for line in split_lines(text) {
            let trimmed = line.trim();

            if let Some(flag_token) = trimmed
                .strip_prefix("{{#if ")
                .and_then(|rest| rest.strip_suffix("}}"))
                .filter(|_| trimmed.starts_with("{{#if "))
            {
                match FeatureFlag::from_token(flag_token.trim()) {
                    Some(flag) if open_region.is_some() => {
                        let _ = flag;
                        return Err(DomainError::MalformedTemplate {
                            template: name,
                            reason: "nested conditional regions are not supported".into(),
                        });
                    }
                    Some(flag) => {
                        open_region = Some((flag, Vec::new()));
                        continue;
                    }
                    // Unknown flag: fall through and keep the marker literal.
                    None => {}
                }
            } else if trimmed == "{{/if}}" {
                match open_region.take() {
                    Some((flag, body)) => {
                        segments.push(Segment::Conditional { flag, body });
                        continue;
                    }
                    None => {
                        return Err(DomainError::MalformedTemplate {
                            template: name,
                            reason: "'{{/if}}' without an open region".into(),
                        });
                    }
                }
            }

            let sink = match open_region.as_mut() {
                Some((_, body)) => body,
                None => &mut segments,
            };
            parse_inline(line, sink);
        }

        if open_region.is_some() {
            return Err(DomainError::MalformedTemplate {
                template: name,
                reason: "unterminated conditional region".into(),
            });
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render in one pass over the parsed segments.
    ///
    /// Disabled conditional regions leave exactly one blank line; no other
    /// whitespace normalization is performed.
    pub fn render(&self, config: &ScaffoldConfig) -> String {
        let mut out = String::new();
        render_segments(&self.segments, config, &mut out);
        out
    }
}

fn render_segments(segments: &[Segment], config: &ScaffoldConfig, out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(p) => out.push_str(&p.resolve(config)),
            Segment::Conditional { flag, body } => {
                if flag.enabled(config) {
                    render_segments(body, config, out);
                } else {
                    out.push('\n');
                }
            }
        }
    }
}

/// Split text into lines, keeping terminators so rendering is lossless.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Parse one line into literal and placeholder segments.
///
/// `{{TOKEN}}` becomes a placeholder segment when the token is known;
/// everything else — unknown tokens, inline `{{#if`/`{{/if}}`, unbalanced
/// braces — stays literal.
fn parse_inline(line: &str, sink: &mut Vec<Segment>) {
    let mut rest = line;
    let mut literal = String::new();

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        match after_open.find("}}") {
            Some(close) => {
                let token = &after_open[..close];
                match Placeholder::from_token(token) {
                    Some(placeholder) => {
                        literal.push_str(&rest[..open]);
                        if !literal.is_empty() {
                            sink.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        sink.push(Segment::Placeholder(placeholder));
                    }
                    None => {
                        // Keep the unknown token verbatim, braces included.
                        literal.push_str(&rest[..open + 2 + close + 2]);
                    }
                }
                rest = &after_open[close + 2..];
            }
            None => break,
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        sink.push(Segment::Literal(literal));
    }
}

// ── Starter files ────────────────────────────────────────────────────────────

/// A templated starter file: both its path and its content are templates.
///
/// The path template lets a single definition target
/// `src/Core/{{PROJECT_NAME}}.Domain/...` for any solution name.
#[derive(Debug, Clone)]
pub struct StarterFile {
    path: Template,
    content: Template,
    replaces_existing: bool,
}

impl StarterFile {
    pub fn new(name: &str, path_text: &str, content_text: &str) -> Result<Self, DomainError> {
        Ok(Self {
            path: Template::parse(format!("{name} (path)"), path_text)?,
            content: Template::parse(name, content_text)?,
            replaces_existing: false,
        })
    }

    /// A starter file that intentionally replaces a file the project
    /// template itself generates (e.g. the default `appsettings.json`).
    pub fn replacing(name: &str, path_text: &str, content_text: &str) -> Result<Self, DomainError> {
        Ok(Self {
            replaces_existing: true,
            ..Self::new(name, path_text, content_text)?
        })
    }

    pub fn replaces_existing(&self) -> bool {
        self.replaces_existing
    }

    /// Solution-relative target path for a given configuration.
    pub fn rendered_path(&self, config: &ScaffoldConfig) -> PathBuf {
        PathBuf::from(self.path.render(config))
    }

    pub fn rendered_content(&self, config: &ScaffoldConfig) -> String {
        self.content.render(config)
    }

    pub fn name(&self) -> &str {
        self.content.name()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cqrs: bool, tests: bool) -> ScaffoldConfig {
        ScaffoldConfig::builder()
            .name("Shop")
            .db_provider("postgres")
            .enable_cqrs(cqrs)
            .include_tests(tests)
            .build()
            .unwrap()
            .0
    }

    // ── placeholders ──────────────────────────────────────────────────────

    #[test]
    fn known_placeholders_are_totally_replaced() {
        let t = Template::parse(
            "t",
            "name={{PROJECT_NAME}} fw={{FRAMEWORK}} db={{DB_PROVIDER}}\ncs={{CONNECTION_STRING}}\n",
        )
        .unwrap();
        let out = t.render(&config(false, false));

        assert!(out.contains("name=Shop"));
        assert!(out.contains("fw=net8.0"));
        assert!(out.contains("db=postgres"));
        assert!(out.contains("cs=Host=localhost"));
        // Total replacement: no reserved token survives.
        for token in ["{{PROJECT_NAME}}", "{{FRAMEWORK}}", "{{DB_PROVIDER}}", "{{CONNECTION_STRING}}"] {
            assert!(!out.contains(token), "{token} leaked into output");
        }
    }

    #[test]
    fn placeholder_substitutes_inside_path_like_strings() {
        let t = Template::parse("t", "src/Core/{{PROJECT_NAME}}.Domain/{{PROJECT_NAME}}.csproj").unwrap();
        assert_eq!(
            t.render(&config(false, false)),
            "src/Core/Shop.Domain/Shop.csproj"
        );
    }

    #[test]
    fn adjacent_placeholders_both_replace() {
        let t = Template::parse("t", "{{PROJECT_NAME}}{{PROJECT_NAME}}").unwrap();
        assert_eq!(t.render(&config(false, false)), "ShopShop");
    }

    #[test]
    fn unknown_placeholder_is_left_verbatim() {
        let t = Template::parse("t", "hello {{WHO_KNOWS}} world").unwrap();
        assert_eq!(t.render(&config(false, false)), "hello {{WHO_KNOWS}} world");
    }

    #[test]
    fn unbalanced_braces_stay_literal() {
        let t = Template::parse("t", "open {{PROJECT but never closed").unwrap();
        assert_eq!(t.render(&config(false, false)), "open {{PROJECT but never closed");
    }

    #[test]
    fn rendering_is_idempotent() {
        let t = Template::parse("t", "{{PROJECT_NAME}} on {{FRAMEWORK}}\n{{#if cqrs}}\nCQRS!\n{{/if}}\nend\n").unwrap();
        let cfg = config(true, false);
        assert_eq!(t.render(&cfg), t.render(&cfg));
    }

    // ── conditional regions ───────────────────────────────────────────────

    #[test]
    fn enabled_region_emits_body_verbatim() {
        let t = Template::parse("t", "a\n{{#if cqrs}}\nbody line\n{{/if}}\nz\n").unwrap();
        assert_eq!(t.render(&config(true, false)), "a\nbody line\nz\n");
    }

    #[test]
    fn disabled_region_collapses_to_one_blank_line() {
        let t = Template::parse("t", "a\n{{#if cqrs}}\nbody line\n{{/if}}\nz\n").unwrap();
        assert_eq!(t.render(&config(false, false)), "a\n\nz\n");
    }

    #[test]
    fn conditional_region_law() {
        // Output with F=false equals output with F=true minus exactly the
        // region body, modulo the blank-line residue.
        let t = Template::parse("t", "head\n{{#if tests}}\nrun the tests\n{{/if}}\ntail\n").unwrap();
        let on = t.render(&config(false, true));
        let off = t.render(&config(false, false));
        assert_eq!(on.replace("run the tests\n", ""), off);
    }

    #[test]
    fn regions_resolve_independently() {
        let t = Template::parse(
            "t",
            "{{#if cqrs}}\nC\n{{/if}}\n{{#if tests}}\nT\n{{/if}}\n",
        )
        .unwrap();
        assert_eq!(t.render(&config(true, false)), "C\n\n");
        assert_eq!(t.render(&config(false, true)), "\nT\n");
        assert_eq!(t.render(&config(true, true)), "C\nT\n");
    }

    #[test]
    fn placeholders_render_inside_regions() {
        let t = Template::parse("t", "{{#if cqrs}}\nuse {{PROJECT_NAME}}.Application;\n{{/if}}\n").unwrap();
        assert_eq!(t.render(&config(true, false)), "use Shop.Application;\n");
    }

    #[test]
    fn unknown_region_flag_is_kept_literal() {
        let t = Template::parse("t", "{{#if metrics}}\nx\n{{/if}}\n");
        // '{{/if}}' now has no open region, so this is malformed...
        assert!(t.is_err());

        // ...but an unknown marker without a closer is plain literal text.
        let t = Template::parse("t", "see {{#if metrics}} for details").unwrap();
        assert_eq!(
            t.render(&config(false, false)),
            "see {{#if metrics}} for details"
        );
    }

    #[test]
    fn unterminated_region_is_malformed() {
        assert!(matches!(
            Template::parse("t", "{{#if cqrs}}\nno closer\n"),
            Err(DomainError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn stray_close_is_malformed() {
        assert!(Template::parse("t", "text\n{{/if}}\n").is_err());
    }

    #[test]
    fn nested_regions_are_malformed() {
        assert!(Template::parse(
            "t",
            "{{#if cqrs}}\n{{#if tests}}\nx\n{{/if}}\n{{/if}}\n"
        )
        .is_err());
    }

    // ── starter files ─────────────────────────────────────────────────────

    #[test]
    fn starter_file_renders_path_and_content() {
        let f = StarterFile::new(
            "entity",
            "src/Core/{{PROJECT_NAME}}.Domain/Entities/BaseEntity.cs",
            "namespace {{PROJECT_NAME}}.Domain.Entities;\n",
        )
        .unwrap();
        let cfg = config(false, false);

        assert_eq!(
            f.rendered_path(&cfg),
            PathBuf::from("src/Core/Shop.Domain/Entities/BaseEntity.cs")
        );
        assert_eq!(f.rendered_content(&cfg), "namespace Shop.Domain.Entities;\n");
    }
}
