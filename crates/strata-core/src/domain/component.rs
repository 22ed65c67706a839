//! Component graph: the buildable units of the generated solution and their
//! allowed-dependency edges.
//!
//! The graph is **derived**, never discovered: component set and edges are
//! fixed functions of [`ScaffoldConfig`], which makes the result a DAG by
//! construction — no cycle detection is needed or performed.
//!
//! ## Fixed dependency map
//!
//! | Component      | References                     |
//! |----------------|--------------------------------|
//! | Domain         | (none)                         |
//! | Application    | Domain                         |
//! | Infrastructure | Application, Domain            |
//! | Presentation   | Application, Infrastructure    |
//! | X.Tests        | the component it exercises     |
//!
//! Infrastructure deliberately has no dedicated test component; the original
//! layout covers it through Application tests. That asymmetry is intentional.

use std::path::PathBuf;

use crate::domain::config::ScaffoldConfig;

/// Which `dotnet new` template a component is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectTemplate {
    ClassLib,
    WebApi,
    XunitTests,
}

impl ProjectTemplate {
    /// The short template name understood by `dotnet new`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClassLib => "classlib",
            Self::WebApi => "webapi",
            Self::XunitTests => "xunit",
        }
    }
}

/// Layer a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Domain,
    Application,
    Infrastructure,
    Presentation,
    Test,
}

/// Identifier of a component, e.g. `Shop.Domain` or `Shop.WebApi.Tests`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentId(String);

impl ComponentId {
    fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of the dependency graph.
///
/// Derived once at graph-build time and read-only thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    /// Solution-relative directory of the project.
    pub path: PathBuf,
    pub template: ProjectTemplate,
    /// Components this one is allowed to (and will) reference.
    pub depends_on: Vec<ComponentId>,
    /// Extra directories created inside the project (e.g. CQRS sub-paths).
    pub sub_dirs: Vec<&'static str>,
}

impl Component {
    /// The `.csproj` file path for the project, solution-relative.
    pub fn project_file(&self) -> PathBuf {
        self.path.join(format!("{}.csproj", self.id))
    }
}

/// The full component graph, in creation order.
///
/// Non-test components always come first; iteration order is also the order
/// the orchestrator creates, registers, wires, and installs for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGraph {
    components: Vec<Component>,
}

impl ComponentGraph {
    /// Derive the graph from configuration.
    ///
    /// Exactly 4 non-test components, plus — when `include_tests` is set —
    /// exactly 3 test components (Domain, Application, Presentation).
    /// `enable_cqrs` adds sub-paths inside Application only; it never adds
    /// graph edges.
    pub fn derive(config: &ScaffoldConfig) -> Self {
        let name = config.name();

        let domain_id = ComponentId::new(format!("{name}.Domain"));
        let application_id = ComponentId::new(format!("{name}.Application"));
        let infrastructure_id = ComponentId::new(format!("{name}.Infrastructure"));
        let presentation_id = ComponentId::new(format!("{name}.WebApi"));

        let cqrs_dirs: Vec<&'static str> = if config.enable_cqrs() {
            vec!["Commands", "Queries", "Handlers"]
        } else {
            Vec::new()
        };

        let mut components = vec![
            Component {
                id: domain_id.clone(),
                kind: ComponentKind::Domain,
                path: PathBuf::from("src/Core").join(domain_id.as_str()),
                template: ProjectTemplate::ClassLib,
                depends_on: Vec::new(),
                sub_dirs: vec!["Entities"],
            },
            Component {
                id: application_id.clone(),
                kind: ComponentKind::Application,
                path: PathBuf::from("src/Core").join(application_id.as_str()),
                template: ProjectTemplate::ClassLib,
                depends_on: vec![domain_id.clone()],
                sub_dirs: cqrs_dirs,
            },
            Component {
                id: infrastructure_id.clone(),
                kind: ComponentKind::Infrastructure,
                path: PathBuf::from("src/Infrastructure").join(infrastructure_id.as_str()),
                template: ProjectTemplate::ClassLib,
                depends_on: vec![application_id.clone(), domain_id.clone()],
                sub_dirs: vec!["Persistence"],
            },
            Component {
                id: presentation_id.clone(),
                kind: ComponentKind::Presentation,
                path: PathBuf::from("src/Presentation").join(presentation_id.as_str()),
                template: ProjectTemplate::WebApi,
                depends_on: vec![application_id.clone(), infrastructure_id.clone()],
                sub_dirs: Vec::new(),
            },
        ];

        if config.include_tests() {
            for subject in [&domain_id, &application_id, &presentation_id] {
                let id = ComponentId::new(format!("{subject}.Tests"));
                components.push(Component {
                    path: PathBuf::from("tests").join(id.as_str()),
                    id,
                    kind: ComponentKind::Test,
                    template: ProjectTemplate::XunitTests,
                    depends_on: vec![subject.clone()],
                    sub_dirs: Vec::new(),
                });
            }
        }

        Self { components }
    }

    /// All components in creation order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn primaries(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| c.kind != ComponentKind::Test)
    }

    pub fn tests(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Test)
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ScaffoldConfig;

    fn config(cqrs: bool, tests: bool) -> ScaffoldConfig {
        ScaffoldConfig::builder()
            .name("Shop")
            .enable_cqrs(cqrs)
            .include_tests(tests)
            .build()
            .unwrap()
            .0
    }

    fn find<'a>(graph: &'a ComponentGraph, id: &str) -> &'a Component {
        graph
            .components()
            .iter()
            .find(|c| c.id.as_str() == id)
            .unwrap_or_else(|| panic!("missing component {id}"))
    }

    #[test]
    fn four_primaries_without_tests() {
        let graph = ComponentGraph::derive(&config(false, false));
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.tests().count(), 0);
    }

    #[test]
    fn three_test_components_when_enabled() {
        let graph = ComponentGraph::derive(&config(false, true));
        assert_eq!(graph.len(), 7);

        let test_ids: Vec<&str> = graph.tests().map(|c| c.id.as_str()).collect();
        assert_eq!(
            test_ids,
            vec!["Shop.Domain.Tests", "Shop.Application.Tests", "Shop.WebApi.Tests"]
        );
        // Infrastructure intentionally has no dedicated test component.
        assert!(!test_ids.iter().any(|id| id.contains("Infrastructure")));
    }

    #[test]
    fn edges_follow_the_fixed_map() {
        let graph = ComponentGraph::derive(&config(false, false));

        assert!(find(&graph, "Shop.Domain").depends_on.is_empty());
        assert_eq!(
            find(&graph, "Shop.Application")
                .depends_on
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>(),
            vec!["Shop.Domain"]
        );
        assert_eq!(
            find(&graph, "Shop.Infrastructure")
                .depends_on
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>(),
            vec!["Shop.Application", "Shop.Domain"]
        );
        assert_eq!(
            find(&graph, "Shop.WebApi")
                .depends_on
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>(),
            vec!["Shop.Application", "Shop.Infrastructure"]
        );
    }

    #[test]
    fn each_test_references_only_its_subject() {
        let graph = ComponentGraph::derive(&config(true, true));
        for test in graph.tests() {
            assert_eq!(test.depends_on.len(), 1);
            let subject = test.id.as_str().strip_suffix(".Tests").unwrap();
            assert_eq!(test.depends_on[0].as_str(), subject);
        }
    }

    #[test]
    fn cqrs_adds_sub_paths_not_edges() {
        let plain = ComponentGraph::derive(&config(false, false));
        let cqrs = ComponentGraph::derive(&config(true, false));

        let app_plain = find(&plain, "Shop.Application");
        let app_cqrs = find(&cqrs, "Shop.Application");

        assert!(app_plain.sub_dirs.is_empty());
        assert_eq!(app_cqrs.sub_dirs, vec!["Commands", "Queries", "Handlers"]);
        // Edge set unchanged.
        assert_eq!(app_plain.depends_on, app_cqrs.depends_on);
    }

    #[test]
    fn graph_shape_ignores_name_provider_and_framework() {
        let a = ScaffoldConfig::builder()
            .name("Alpha")
            .db_provider("postgres")
            .framework("net9.0")
            .build()
            .unwrap()
            .0;
        let b = ScaffoldConfig::builder()
            .name("Beta")
            .db_provider("sqlite")
            .framework("net6.0")
            .build()
            .unwrap()
            .0;

        let ga = ComponentGraph::derive(&a);
        let gb = ComponentGraph::derive(&b);

        assert_eq!(ga.len(), gb.len());
        for (ca, cb) in ga.components().iter().zip(gb.components()) {
            assert_eq!(ca.kind, cb.kind);
            assert_eq!(ca.depends_on.len(), cb.depends_on.len());
        }
    }

    #[test]
    fn paths_group_under_layer_roots() {
        let graph = ComponentGraph::derive(&config(false, true));
        assert!(find(&graph, "Shop.Domain").path.starts_with("src/Core"));
        assert!(find(&graph, "Shop.Application").path.starts_with("src/Core"));
        assert!(
            find(&graph, "Shop.Infrastructure")
                .path
                .starts_with("src/Infrastructure")
        );
        assert!(find(&graph, "Shop.WebApi").path.starts_with("src/Presentation"));
        assert!(find(&graph, "Shop.Domain.Tests").path.starts_with("tests"));
    }

    #[test]
    fn project_file_is_inside_component_dir() {
        let graph = ComponentGraph::derive(&config(false, false));
        let domain = find(&graph, "Shop.Domain");
        assert_eq!(
            domain.project_file(),
            PathBuf::from("src/Core/Shop.Domain/Shop.Domain.csproj")
        );
    }
}
