use super::{spec::ProjectSpec, PackageId, TargetFramework};

/// Whether a flattened graph item is a referenced project or a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Project,
    Package,
}

/// One entry of a flattened resolved graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphItem {
    pub id: PackageId,
    pub kind: DependencyKind,
    /// Ids of the item's direct dependencies.
    pub outgoing: Vec<PackageId>,
    /// The referenced project's spec; present exactly for project items.
    pub project: Option<ProjectSpec>,
}

impl GraphItem {
    pub fn package(id: PackageId, outgoing: Vec<PackageId>) -> Self {
        GraphItem {
            id,
            kind: DependencyKind::Package,
            outgoing,
            project: None,
        }
    }

    pub fn project(spec: ProjectSpec, outgoing: Vec<PackageId>) -> Self {
        GraphItem {
            id: spec.id.clone(),
            kind: DependencyKind::Project,
            outgoing,
            project: Some(spec),
        }
    }
}

/// A resolved dependency graph for one framework/runtime pair, delivered by
/// the restore pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGraph {
    pub framework: TargetFramework,
    pub runtime_identifier: Option<String>,
    pub flattened: Vec<GraphItem>,
}

impl ResolvedGraph {
    /// Runtime-qualified graphs duplicate a framework-only graph for
    /// suppression purposes and are skipped by the resolver.
    pub fn is_runtime_qualified(&self) -> bool {
        self.runtime_identifier
            .as_deref()
            .is_some_and(|runtime| !runtime.is_empty())
    }
}
