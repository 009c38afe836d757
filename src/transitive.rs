use std::collections::{btree_map::Entry, BTreeMap, BTreeSet, HashSet, VecDeque};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    cache::NodeSuppressionsCache,
    model::{
        graph::{DependencyKind, ResolvedGraph},
        report::TransitiveSuppressions,
        spec::ProjectSpec,
        warn::NodeSuppressions,
        PackageId, TargetFramework, WarnCode,
    },
    resolver::FrameworkResolver,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NoWarnError {
    #[error("dependency graph for {0} contains an item with an empty id")]
    EmptyId(TargetFramework),
    #[error("project item {0} is missing its resolved project spec")]
    MissingProjectSpec(PackageId),
}

/// Computes, per target framework, the warning codes that stay suppressed
/// for each transitive package of `parent`.
///
/// A code is reported for a package only when every path from the parent to
/// that package suppresses it: project nodes along a path union their
/// suppressions into the path, and converging paths intersect. The parent's
/// project-wide codes seed every path and are therefore absorbed by every
/// reported package, but they are not repeated in the report's
/// `project_wide`, which stays empty.
///
/// Runtime-qualified graphs are skipped; for suppression purposes they
/// duplicate the framework-only graph of the same framework.
pub fn resolve_transitive_no_warn<F: FrameworkResolver>(
    target_graphs: &[ResolvedGraph],
    parent: &ProjectSpec,
    frameworks: &F,
) -> Result<TransitiveSuppressions, NoWarnError> {
    let mut cache = NodeSuppressionsCache::new();
    let mut package_specific: BTreeMap<TargetFramework, BTreeMap<PackageId, BTreeSet<WarnCode>>> =
        BTreeMap::new();
    let mut project_frameworks: Vec<TargetFramework> = Vec::new();

    let parent_project_wide = parent
        .warnings
        .project_wide
        .clone()
        .filter(|codes| !codes.is_empty());

    for graph in target_graphs {
        if graph.is_runtime_qualified() {
            trace!(
                "skipping runtime graph {} [{}]",
                graph.framework,
                graph.runtime_identifier.as_deref().unwrap_or_default()
            );
            continue;
        }
        debug!(
            "resolving transitive no-warn codes for {} [{}]",
            parent.id, graph.framework
        );

        let parent_package_specific = parent
            .warnings
            .package_specific_for_framework(&graph.framework);
        let walked = walk_target_graph(
            graph,
            &parent.id,
            parent_project_wide.clone(),
            parent_package_specific,
            &mut cache,
            frameworks,
        )?;

        if !walked.is_empty() {
            let bucket = package_specific.entry(graph.framework.clone()).or_default();
            for (id, codes) in walked {
                match bucket.entry(id) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().extend(codes);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(codes);
                    }
                }
            }
        }
        if !project_frameworks.contains(&graph.framework) {
            project_frameworks.push(graph.framework.clone());
        }
    }

    Ok(TransitiveSuppressions {
        project_wide: None,
        package_specific,
        project_frameworks,
    })
}

/// A node scheduled for the walk: a dependency id together with the
/// suppressions accumulated along the path that led to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DependencyNode {
    id: PackageId,
    is_project: bool,
    suppressions: NodeSuppressions,
}

struct LookupNode {
    outgoing: Vec<PackageId>,
    suppressions: Option<NodeSuppressions>,
    is_project: bool,
}

fn walk_target_graph<F: FrameworkResolver>(
    graph: &ResolvedGraph,
    parent_id: &PackageId,
    parent_project_wide: Option<BTreeSet<WarnCode>>,
    parent_package_specific: Option<BTreeMap<PackageId, BTreeSet<WarnCode>>>,
    cache: &mut NodeSuppressionsCache,
    frameworks: &F,
) -> Result<BTreeMap<PackageId, BTreeSet<WarnCode>>, NoWarnError> {
    let mut index: BTreeMap<PackageId, LookupNode> = BTreeMap::new();
    let mut closure: BTreeSet<PackageId> = BTreeSet::new();

    for item in &graph.flattened {
        if item.id.is_empty() {
            return Err(NoWarnError::EmptyId(graph.framework.clone()));
        }
        let suppressions = match item.kind {
            DependencyKind::Project => {
                let spec = item
                    .project
                    .as_ref()
                    .ok_or_else(|| NoWarnError::MissingProjectSpec(item.id.clone()))?;
                frameworks
                    .nearest(&spec.target_frameworks, &graph.framework)
                    .map(|nearest| cache.get_or_compute(spec, &nearest).clone())
            }
            DependencyKind::Package => {
                closure.insert(item.id.clone());
                None
            }
        };
        index.insert(
            item.id.clone(),
            LookupNode {
                outgoing: item.outgoing.clone(),
                suppressions,
                is_project: item.kind == DependencyKind::Project,
            },
        );
    }

    let mut result: BTreeMap<PackageId, BTreeSet<WarnCode>> = BTreeMap::new();
    if closure.is_empty() {
        return Ok(result);
    }
    let Some(parent_entry) = index.get(parent_id) else {
        return Ok(result);
    };

    let path_seed = NodeSuppressions::new(parent_project_wide, parent_package_specific);
    let mut seen: BTreeMap<PackageId, NodeSuppressions> = BTreeMap::new();
    let mut scheduled: HashSet<DependencyNode> = HashSet::new();
    let mut queue: VecDeque<DependencyNode> = VecDeque::new();

    seen.insert(parent_id.clone(), path_seed.clone());
    for dependency in &parent_entry.outgoing {
        schedule(
            &mut queue,
            &mut scheduled,
            dependency_node(&index, dependency, path_seed.clone()),
        );
    }

    while let Some(node) = queue.pop_front() {
        if !add_to_seen(&mut seen, &node) {
            trace!("pruning revisit of {}", node.id);
            continue;
        }
        let Some(lookup) = index.get(&node.id) else {
            // Edge to something outside the flattened graph; nothing to do.
            continue;
        };

        if node.is_project {
            let merged = match &lookup.suppressions {
                Some(own) => node.suppressions.merge_node(own),
                // No compatible framework: the project is traversed but
                // contributes no suppressions of its own.
                None => node.suppressions.clone(),
            };
            for dependency in &lookup.outgoing {
                schedule(
                    &mut queue,
                    &mut scheduled,
                    dependency_node(&index, dependency, merged.clone()),
                );
            }
        } else if closure.contains(&node.id) {
            let effective = node.suppressions.extract_for_package(&node.id);
            match result.entry(node.id.clone()) {
                Entry::Occupied(mut entry) => {
                    let intersection: BTreeSet<WarnCode> =
                        entry.get().intersection(&effective).copied().collect();
                    let drained = intersection.is_empty();
                    entry.insert(intersection);
                    if drained {
                        // Intersections cannot grow again; the package is
                        // settled as unsuppressed.
                        debug!("no common suppressions remain for {}", node.id);
                        closure.remove(&node.id);
                        if closure.is_empty() {
                            break;
                        }
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(effective);
                }
            }
            // Packages pass the path through without adding to it.
            for dependency in &lookup.outgoing {
                schedule(
                    &mut queue,
                    &mut scheduled,
                    dependency_node(&index, dependency, node.suppressions.clone()),
                );
            }
        }
    }

    result.retain(|_, codes| !codes.is_empty());
    Ok(result)
}

fn dependency_node(
    index: &BTreeMap<PackageId, LookupNode>,
    id: &PackageId,
    suppressions: NodeSuppressions,
) -> DependencyNode {
    DependencyNode {
        id: id.clone(),
        is_project: index.get(id).is_some_and(|node| node.is_project),
        suppressions,
    }
}

/// Enqueues a node unless an identical one has already been walked or is
/// waiting in the queue. Identical path values produce identical work, and a
/// cycle only generates finitely many distinct values, so the walk
/// terminates.
fn schedule(
    queue: &mut VecDeque<DependencyNode>,
    scheduled: &mut HashSet<DependencyNode>,
    node: DependencyNode,
) {
    if scheduled.insert(node.clone()) {
        queue.push_back(node);
    }
}

/// Decides whether a dequeued node still has anything to contribute.
///
/// A node whose incoming suppressions are covered by what was already
/// admitted for that id is refused. Otherwise the stored entry shrinks to
/// the intersection of the two values and the node is admitted; the entry
/// records what every admitted path still has in common.
fn add_to_seen(seen: &mut BTreeMap<PackageId, NodeSuppressions>, node: &DependencyNode) -> bool {
    match seen.entry(node.id.clone()) {
        Entry::Occupied(mut entry) => {
            if node.suppressions.is_subset_of(entry.get()) {
                return false;
            }
            let merged = node.suppressions.intersect(entry.get());
            entry.insert(merged);
            true
        }
        Entry::Vacant(entry) => {
            entry.insert(node.suppressions.clone());
            true
        }
    }
}
