use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use derive_new::new;

use super::{PackageId, WarnCode};

/// Suppressions accumulated along one walk path: codes suppressed for every
/// package, and codes suppressed only for specific packages.
///
/// Both components treat `None` as empty for equality and hashing. The two
/// representations differ in meaning only inside the admission cache, where
/// `None` stands for "no constraint recorded yet" and must not collapse an
/// intersection to the empty set (see [`intersect_codes`]).
#[derive(new, Debug, Clone, Default, Eq)]
pub struct NodeSuppressions {
    pub project_wide: Option<BTreeSet<WarnCode>>,
    pub package_specific: Option<BTreeMap<PackageId, BTreeSet<WarnCode>>>,
}

impl NodeSuppressions {
    /// Unions a node's own suppressions into this path value. Crossing a
    /// project node can only widen what the path suppresses.
    pub fn merge_node(&self, node: &NodeSuppressions) -> NodeSuppressions {
        NodeSuppressions {
            project_wide: merge_codes(self.project_wide.as_ref(), node.project_wide.as_ref()),
            package_specific: merge_package_specific(
                self.package_specific.as_ref(),
                node.package_specific.as_ref(),
            ),
        }
    }

    /// Component-wise intersection used when the admission cache replaces a
    /// stored entry. An absent side means "no constraint yet", so the present
    /// side survives unchanged; a key emptied by the intersection stays
    /// present.
    pub fn intersect(&self, other: &NodeSuppressions) -> NodeSuppressions {
        NodeSuppressions {
            project_wide: intersect_codes(self.project_wide.as_ref(), other.project_wide.as_ref()),
            package_specific: intersect_package_specific(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            ),
        }
    }

    /// Whether every suppression in `self` is already covered by `other`.
    /// Absent sides are empty; an empty `self` is a subset of anything.
    pub fn is_subset_of(&self, other: &NodeSuppressions) -> bool {
        codes_subset(self.project_wide.as_ref(), other.project_wide.as_ref())
            && package_specific_subset(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            )
    }

    /// The codes this path suppresses for `id`: the project-wide codes plus
    /// the package-specific codes recorded for that package.
    pub fn extract_for_package(&self, id: &PackageId) -> BTreeSet<WarnCode> {
        let mut codes = self.project_wide.clone().unwrap_or_default();
        if let Some(specific) = self.package_specific.as_ref().and_then(|map| map.get(id)) {
            codes.extend(specific.iter().copied());
        }
        codes
    }
}

impl PartialEq for NodeSuppressions {
    fn eq(&self, other: &Self) -> bool {
        codes_eq(self.project_wide.as_ref(), other.project_wide.as_ref())
            && package_specific_eq(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            )
    }
}

impl Hash for NodeSuppressions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash only the flattened contents so that `None` and an empty
        // collection hash alike, matching `PartialEq`.
        if let Some(codes) = &self.project_wide {
            for code in codes {
                code.hash(state);
            }
        }
        state.write_u8(0xff);
        if let Some(map) = &self.package_specific {
            for (id, codes) in map {
                id.hash(state);
                for code in codes {
                    code.hash(state);
                }
            }
        }
    }
}

/// Null-safe union of two code sets. Returns a clone of either side when the
/// contents already agree.
pub fn merge_codes(
    first: Option<&BTreeSet<WarnCode>>,
    second: Option<&BTreeSet<WarnCode>>,
) -> Option<BTreeSet<WarnCode>> {
    match (first, second) {
        (None, None) => None,
        (Some(codes), None) | (None, Some(codes)) => Some(codes.clone()),
        (Some(first), Some(second)) => {
            if first == second {
                Some(first.clone())
            } else {
                Some(first.union(second).copied().collect())
            }
        }
    }
}

/// Null-safe per-key union of two package-specific suppression maps.
pub fn merge_package_specific(
    first: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
    second: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
) -> Option<BTreeMap<PackageId, BTreeSet<WarnCode>>> {
    match (first, second) {
        (None, None) => None,
        (Some(map), None) | (None, Some(map)) => Some(map.clone()),
        (Some(first), Some(second)) => {
            let mut merged = first.clone();
            for (id, codes) in second {
                merged
                    .entry(id.clone())
                    .and_modify(|existing| existing.extend(codes.iter().copied()))
                    .or_insert_with(|| codes.clone());
            }
            Some(merged)
        }
    }
}

/// Null-safe intersection of two code sets. `None` encodes "no constraint
/// yet", so it yields the other side instead of the empty set.
pub fn intersect_codes(
    first: Option<&BTreeSet<WarnCode>>,
    second: Option<&BTreeSet<WarnCode>>,
) -> Option<BTreeSet<WarnCode>> {
    match (first, second) {
        (None, None) => None,
        (Some(codes), None) | (None, Some(codes)) => Some(codes.clone()),
        (Some(first), Some(second)) => {
            if first == second {
                Some(first.clone())
            } else {
                Some(first.intersection(second).copied().collect())
            }
        }
    }
}

fn intersect_package_specific(
    first: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
    second: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
) -> Option<BTreeMap<PackageId, BTreeSet<WarnCode>>> {
    match (first, second) {
        (None, None) => None,
        (Some(map), None) | (None, Some(map)) => Some(map.clone()),
        (Some(first), Some(second)) => {
            // Union of keys: a key present on one side only keeps that
            // side's codes, since the other side recorded no constraint
            // for it.
            let mut intersected = first.clone();
            for (id, codes) in second {
                match intersected.entry(id.clone()) {
                    Entry::Occupied(mut entry) => {
                        let shared = entry.get().intersection(codes).copied().collect();
                        entry.insert(shared);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(codes.clone());
                    }
                }
            }
            Some(intersected)
        }
    }
}

fn codes_eq(first: Option<&BTreeSet<WarnCode>>, second: Option<&BTreeSet<WarnCode>>) -> bool {
    match (first, second) {
        (None, None) => true,
        (Some(codes), None) | (None, Some(codes)) => codes.is_empty(),
        (Some(first), Some(second)) => first == second,
    }
}

fn package_specific_eq(
    first: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
    second: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
) -> bool {
    match (first, second) {
        (None, None) => true,
        (Some(map), None) | (None, Some(map)) => map.is_empty(),
        (Some(first), Some(second)) => first == second,
    }
}

fn codes_subset(first: Option<&BTreeSet<WarnCode>>, second: Option<&BTreeSet<WarnCode>>) -> bool {
    match first {
        None => true,
        Some(codes) => second.map_or(codes.is_empty(), |other| codes.is_subset(other)),
    }
}

fn package_specific_subset(
    first: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
    second: Option<&BTreeMap<PackageId, BTreeSet<WarnCode>>>,
) -> bool {
    match first {
        None => true,
        Some(map) => map.iter().all(|(id, codes)| {
            codes.is_empty()
                || second
                    .and_then(|other| other.get(id))
                    .is_some_and(|other| codes.is_subset(other))
        }),
    }
}
