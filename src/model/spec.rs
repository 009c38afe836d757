use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{PackageId, TargetFramework, WarnCode};

/// Warning suppressions authored on a project: codes suppressed for every
/// package, and codes suppressed per package restricted to the frameworks
/// named by the author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSettings {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project_wide: Option<BTreeSet<WarnCode>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub package_specific:
        Option<BTreeMap<WarnCode, BTreeMap<PackageId, BTreeSet<TargetFramework>>>>,
}

impl WarningSettings {
    /// Reindexes the authored `code → package → frameworks` structure to
    /// `package → codes` for a single framework. Returns `None` when no
    /// entry applies to `framework`.
    pub fn package_specific_for_framework(
        &self,
        framework: &TargetFramework,
    ) -> Option<BTreeMap<PackageId, BTreeSet<WarnCode>>> {
        let authored = self.package_specific.as_ref()?;
        let mut result: BTreeMap<PackageId, BTreeSet<WarnCode>> = BTreeMap::new();
        for (code, packages) in authored {
            for (id, frameworks) in packages {
                if frameworks.contains(framework) {
                    result.entry(id.clone()).or_default().insert(*code);
                }
            }
        }
        (!result.is_empty()).then_some(result)
    }

    /// The full reindex of the authored structure: `framework → package →
    /// codes`.
    pub fn package_specific_by_framework(
        &self,
    ) -> BTreeMap<TargetFramework, BTreeMap<PackageId, BTreeSet<WarnCode>>> {
        let mut result: BTreeMap<TargetFramework, BTreeMap<PackageId, BTreeSet<WarnCode>>> =
            BTreeMap::new();
        if let Some(authored) = &self.package_specific {
            for (code, packages) in authored {
                for (id, frameworks) in packages {
                    for framework in frameworks {
                        result
                            .entry(framework.clone())
                            .or_default()
                            .entry(id.clone())
                            .or_default()
                            .insert(*code);
                    }
                }
            }
        }
        result
    }
}

/// A project participating in restore, reduced to what no-warn resolution
/// needs: identity, declared frameworks and authored suppressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub id: PackageId,
    /// Path of the project file; used as the cache key for computed
    /// suppressions, compared case-insensitively.
    pub path: String,
    pub target_frameworks: Vec<TargetFramework>,
    #[serde(default)]
    pub warnings: WarningSettings,
}
