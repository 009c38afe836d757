use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{PackageId, TargetFramework, WarnCode};

/// Per-package suppressions that hold transitively, indexed by framework.
///
/// `project_wide` stays empty: the parent's own project-wide codes are
/// already in effect for everything it restores, so the resolver only
/// surfaces the per-package additions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitiveSuppressions {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project_wide: Option<BTreeSet<WarnCode>>,
    pub project_frameworks: Vec<TargetFramework>,
    pub package_specific: BTreeMap<TargetFramework, BTreeMap<PackageId, BTreeSet<WarnCode>>>,
}

impl TransitiveSuppressions {
    pub fn codes_for(
        &self,
        framework: &TargetFramework,
        id: &PackageId,
    ) -> Option<&BTreeSet<WarnCode>> {
        self.package_specific.get(framework)?.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.package_specific
            .values()
            .all(|packages| packages.is_empty())
    }
}
