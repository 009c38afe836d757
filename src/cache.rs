use std::collections::BTreeMap;

use log::trace;

use crate::model::{spec::ProjectSpec, warn::NodeSuppressions, TargetFramework};

/// Computed node suppressions for referenced projects, keyed by project path
/// and framework.
///
/// Lives for the duration of a single resolve call; a project referenced
/// from several target graphs is only sliced once per framework.
#[derive(Debug, Default)]
pub struct NodeSuppressionsCache {
    entries: BTreeMap<String, BTreeMap<TargetFramework, NodeSuppressions>>,
}

impl NodeSuppressionsCache {
    pub fn new() -> Self {
        NodeSuppressionsCache::default()
    }

    /// Returns the suppressions of `spec` as seen from `framework`, computing
    /// and caching them on first use. Project paths compare
    /// case-insensitively.
    pub fn get_or_compute(
        &mut self,
        spec: &ProjectSpec,
        framework: &TargetFramework,
    ) -> &NodeSuppressions {
        let by_framework = self.entries.entry(spec.path.to_ascii_lowercase()).or_default();
        by_framework.entry(framework.clone()).or_insert_with(|| {
            trace!(
                "computing node suppressions for {} [{}]",
                spec.path,
                framework
            );
            NodeSuppressions::new(
                spec.warnings
                    .project_wide
                    .clone()
                    .filter(|codes| !codes.is_empty()),
                spec.warnings.package_specific_for_framework(framework),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{spec::WarningSettings, WarnCode};
    use pretty_assertions::assert_eq;

    fn spec_with_project_wide(path: &str, codes: &[WarnCode]) -> ProjectSpec {
        ProjectSpec {
            id: crate::model::PackageId::from("referenced"),
            path: path.to_string(),
            target_frameworks: vec![TargetFramework::from("net6.0")],
            warnings: WarningSettings {
                project_wide: Some(codes.iter().copied().collect()),
                package_specific: None,
            },
        }
    }

    #[test]
    fn repeated_lookups_reuse_the_first_computation() {
        let mut cache = NodeSuppressionsCache::new();
        let framework = TargetFramework::from("net6.0");

        let first = spec_with_project_wide("/work/lib/project.toml", &[WarnCode::W1601]);
        let computed = cache.get_or_compute(&first, &framework).clone();
        assert_eq!(
            computed.project_wide,
            Some(BTreeSet::from([WarnCode::W1601]))
        );

        // Same path, different settings: the cached slice wins.
        let second = spec_with_project_wide("/Work/Lib/Project.toml", &[WarnCode::W1902]);
        let cached = cache.get_or_compute(&second, &framework);
        assert_eq!(cached.project_wide, Some(BTreeSet::from([WarnCode::W1601])));
    }

    #[test]
    fn frameworks_are_cached_independently() {
        let mut cache = NodeSuppressionsCache::new();
        let spec = spec_with_project_wide("/work/lib/project.toml", &[WarnCode::W1601]);

        cache.get_or_compute(&spec, &TargetFramework::from("net6.0"));
        let other = cache.get_or_compute(&spec, &TargetFramework::from("net7.0"));
        assert_eq!(other.project_wide, Some(BTreeSet::from([WarnCode::W1601])));
    }

    #[test]
    fn empty_project_wide_settings_normalize_to_none() {
        let mut cache = NodeSuppressionsCache::new();
        let spec = spec_with_project_wide("/work/lib/project.toml", &[]);

        let computed = cache.get_or_compute(&spec, &TargetFramework::from("net6.0"));
        assert_eq!(computed.project_wide, None);
        assert_eq!(computed.package_specific, None);
    }
}
