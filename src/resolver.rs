use crate::model::TargetFramework;

#[cfg(test)]
use mockall::automock;

/// Selects the nearest compatible framework among a referenced project's
/// declared frameworks.
///
/// Compatibility rules live with the restore pipeline; this crate only
/// consumes the selection. Returning `None` means the project has nothing
/// compatible to offer, in which case it is traversed without contributing
/// suppressions.
#[cfg_attr(test, automock)]
pub trait FrameworkResolver {
    fn nearest(
        &self,
        declared: &[TargetFramework],
        desired: &TargetFramework,
    ) -> Option<TargetFramework>;
}

/// Picks the declared framework equal to the desired one, if any.
///
/// Sufficient when every project in the graph targets the consuming
/// framework directly; anything smarter belongs to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactFrameworkResolver;

impl FrameworkResolver for ExactFrameworkResolver {
    fn nearest(
        &self,
        declared: &[TargetFramework],
        desired: &TargetFramework,
    ) -> Option<TargetFramework> {
        declared.iter().find(|framework| *framework == desired).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_resolver_matches_case_insensitively() {
        let declared = vec![
            TargetFramework::from("netstandard2.0"),
            TargetFramework::from("NET6.0"),
        ];

        let resolver = ExactFrameworkResolver;
        assert_eq!(
            resolver.nearest(&declared, &TargetFramework::from("net6.0")),
            Some(TargetFramework::from("NET6.0"))
        );
        assert_eq!(
            resolver.nearest(&declared, &TargetFramework::from("net8.0")),
            None
        );
    }
}
