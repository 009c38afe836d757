pub mod graph;
pub mod report;
pub mod spec;
pub mod warn;

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// Diagnostic codes raised while restoring a dependency graph.
///
/// Only codes that projects can suppress are listed; hard errors never
/// participate in no-warn resolution.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum WarnCode {
    /// A dependency resolved to a higher version than the one requested.
    W1601,
    /// A dependency constraint was satisfied by an approximate match.
    W1602,
    /// A transitive dependency was bumped above its declared range.
    W1603,
    /// A package was restored using a fallback framework.
    W1701,
    /// A package advertises no assets for the requested framework.
    W1702,
    W1703,
    /// A package in the closure has a known vulnerability advisory.
    W1901,
    /// A package in the closure is marked as deprecated.
    W1902,
}

/// Identifier of a package or a referenced project in the dependency graph.
///
/// Comparison, ordering and hashing are case-insensitive; the original
/// spelling is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PackageId {}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let right = other.0.bytes().map(|b| b.to_ascii_lowercase());
        left.cmp(right)
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(value: &str) -> Self {
        PackageId(value.to_string())
    }
}

impl From<String> for PackageId {
    fn from(value: String) -> Self {
        PackageId(value)
    }
}

/// A target framework moniker such as `net6.0`.
///
/// Opaque to this crate: equality and ordering are case-insensitive, and
/// compatibility between frameworks is decided by the restore pipeline
/// through [`crate::resolver::FrameworkResolver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetFramework(String);

impl TargetFramework {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for TargetFramework {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for TargetFramework {}

impl Ord for TargetFramework {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let right = other.0.bytes().map(|b| b.to_ascii_lowercase());
        left.cmp(right)
    }
}

impl PartialOrd for TargetFramework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for TargetFramework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetFramework {
    fn from(value: &str) -> Self {
        TargetFramework(value.to_string())
    }
}

impl From<String> for TargetFramework {
    fn from(value: String) -> Self {
        TargetFramework(value)
    }
}
