//! Transitive warning-suppression resolution over resolved dependency
//! graphs.
//!
//! Given a project's resolved graphs and its authored warning settings, the
//! resolver computes which diagnostic codes stay suppressed for every
//! transitive package: a code survives only when each path from the project
//! to the package suppresses it. Graph construction, framework
//! compatibility and diagnostic emission belong to the surrounding restore
//! pipeline.

pub mod cache;
pub mod model;
pub mod resolver;
pub mod transitive;
