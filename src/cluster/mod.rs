//! Cluster bootstrap specs.
//!
//! A [`ClusterSpec`] derives a name, a data directory and endpoints for
//! every member of a test cluster, and the membership strings that tie
//! them together. Each [`NodeSpec`] renders into a [`PdConfig`](crate::PdConfig)
//! through the regular argument parser, followed by caller supplied
//! [`ConfigOption`] hooks.

mod cluster_spec;
mod node_spec;
mod option;
pub use cluster_spec::*;
pub use node_spec::*;
pub use option::*;


use std::fmt;

use nanoid::nanoid;
use serde::Deserialize;
use serde::Serialize;

/// Node names are this prefix followed by a 1-based ordinal.
pub const NODE_NAME_PREFIX: &str = "pd";

/// Identifies one [`ClusterSpec`] instance.
///
/// Node specs carry it instead of a reference to their cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterId(String);

impl ClusterId {
    pub(crate) fn generate() -> Self {
        Self(nanoid!())
    }
}

impl fmt::Display for ClusterId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}
