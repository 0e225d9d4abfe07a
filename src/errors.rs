//! Error hierarchy for cluster bootstrap configuration.
//!
//! Allocation and parse failures are propagated to the test driver as-is;
//! nothing at this layer retries or falls back to defaults.

use std::io;
use std::path::PathBuf;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Temp directory or endpoint allocation failed while creating a node
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The rendered arguments do not match the node's flag schema
    #[error(transparent)]
    Args(#[from] clap::Error),

    /// The parsed configuration could not be merged or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Join address or client URL requested from a cluster without initial nodes
    #[error("cluster has no initial nodes")]
    EmptyCluster,

    /// A node spec was rendered against a cluster it was not created by
    #[error("node {name} does not belong to cluster {cluster_id}")]
    ForeignNode { name: String, cluster_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    /// Binding an ephemeral socket failed
    #[error("failed to bind ephemeral port: {0}")]
    Bind(#[source] io::Error),

    /// Every port the OS offered had already been handed out
    #[error("no unused port found after {attempts} attempts")]
    PortExhausted { attempts: usize },

    /// Creating a temp directory failed
    #[error("failed to create temp dir under {}: {source}", .root.display())]
    TempDir {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}
