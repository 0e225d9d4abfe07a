//! Cluster bootstrap configuration for placement service integration tests.
//!
//! Build a [`ClusterSpec`] for `n` nodes, render each node into a validated
//! [`PdConfig`], and add joiners as the test goes on:
//!
//! ```no_run
//! use pd_testkit::with_lease;
//! use pd_testkit::ClusterSpec;
//!
//! # fn main() -> pd_testkit::Result<()> {
//! let mut cluster = ClusterSpec::new(3)?;
//! let configs = cluster.render_initial(&[with_lease(1)])?;
//! assert_eq!(configs.len(), 3);
//!
//! let joiner = cluster.join()?;
//! let config = joiner.render(&cluster, &[])?;
//! assert_eq!(config.join, cluster.join_address()?);
//! # Ok(())
//! # }
//! ```
mod allocator;
mod cluster;
mod settings;
mod errors;

pub use allocator::*;
pub use cluster::*;
pub use settings::*;
pub use errors::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
