use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::apply_options;
use super::ClusterId;
use super::ClusterSpec;
use super::ConfigOption;
use crate::DirAllocator;
use crate::Member;
use crate::PdConfig;
use crate::Result;
use crate::UrlAllocator;

/// Identity and endpoints of one cluster member.
///
/// Specs are created by a [`ClusterSpec`] and never change inside it.
/// Callers get copies; overriding an advertise URL on a copy affects only
/// what that copy renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    name: String,
    data_dir: PathBuf,
    client_url: String,
    advertise_client_url: String,
    peer_url: String,
    advertise_peer_url: String,
    cluster_id: ClusterId,
    is_joiner: bool,
}

impl NodeSpec {
    /// Allocates a data dir, then a client and a peer endpoint.
    ///
    /// # Errors
    /// `Error::Alloc` from either allocator, unchanged.
    pub(crate) fn create(
        name: String,
        cluster_id: ClusterId,
        is_joiner: bool,
        urls: &dyn UrlAllocator,
        dirs: &dyn DirAllocator,
    ) -> Result<Self> {
        let data_dir = dirs.alloc_dir()?;
        let client_url = urls.alloc_url()?;
        let peer_url = urls.alloc_url()?;
        debug!(
            %name,
            data_dir = %data_dir.display(),
            %client_url,
            %peer_url,
            is_joiner,
            "created node spec"
        );

        Ok(Self {
            name,
            data_dir,
            advertise_client_url: client_url.clone(),
            client_url,
            advertise_peer_url: peer_url.clone(),
            peer_url,
            cluster_id,
            is_joiner,
        })
    }

    pub fn with_advertise_client_url(
        mut self,
        url: impl Into<String>,
    ) -> Self {
        self.advertise_client_url = url.into();
        self
    }

    pub fn with_advertise_peer_url(
        mut self,
        url: impl Into<String>,
    ) -> Self {
        self.advertise_peer_url = url.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn client_url(&self) -> &str {
        &self.client_url
    }

    pub fn advertise_client_url(&self) -> &str {
        &self.advertise_client_url
    }

    pub fn peer_url(&self) -> &str {
        &self.peer_url
    }

    pub fn advertise_peer_url(&self) -> &str {
        &self.advertise_peer_url
    }

    pub fn cluster_id(&self) -> &ClusterId {
        &self.cluster_id
    }

    pub fn is_joiner(&self) -> bool {
        self.is_joiner
    }

    /// This node's `name=peer_url` membership entry.
    pub fn member(&self) -> Member {
        Member::new(&self.name, &self.peer_url)
    }

    /// The flat `--key=value` argument list for this node.
    ///
    /// Ends with `--join=<first initial peer url>` for joiners and
    /// `--initial-cluster=<membership>` for everyone else.
    ///
    /// # Errors
    /// - `Error::ForeignNode` if `cluster` did not create this node
    /// - `Error::EmptyCluster` if a joiner's cluster has no initial nodes
    pub fn arguments(
        &self,
        cluster: &ClusterSpec,
    ) -> Result<Vec<String>> {
        cluster.ensure_owns(self)?;

        let mut args = vec![
            format!("--name={}", self.name),
            format!("--data-dir={}", self.data_dir.display()),
            format!("--client-urls={}", self.client_url),
            format!("--advertise-client-urls={}", self.advertise_client_url),
            format!("--peer-urls={}", self.peer_url),
            format!("--advertise-peer-urls={}", self.advertise_peer_url),
        ];
        if self.is_joiner {
            args.push(format!("--join={}", cluster.join_address()?));
        } else {
            args.push(format!("--initial-cluster={}", cluster.initial_membership()));
        }

        Ok(args)
    }

    /// Parses [`arguments`](Self::arguments) into a config, then runs
    /// `options` in order with this node's name.
    ///
    /// A parse error is returned as-is and no hook runs.
    pub fn render(
        &self,
        cluster: &ClusterSpec,
        options: &[ConfigOption],
    ) -> Result<PdConfig> {
        let args = self.arguments(cluster)?;
        let mut config = PdConfig::from_args(&args)?;

        apply_options(&mut config, &self.name, options);
        debug!(name = %self.name, hooks = options.len(), "rendered node config");

        Ok(config)
    }
}
