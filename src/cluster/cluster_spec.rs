use std::fmt::Debug;
use std::sync::Arc;

use tracing::info;

use super::ClusterId;
use super::ConfigOption;
use super::NodeSpec;
use super::NODE_NAME_PREFIX;
use crate::membership_string;
use crate::DirAllocator;
use crate::Error;
use crate::LocalUrlAllocator;
use crate::PdConfig;
use crate::Result;
use crate::TempDirAllocator;
use crate::UrlAllocator;

/// Members of one test cluster: the bootstrap set and later joiners.
///
/// Both lists are append-only. Mutation goes through `&mut self`, so a
/// spec shared across threads needs external synchronization.
pub struct ClusterSpec {
    id: ClusterId,
    initial_nodes: Vec<NodeSpec>,
    joiner_nodes: Vec<NodeSpec>,
    urls: Arc<dyn UrlAllocator>,
    dirs: Arc<dyn DirAllocator>,
}

impl Debug for ClusterSpec {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ClusterSpec")
            .field("id", &self.id)
            .field("initial_nodes", &self.initial_nodes)
            .field("joiner_nodes", &self.joiner_nodes)
            .finish()
    }
}

impl ClusterSpec {
    /// Creates `n` initial nodes on local ports and fresh temp directories.
    ///
    /// Ports come from the process-wide [`LocalUrlAllocator`]. The data
    /// directories are removed when the spec is dropped.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_allocators(n, LocalUrlAllocator::shared(), Arc::new(TempDirAllocator::new()))
    }

    /// Creates `n` initial nodes, named `pd1..pdn`, from the given allocators.
    ///
    /// # Errors
    /// `Error::Alloc` if either allocator fails; no spec is returned.
    pub fn with_allocators(
        n: usize,
        urls: Arc<dyn UrlAllocator>,
        dirs: Arc<dyn DirAllocator>,
    ) -> Result<Self> {
        let mut cluster = Self {
            id: ClusterId::generate(),
            initial_nodes: Vec::with_capacity(n),
            joiner_nodes: Vec::new(),
            urls,
            dirs,
        };

        for _ in 0..n {
            let node = cluster.create_node(false)?;
            cluster.initial_nodes.push(node);
        }
        info!(
            cluster_id = %cluster.id,
            membership = %cluster.initial_membership(),
            "created cluster spec"
        );

        Ok(cluster)
    }

    /// Adds a node that joins through the first initial node.
    ///
    /// # Errors
    /// - `Error::EmptyCluster` if there is no initial node to join through
    /// - `Error::Alloc` if either allocator fails
    pub fn join(&mut self) -> Result<NodeSpec> {
        let join_addr = self.join_address()?.to_string();

        let node = self.create_node(true)?;
        info!(cluster_id = %self.id, name = %node.name(), %join_addr, "node joining cluster");
        self.joiner_nodes.push(node.clone());

        Ok(node)
    }

    /// Name the next created node will get: `pd<initial + joiners + 1>`.
    pub fn next_name(&self) -> String {
        format!(
            "{}{}",
            NODE_NAME_PREFIX,
            self.initial_nodes.len() + self.joiner_nodes.len() + 1
        )
    }

    /// `name=peer_url` of every initial node, comma-joined in creation order.
    ///
    /// Empty for a cluster without initial nodes.
    pub fn initial_membership(&self) -> String {
        let members: Vec<_> = self.initial_nodes.iter().map(NodeSpec::member).collect();
        membership_string(&members)
    }

    /// Peer URL of the first initial node.
    pub fn join_address(&self) -> Result<&str> {
        self.first_initial().map(NodeSpec::peer_url)
    }

    /// Client URL of the first initial node.
    pub fn client_url(&self) -> Result<&str> {
        self.first_initial().map(NodeSpec::client_url)
    }

    /// Client URLs of all initial nodes, in creation order.
    pub fn client_urls(&self) -> Vec<String> {
        self.initial_nodes
            .iter()
            .map(|node| node.client_url().to_string())
            .collect()
    }

    /// Renders every initial node with the same hooks, in creation order.
    pub fn render_initial(
        &self,
        options: &[ConfigOption],
    ) -> Result<Vec<PdConfig>> {
        self.initial_nodes
            .iter()
            .map(|node| node.render(self, options))
            .collect()
    }

    pub fn id(&self) -> &ClusterId {
        &self.id
    }

    pub fn initial_nodes(&self) -> &[NodeSpec] {
        &self.initial_nodes
    }

    pub fn joiner_nodes(&self) -> &[NodeSpec] {
        &self.joiner_nodes
    }

    /// Initial nodes followed by joiners.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeSpec> {
        self.initial_nodes.iter().chain(self.joiner_nodes.iter())
    }

    pub fn node(
        &self,
        name: &str,
    ) -> Option<&NodeSpec> {
        self.nodes().find(|node| node.name() == name)
    }

    pub fn len(&self) -> usize {
        self.initial_nodes.len() + self.joiner_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn ensure_owns(
        &self,
        node: &NodeSpec,
    ) -> Result<()> {
        if node.cluster_id() == &self.id && self.node(node.name()).is_some() {
            return Ok(());
        }
        Err(Error::ForeignNode {
            name: node.name().to_string(),
            cluster_id: self.id.to_string(),
        })
    }

    fn first_initial(&self) -> Result<&NodeSpec> {
        self.initial_nodes.first().ok_or(Error::EmptyCluster)
    }

    fn create_node(
        &self,
        is_joiner: bool,
    ) -> Result<NodeSpec> {
        NodeSpec::create(
            self.next_name(),
            self.id.clone(),
            is_joiner,
            &*self.urls,
            &*self.dirs,
        )
    }
}
