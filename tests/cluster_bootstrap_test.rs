use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use pd_testkit::for_node;
use pd_testkit::with_election_interval;
use pd_testkit::with_lease;
use pd_testkit::with_tick_interval;
use pd_testkit::ClusterSpec;
use pd_testkit::Error;
use pd_testkit::LocalUrlAllocator;
use pd_testkit::TempDirAllocator;

#[test]
fn three_node_cluster_should_render_valid_configs() {
    let cluster = ClusterSpec::new(3).unwrap();

    let configs = cluster
        .render_initial(&[with_tick_interval(50), with_election_interval(500)])
        .unwrap();

    assert_eq!(configs.len(), 3);
    let mut seen = HashSet::new();
    for (node, config) in cluster.initial_nodes().iter().zip(&configs) {
        assert_eq!(config.name, node.name());
        assert_eq!(config.initial_cluster, cluster.initial_membership());
        assert_eq!(config.tick_interval_ms, 50);
        assert!(node.data_dir().is_dir());
        assert!(seen.insert(config.data_dir.clone()));
        assert!(seen.insert(config.client_urls.clone()));
        assert!(seen.insert(config.peer_urls.clone()));
    }
    assert_eq!(config_names(&cluster), vec!["pd1", "pd2", "pd3"]);
}

#[test]
fn joiner_should_point_at_first_initial_peer() {
    let mut cluster = ClusterSpec::new(3).unwrap();

    let joiner = cluster.join().unwrap();
    let config = joiner.render(&cluster, &[for_node("pd4", with_lease(1))]).unwrap();

    assert_eq!(joiner.name(), "pd4");
    assert_eq!(config.join, cluster.initial_nodes()[0].peer_url());
    assert!(config.initial_cluster.is_empty());
    assert_eq!(config.lease, 1);
    assert_eq!(cluster.next_name(), "pd5");
}

#[test]
fn clusters_sharing_an_allocator_should_not_collide() {
    let urls = Arc::new(LocalUrlAllocator::default());
    let root = tempfile::tempdir().unwrap();
    let dirs = Arc::new(TempDirAllocator::in_dir(root.path()));

    let a = ClusterSpec::with_allocators(3, urls.clone(), dirs.clone()).unwrap();
    let b = ClusterSpec::with_allocators(3, urls.clone(), dirs.clone()).unwrap();

    let mut endpoints = HashSet::new();
    for node in a.nodes().chain(b.nodes()) {
        assert!(endpoints.insert(node.client_url().to_string()));
        assert!(endpoints.insert(node.peer_url().to_string()));
    }
    assert_eq!(urls.allocated(), 12);
    assert_eq!(dirs.allocated(), 6);
    // Same names, different clusters
    assert_eq!(a.initial_membership().split(',').count(), 3);
    assert!(a.initial_nodes()[0].render(&b, &[]).is_err());
}

#[test]
fn data_dirs_should_be_removed_with_the_cluster() {
    let cluster = ClusterSpec::new(2).unwrap();
    let dirs: Vec<PathBuf> = cluster.nodes().map(|node| node.data_dir().to_path_buf()).collect();
    assert!(dirs.iter().all(|dir| dir.exists()));

    drop(cluster);

    assert!(dirs.iter().all(|dir| !dir.exists()));
}

#[test]
fn empty_cluster_should_refuse_to_join() {
    let mut cluster = ClusterSpec::new(0).unwrap();

    assert!(matches!(cluster.join(), Err(Error::EmptyCluster)));
    assert!(matches!(cluster.client_url(), Err(Error::EmptyCluster)));
}

fn config_names(cluster: &ClusterSpec) -> Vec<String> {
    cluster
        .render_initial(&[])
        .unwrap()
        .into_iter()
        .map(|config| config.name)
        .collect()
}
