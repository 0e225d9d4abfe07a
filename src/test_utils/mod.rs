//! Deterministic allocators and clusters shared by unit tests.

use std::path::PathBuf;
use std::sync::Arc;

use crate::ClusterSpec;
use crate::MockDirAllocator;
use crate::MockUrlAllocator;

/// Hands out `http://127.0.0.1:<first_port>`, then `first_port + 1`, ...
pub fn mock_urls(first_port: u16) -> MockUrlAllocator {
    let mut next = first_port;
    let mut urls = MockUrlAllocator::new();
    urls.expect_alloc_url().returning(move || {
        let url = format!("http://127.0.0.1:{next}");
        next += 1;
        Ok(url)
    });
    urls
}

/// Hands out `/tmp/pd-tests-1`, `/tmp/pd-tests-2`, ... without touching disk.
pub fn mock_dirs() -> MockDirAllocator {
    let mut seq = 0;
    let mut dirs = MockDirAllocator::new();
    dirs.expect_alloc_dir().returning(move || {
        seq += 1;
        Ok(PathBuf::from(format!("/tmp/pd-tests-{seq}")))
    });
    dirs
}

/// `n` initial nodes; node `i` (1-based) gets client port `1000 + 2i - 1`
/// and peer port `1000 + 2i`.
pub fn mock_cluster(n: usize) -> ClusterSpec {
    ClusterSpec::with_allocators(n, Arc::new(mock_urls(1001)), Arc::new(mock_dirs()))
        .expect("mock allocators never fail")
}
