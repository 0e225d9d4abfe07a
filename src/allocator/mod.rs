//! Capabilities that hand out fresh node resources.
//!
//! A cluster spec never hard-wires where ports or data directories come
//! from: it asks a [`UrlAllocator`] and a [`DirAllocator`]. The defaults
//! ([`LocalUrlAllocator`], [`TempDirAllocator`]) talk to the OS; tests of
//! the cluster spec itself swap in deterministic fakes.

mod dir;
mod url;
pub use dir::*;
pub use url::*;


use std::path::PathBuf;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::AllocError;

/// Hands out a network endpoint that no other caller has received.
#[cfg_attr(test, automock)]
pub trait UrlAllocator: Send + Sync {
    fn alloc_url(&self) -> std::result::Result<String, AllocError>;
}

/// Hands out a filesystem path that no other caller has received.
#[cfg_attr(test, automock)]
pub trait DirAllocator: Send + Sync {
    fn alloc_dir(&self) -> std::result::Result<PathBuf, AllocError>;
}

impl<T: UrlAllocator + ?Sized> UrlAllocator for Arc<T> {
    fn alloc_url(&self) -> std::result::Result<String, AllocError> {
        (**self).alloc_url()
    }
}

impl<T: DirAllocator + ?Sized> DirAllocator for Arc<T> {
    fn alloc_dir(&self) -> std::result::Result<PathBuf, AllocError> {
        (**self).alloc_dir()
    }
}
