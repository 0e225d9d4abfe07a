use std::collections::HashSet;
use std::fmt;
use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;
use tracing::warn;

use super::UrlAllocator;
use crate::AllocError;

const BIND_ADDR: &str = "127.0.0.1:0";

/// Upper bound on OS port offers before giving up.
pub const MAX_PORT_ATTEMPTS: usize = 16;

static SHARED: Lazy<Arc<LocalUrlAllocator>> = Lazy::new(|| Arc::new(LocalUrlAllocator::default()));

type PortSource = Box<dyn Fn() -> io::Result<u16> + Send + Sync>;

/// Allocates `http://127.0.0.1:<port>` endpoints from OS ephemeral ports.
///
/// The bound socket is released right away so the server under test can
/// bind the port. Every port is remembered, so one allocator never returns
/// the same endpoint twice even if the OS offers a port again.
pub struct LocalUrlAllocator {
    used: Mutex<HashSet<u16>>,
    port_source: PortSource,
}

impl fmt::Debug for LocalUrlAllocator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("LocalUrlAllocator").field("used", &self.used).finish()
    }
}

impl Default for LocalUrlAllocator {
    fn default() -> Self {
        Self::with_port_source(ephemeral_port)
    }
}

impl LocalUrlAllocator {
    /// Process-wide allocator, so clusters built in the same test binary
    /// never collide on ports.
    pub fn shared() -> Arc<LocalUrlAllocator> {
        SHARED.clone()
    }

    /// Draws candidate ports from `port_source` instead of the OS.
    pub(crate) fn with_port_source<F>(port_source: F) -> Self
    where
        F: Fn() -> io::Result<u16> + Send + Sync + 'static,
    {
        Self {
            used: Mutex::new(HashSet::new()),
            port_source: Box::new(port_source),
        }
    }

    /// Number of ports handed out so far.
    pub fn allocated(&self) -> usize {
        self.used.lock().len()
    }
}

impl UrlAllocator for LocalUrlAllocator {
    fn alloc_url(&self) -> std::result::Result<String, AllocError> {
        for _ in 0..MAX_PORT_ATTEMPTS {
            let port = (self.port_source)().map_err(AllocError::Bind)?;
            if self.used.lock().insert(port) {
                debug!(port, "allocated local endpoint");
                return Ok(format!("http://127.0.0.1:{port}"));
            }
            warn!(port, "port was already handed out, retrying");
        }

        Err(AllocError::PortExhausted {
            attempts: MAX_PORT_ATTEMPTS,
        })
    }
}

fn ephemeral_port() -> io::Result<u16> {
    let listener = TcpListener::bind(BIND_ADDR)?;
    Ok(listener.local_addr()?.port())
}
