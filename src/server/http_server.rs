use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::runtime_config::RuntimeConfig;

/// Typed wrapper around `may_minihttp`'s server
pub struct HttpServer<T>(pub T);

/// Handle to a running HTTP server
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll the listening address until it accepts connections.
    ///
    /// # Errors
    ///
    /// `TimedOut` if nothing accepts within about 250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the accept coroutine and wait for it to exit
    pub fn stop(self) {
        // SAFETY: cancelling is unsafe in `may` because the coroutine unwinds at
        // its next yield point; we own the handle and join it straight after.
        #[allow(unsafe_code)]
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
        info!(addr = %self.addr, "HTTP server stopped");
    }

    /// Block until the server exits.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Start serving on `addr` (e.g. `"127.0.0.1:8080"`).
    ///
    /// The coroutine stack size from [`RuntimeConfig`] is applied first.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the port cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        RuntimeConfig::from_env().apply();
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        info!(addr = %addr, "HTTP server listening");
        Ok(ServerHandle { addr, handle })
    }
}
