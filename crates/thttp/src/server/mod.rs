mod directory_handler;
mod listing;
use directory_handler::DirectoryHandler;

use std::{net::SocketAddr, path::Path};

use tokio::{net::TcpListener, task::JoinHandle};

use crate::errors::{ThttpError, ThttpResult};

/// A directory server running as a background task
pub struct FileServer {
    addr: SocketAddr,
    task: JoinHandle<std::io::Result<()>>,
}

impl FileServer {
    /// Bind `0.0.0.0:<port>` and start serving `root` in the background.
    ///
    /// Binding happens before this returns, so a busy port is reported here
    /// rather than from the task.
    pub async fn start(root: &Path, port: &str) -> ThttpResult<Self> {
        let handler = DirectoryHandler::new(root).await?;

        let bind_addr = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ThttpError::network(&bind_addr, e))?;
        let addr = listener.local_addr()?;

        tracing::info!("Serving {} on {}", handler.root().display(), addr);
        let router = handler.into_router();
        let task = tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self { addr, task })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server task; it only ends on an accept-loop failure
    pub async fn wait(self) -> ThttpResult<()> {
        match self.task.await {
            Ok(result) => result.map_err(|e| ThttpError::network(self.addr, e)),
            Err(e) => Err(ThttpError::network(self.addr, e)),
        }
    }
}
