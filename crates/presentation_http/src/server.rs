//! Server loop with a bounded graceful shutdown

use std::{future::IntoFuture, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// Serve `app` until `shutdown` completes, then give in-flight requests
/// `grace` to finish before returning anyway
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let signalled = Arc::clone(&signalled);
            async move {
                shutdown.await;
                signalled.notify_one();
            }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        () = signalled.notified() => {
            info!("Waiting up to {:?} for connections to close...", grace);
            if let Ok(result) = tokio::time::timeout(grace, &mut server).await {
                result
            } else {
                warn!("Connections still open after {:?}, shutting down anyway", grace);
                Ok(())
            }
        }
    }
}
