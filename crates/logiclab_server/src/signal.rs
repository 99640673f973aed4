//! Shutdown signal handling.

use log::{error, info, warn};
use tokio::signal::ctrl_c;

/// Resolves once the OS asks the process to stop.
pub(crate) async fn shutdown() {
    tokio::select! {
        ctrl_c_result = ctrl_c() => match ctrl_c_result {
            Ok(()) => info!("event=server_signal module=server status=ok signal=SIGINT"),
            Err(err) => error!(
                "event=server_signal module=server status=error signal=SIGINT error={err}"
            ),
        },
        () = terminate() => {},
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => match stream.recv().await {
            Some(()) => info!("event=server_signal module=server status=ok signal=SIGTERM"),
            None => warn!("event=server_signal module=server status=closed signal=SIGTERM"),
        },
        Err(err) => {
            error!("event=server_signal module=server status=error signal=SIGTERM error={err}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
