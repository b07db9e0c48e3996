//! Process lifecycle: readiness notification, shutdown signals, logging.

pub mod logging;
pub mod notify;
pub mod signal;

/// Lifecycle event sink (foreground vs systemd).
pub trait Lifecycle: Send + Sync {
    /// The listener is bound and accepting connections.
    fn on_ready(&self);
    /// Graceful shutdown has begun.
    fn on_stopping(&self);
}

/// Foreground lifecycle: logs events only.
pub struct ForegroundLifecycle;

impl Lifecycle for ForegroundLifecycle {
    fn on_ready(&self) {
        tracing::info!("Relay ready");
    }

    fn on_stopping(&self) {
        tracing::info!("Relay stopping...");
    }
}

/// Systemd lifecycle: sends sd-notify messages and logs.
pub struct SystemdLifecycle;

impl Lifecycle for SystemdLifecycle {
    fn on_ready(&self) {
        notify::sd_ready();
        tracing::info!("Relay ready (notified systemd)");
    }

    fn on_stopping(&self) {
        notify::sd_stopping();
        tracing::info!("Relay stopping (notified systemd)...");
    }
}

/// `SystemdLifecycle` when `NOTIFY_SOCKET` is set, else `ForegroundLifecycle`.
pub fn detect_lifecycle() -> Box<dyn Lifecycle> {
    if std::env::var_os("NOTIFY_SOCKET").is_some() {
        Box::new(SystemdLifecycle)
    } else {
        Box::new(ForegroundLifecycle)
    }
}
