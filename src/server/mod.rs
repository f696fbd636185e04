pub mod listener;
pub mod tls;

use std::sync::atomic::{AtomicUsize, Ordering};

/// Connection bookkeeping shared between the listener and main.
///
/// Main uses the active count after a shutdown signal to let in-flight
/// workers finish their current request/response cycle before the process
/// exits.
#[derive(Debug, Default)]
pub struct ServerState {
    active: AtomicUsize,
}

impl ServerState {
    pub fn connection_opened(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    pub fn connection_closed(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}
