use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifetime of a mounted view.
///
/// Every request a view issues runs through [`ViewScope::run`]. Once the
/// scope is unmounted, pending requests are dropped mid-flight and `run`
/// yields `None`, so a response can never land in a view that is gone.
/// Clones share the same mounted flag.
#[derive(Debug, Clone)]
pub struct ViewScope {
    unmounted: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            unmounted: Arc::new(tx),
        }
    }

    pub fn unmount(&self) {
        self.unmounted.send_replace(true);
    }

    pub fn is_mounted(&self) -> bool {
        !*self.unmounted.borrow()
    }

    /// Drives `future` unless the scope is unmounted first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut rx = self.unmounted.subscribe();
        if *rx.borrow_and_update() {
            return None;
        }

        tokio::select! {
            biased;
            _ = rx.wait_for(|unmounted| *unmounted) => None,
            output = future => Some(output),
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
