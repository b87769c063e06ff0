//! Mount scope for view loads
//!
//! A view's fetches run inside a scope. Once the scope is unmounted, results
//! that settle afterwards are dropped instead of applied. The request itself
//! is not cancelled.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ViewScope {
    name: &'static str,
    mounted: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn mount(name: &'static str) -> Self {
        Self {
            name,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Mark the view gone; shared by every clone of this scope
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Await `fut`, returning its output only if the view is still mounted
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_mounted() {
            Some(output)
        } else {
            debug!("Discarding result for unmounted {} view", self.name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mounted_scope_passes_result() {
        let scope = ViewScope::mount("dashboard");
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_unmount_during_fetch_discards() {
        let scope = ViewScope::mount("courses");
        let handle = scope.clone();

        let result = scope
            .run(async move {
                handle.unmount();
                "late"
            })
            .await;

        assert_eq!(result, None);
        assert!(!scope.is_mounted());
    }
}
