//! Cooperative cancellation shared by the selection and prompt flows

use crate::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cancellation token.
///
/// Clones share one flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone)]
pub struct Cancellation {
    state: Arc<watch::Sender<bool>>,
}

impl Cancellation {
    /// Create a token in the "not cancelled" state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Mark the token as cancelled.
    ///
    /// Returns `true` when this call triggered the cancellation.
    pub fn cancel(&self) -> bool {
        let was_cancelled = self.state.send_replace(true);
        if !was_cancelled {
            tracing::debug!("Cancellation requested");
        }
        !was_cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// `Err(Error::Cancelled)` once the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Run `operation`, abandoning it when the token fires first.
    pub async fn run<F, T>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Error::Cancelled),
            result = operation => result,
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}
