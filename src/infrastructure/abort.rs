//! Cancellation for in-flight requests.
//!
//! A page that navigates away holds an [`AbortHandle`]; the requests it
//! started run under the matching [`AbortSignal`]. Aborting resolves those
//! requests with [`JobBoardError::Cancelled`] and drops their futures. Stores
//! take their write lock only after the simulated latency has elapsed, so a
//! mutation aborted during its delay never touches data.

use crate::domain::error::{JobBoardError, Result};
use std::future::Future;
use tokio::sync::watch;

/// Owner side of a cancellation pair.
#[derive(Debug)]
pub struct AbortHandle {
    tx: watch::Sender<bool>,
}

/// Observer side of a cancellation pair. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

/// Creates a connected handle/signal pair.
#[must_use]
pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (tx, rx) = watch::channel(false);
    (AbortHandle { tx }, AbortSignal { rx })
}

impl AbortHandle {
    /// Aborts every request running under this handle's signals.
    pub fn abort(&self) {
        tracing::debug!("aborting in-flight requests");
        self.tx.send_replace(true);
    }

    /// Another signal observing this handle.
    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl AbortSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Runs `request` until it completes or the signal fires.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Cancelled`] if the signal fires first (or had
    /// already fired), otherwise whatever `request` resolves to.
    pub async fn run<F, T>(&self, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let mut rx = self.rx.clone();
        if *rx.borrow_and_update() {
            return Err(JobBoardError::Cancelled);
        }

        tokio::select! {
            biased;
            () = wait_for_abort(&mut rx) => {
                tracing::debug!("request cancelled");
                Err(JobBoardError::Cancelled)
            }
            result = request => result,
        }
    }
}

/// Resolves once the flag flips to true; pends forever if the handle is gone.
async fn wait_for_abort(rx: &mut watch::Receiver<bool>) {
    loop {
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if *rx.borrow_and_update() {
            return;
        }
    }
}
