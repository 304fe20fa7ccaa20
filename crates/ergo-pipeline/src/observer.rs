//! Progress observer

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::warn;

/// Failure reported by a progress observer
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Progress observer failed: {0}")]
pub struct ObserverError(pub String);

/// Receives fractional completion of the classification stage.
///
/// Notifications are fire-and-forget: returned errors and panics are logged
/// and never change the analysis result.
pub trait ProgressObserver: Sync {
    /// `fraction` grows monotonically within [0, 1]; the last call is 1.0
    fn on_progress(&self, fraction: f64) -> Result<(), ObserverError>;
}

impl<F> ProgressObserver for F
where
    F: Fn(f64) -> Result<(), ObserverError> + Sync,
{
    fn on_progress(&self, fraction: f64) -> Result<(), ObserverError> {
        self(fraction)
    }
}

/// Deliver one notification, isolating the pipeline from observer failures
pub(crate) fn notify(observer: Option<&dyn ProgressObserver>, fraction: f64) {
    let Some(observer) = observer else {
        return;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_progress(fraction))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(fraction, error = %e, "Ignoring progress observer error"),
        Err(_) => warn!(fraction, "Progress observer panicked"),
    }
}
