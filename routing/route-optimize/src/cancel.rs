//! Cooperative cancellation.
//!
//! A [`CancelToken`] is a shared flag. The swarm checks it at every iteration
//! boundary, so a cancelled run stops within one iteration.
//!
//! # Example
//!
//! ```
//! use route_optimize::CancelToken;
//!
//! let token = CancelToken::new();
//! let observer = token.clone();
//!
//! assert!(observer.check().is_ok());
//! token.cancel();
//! assert!(observer.is_cancelled());
//! assert!(observer.check().unwrap_err().is_cancelled());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use route_types::RoutingError;

/// A cloneable cancellation flag shared between a caller and a run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Returns [`RoutingError::Cancelled`] if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Cancelled`] after [`CancelToken::cancel`].
    pub fn check(&self) -> Result<(), RoutingError> {
        if self.is_cancelled() {
            Err(RoutingError::Cancelled)
        } else {
            Ok(())
        }
    }
}
