//! Cooperative cancellation for repository operations.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Cancellation token plus an optional deadline, passed to every repository call.
///
/// Repositories call [`OpContext::check`] before each filesystem step and
/// stop as soon as it fails.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl OpContext {
    /// A context that is never done unless its token is canceled.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Wraps an existing token, for example one canceled on Ctrl-C.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// Cancels the context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns an error if the context is canceled or past its deadline.
    ///
    /// Cancellation takes precedence over an expired deadline.
    ///
    /// # Errors
    ///
    /// [`Error::Canceled`] or [`Error::DeadlineExceeded`].
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(Error::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
