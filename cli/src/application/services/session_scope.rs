//! Scoped use of a device session.

use anyhow::Result;

use crate::application::ports::DeviceSession;

/// Run `body` against `session`, then close the session on every exit path.
///
/// A close failure after a successful body is logged and the body's value
/// is kept; a close failure after a failed body never hides the body's error.
///
/// # Errors
///
/// Returns the body's error.
pub fn with_session<S, T>(session: S, body: impl FnOnce(&S) -> Result<T>) -> Result<T>
where
    S: DeviceSession,
{
    let outcome = body(&session);
    if let Err(e) = session.close() {
        tracing::warn!(error = %e, "failed to close device session");
    }
    outcome
}
