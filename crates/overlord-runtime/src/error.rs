//! Runtime layer errors.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`HostError::Unavailable`] | `HOST_UNAVAILABLE` | Yes |
//! | [`HostError::Failed`] | `HOST_FAILED` | No |
//! | [`ProcessError::Host`] | `RUNTIME_HOST_FAILURE` | No |
//! | [`ProcessError::Payload`] | `RUNTIME_BAD_PAYLOAD` | No |
//! | [`ProcessError::Failed`] | `RUNTIME_PROCESS_FAILED` | No |
//!
//! A failing process is isolated: the scheduler logs the error with the
//! process name and code, drops that process, and keeps running every
//! other one. There is no automatic retry anywhere in the runtime —
//! scenario logic is expected to be deterministic given the same request
//! sequence and decision answers.

use overlord_event::EventError;
use overlord_types::ErrorCode;
use thiserror::Error;

/// Failure reported by a host collaborator (decision collector, display).
///
/// Propagates through sub-procedure calls with `?` and terminates the
/// calling process; siblings are unaffected.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The collaborator cannot serve the call right now.
    ///
    /// **Recoverable** — the host may come back (e.g. a reconnecting UI).
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator failed outright.
    ///
    /// **Not recoverable** from inside the scenario.
    #[error("collaborator failed: {0}")]
    Failed(String),
}

impl ErrorCode for HostError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "HOST_UNAVAILABLE",
            Self::Failed(_) => "HOST_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Why a scenario process terminated with an error.
///
/// This is the `Err` side of every process future. The scheduler consumes
/// it at the top of the process — scripts just use `?`.
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    /// A host collaborator failed during a call the process was awaiting.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A request payload the process depended on did not parse.
    ///
    /// Listeners guarding a wait loop normally skip malformed payloads
    /// and keep waiting; this variant is for payloads a process cannot
    /// continue without.
    #[error("invalid request payload: {0}")]
    Payload(#[from] EventError),

    /// Scenario-specific failure.
    #[error("process failed: {0}")]
    Failed(String),
}

impl ErrorCode for ProcessError {
    fn code(&self) -> &'static str {
        match self {
            Self::Host(_) => "RUNTIME_HOST_FAILURE",
            Self::Payload(_) => "RUNTIME_BAD_PAYLOAD",
            Self::Failed(_) => "RUNTIME_PROCESS_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlord_types::assert_error_codes;

    #[test]
    fn host_error_codes_valid() {
        assert_error_codes(
            &[
                HostError::Unavailable("x".into()),
                HostError::Failed("x".into()),
            ],
            "HOST_",
        );
    }

    #[test]
    fn process_error_codes_valid() {
        assert_error_codes(
            &[
                ProcessError::Host(HostError::Failed("x".into())),
                ProcessError::Payload(EventError::InvalidPayload("x".into())),
                ProcessError::Failed("x".into()),
            ],
            "RUNTIME_",
        );
    }

    #[test]
    fn host_error_propagates_transparently() {
        let err: ProcessError = HostError::Unavailable("modal closed".into()).into();
        assert!(err.to_string().contains("collaborator unavailable"));
        assert_eq!(err.code(), "RUNTIME_HOST_FAILURE");
    }

    #[test]
    fn only_unavailable_host_is_recoverable() {
        assert!(HostError::Unavailable("x".into()).is_recoverable());
        assert!(!HostError::Failed("x".into()).is_recoverable());
        assert!(!ProcessError::Failed("x".into()).is_recoverable());
    }
}
