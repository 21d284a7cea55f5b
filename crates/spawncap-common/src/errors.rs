//! Error types for process launch and capture.

use thiserror::Error;

/// Result type alias for spawncap operations.
///
/// Convenience alias so we can write `ProcessResult<T>` instead of
/// `Result<T, ProcessError>` throughout the codebase.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

/// Error taxonomy for a single launch-and-capture call.
///
/// Every failure is terminal for that call; no retries are performed.
/// Each acquisition step has its own variant so callers can tell a pipe
/// problem from a spawn problem, and a polling failure is distinct from
/// a drain loop that ended because both streams reached end-of-stream.
#[derive(Debug, Error, Clone)]
pub enum ProcessError {
    /// Creating one of the capture pipes failed. No process was created.
    #[error("Pipe creation failed: {reason}")]
    PipeCreation { reason: String },

    /// Building the file-descriptor redirection plan failed.
    #[error("Redirection plan construction failed: {reason}")]
    PlanConstruction { reason: String },

    /// The command or an argument could not be materialized for the OS
    /// call boundary (empty command, interior NUL byte, and similar).
    #[error("Invalid launch argument: {reason}")]
    InvalidArgument { reason: String },

    /// The spawn primitive returned a non-zero status.
    #[error("Failed to spawn '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The readiness check over the pipe read-ends failed while draining.
    /// Buffers may hold partial data captured before the failure.
    #[error("Readiness polling failed while draining: {reason}")]
    PollFailed { reason: String },

    /// Reaping the child after its streams closed failed.
    #[error("Failed to reap child process {pid}: {reason}")]
    WaitFailed { pid: u32, reason: String },
}

impl ProcessError {
    pub fn pipe_creation(reason: impl Into<String>) -> Self {
        Self::PipeCreation {
            reason: reason.into(),
        }
    }

    pub fn plan_construction(reason: impl Into<String>) -> Self {
        Self::PlanConstruction {
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn poll_failed(reason: impl Into<String>) -> Self {
        Self::PollFailed {
            reason: reason.into(),
        }
    }

    pub fn wait_failed(pid: u32, reason: impl Into<String>) -> Self {
        Self::WaitFailed {
            pid,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failing_step() {
        let err = ProcessError::spawn_failed("/bin/missing", "ENOENT");
        assert_eq!(
            err.to_string(),
            "Failed to spawn '/bin/missing': ENOENT"
        );

        let err = ProcessError::wait_failed(42, "ECHILD");
        assert!(err.to_string().contains("42"));
    }
}
