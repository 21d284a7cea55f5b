//! Launch request validation.

use spawncap_common::{LaunchRequest, ProcessError, ProcessResult};

/// Validate a request before any OS resource is acquired.
pub fn validate_request(request: &LaunchRequest) -> ProcessResult<()> {
    if request.command.is_empty() {
        return Err(ProcessError::invalid_argument("command cannot be empty"));
    }
    Ok(())
}
