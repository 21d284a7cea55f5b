//! Process existence checking.

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use spawncap_common::{ProcessError, ProcessResult};

/// Check whether a process with the given PID currently exists.
///
/// Non-destructive probe via `kill(pid, 0)`: no signal is delivered,
/// the call only reports whether the target exists.
///
/// # Returns
///
/// * `Ok(true)` - process exists
/// * `Ok(false)` - no such process
/// * `Err(_)` - the probe itself failed
pub fn process_exists(pid: u32) -> ProcessResult<bool> {
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(_) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        // Exists, but we are not allowed to signal it.
        Err(Errno::EPERM) => Ok(true),
        Err(e) => Err(ProcessError::invalid_argument(format!(
            "failed to check process {}: {}",
            pid,
            e.desc()
        ))),
    }
}
