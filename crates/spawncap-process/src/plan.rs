//! Child-side file-descriptor redirection plan.
//!
//! Wraps `posix_spawn_file_actions_t` so the plan is destroyed on every
//! exit path, including early failure returns. The actions apply to the
//! child only, between spawn and exec; the parent's own descriptors are
//! untouched.

use nix::errno::Errno;
use spawncap_common::{ProcessError, ProcessResult};
use std::mem::MaybeUninit;
use std::os::fd::RawFd;

use crate::pipe::CapturePipe;

/// RAII wrapper over a `posix_spawn_file_actions_t`.
pub struct RedirectionPlan {
    actions: libc::posix_spawn_file_actions_t,
}

impl RedirectionPlan {
    /// Initialize an empty plan.
    pub fn new() -> ProcessResult<Self> {
        let mut actions = MaybeUninit::<libc::posix_spawn_file_actions_t>::uninit();
        // SAFETY: init writes a valid actions object into the buffer and
        // reports failure through its return code.
        let rc = unsafe { libc::posix_spawn_file_actions_init(actions.as_mut_ptr()) };
        if rc != 0 {
            return Err(ProcessError::plan_construction(Errno::from_raw(rc).desc()));
        }
        // SAFETY: init returned 0, so the object is initialized.
        let actions = unsafe { actions.assume_init() };
        Ok(Self { actions })
    }

    /// Schedule `fd` to be closed in the child before exec.
    pub fn add_close(&mut self, fd: RawFd) -> ProcessResult<()> {
        // SAFETY: self.actions was initialized in new().
        let rc = unsafe { libc::posix_spawn_file_actions_addclose(&mut self.actions, fd) };
        if rc != 0 {
            return Err(ProcessError::plan_construction(Errno::from_raw(rc).desc()));
        }
        Ok(())
    }

    /// Schedule `fd` to be duplicated onto `target` in the child.
    pub fn add_dup2(&mut self, fd: RawFd, target: RawFd) -> ProcessResult<()> {
        // SAFETY: self.actions was initialized in new().
        let rc = unsafe { libc::posix_spawn_file_actions_adddup2(&mut self.actions, fd, target) };
        if rc != 0 {
            return Err(ProcessError::plan_construction(Errno::from_raw(rc).desc()));
        }
        Ok(())
    }

    /// Build the capture plan for a stdout pipe and a stderr pipe.
    ///
    /// The child loses the parent-facing read ends, gets the write ends
    /// duplicated onto file descriptors 1 and 2, and then drops the
    /// original write-end descriptors, which are redundant once
    /// duplicated.
    pub fn stdio_capture(
        stdout_pipe: &CapturePipe,
        stderr_pipe: &CapturePipe,
    ) -> ProcessResult<Self> {
        let mut plan = Self::new()?;
        plan.add_close(stdout_pipe.read_raw_fd())?;
        plan.add_close(stderr_pipe.read_raw_fd())?;
        plan.add_dup2(stdout_pipe.write_raw_fd(), libc::STDOUT_FILENO)?;
        plan.add_dup2(stderr_pipe.write_raw_fd(), libc::STDERR_FILENO)?;
        plan.add_close(stdout_pipe.write_raw_fd())?;
        plan.add_close(stderr_pipe.write_raw_fd())?;
        Ok(plan)
    }

    pub(crate) fn as_ptr(&self) -> *const libc::posix_spawn_file_actions_t {
        &self.actions
    }
}

impl Drop for RedirectionPlan {
    fn drop(&mut self) {
        // SAFETY: initialized in new(), destroyed exactly once here.
        unsafe {
            libc::posix_spawn_file_actions_destroy(&mut self.actions);
        }
    }
}
