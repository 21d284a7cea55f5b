//! Launch orchestration: pipes, redirection plan, spawn, drain, reap.

use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use spawncap_common::{LaunchOutcome, LaunchRequest, ProcessError, ProcessResult};
use std::fs::File;
use tracing::debug;

use crate::drain::{drain_streams, StreamBuffers};
use crate::pipe::CapturePipe;
use crate::plan::RedirectionPlan;
use crate::spawn::{spawn_child, CStringTable};
use crate::validation::validate_request;

/// Synchronous process launcher with stdout/stderr capture.
///
/// Each call owns its own pipes, plan and buffers; there is no shared
/// state between invocations, so concurrent calls from independent
/// threads need no coordination.
pub struct ProcessRunner;

impl ProcessRunner {
    /// Launch the requested command.
    ///
    /// When `request.wait` is set, blocks until the child has closed
    /// both captured streams and has been reaped, and returns the full
    /// captured output. Otherwise returns right after the spawn with
    /// empty buffers; the caller must eventually [`ProcessRunner::reap`]
    /// the child (or wait on it by other means) to avoid a zombie.
    ///
    /// On any error no descriptors created by this call remain open in
    /// the parent.
    pub fn run(request: &LaunchRequest) -> ProcessResult<LaunchOutcome> {
        validate_request(request)?;

        let stdout_pipe = CapturePipe::new()?;
        let stderr_pipe = CapturePipe::new()?;

        let plan = RedirectionPlan::stdio_capture(&stdout_pipe, &stderr_pipe)?;
        let argv = CStringTable::argv(&request.command, &request.args)?;
        let envp = CStringTable::envp(request.env.as_deref())?;

        let spawned = spawn_child(&argv, &envp, &plan);
        drop(plan);

        // The parent never writes to these pipes. The write ends are
        // closed before the spawn status is even inspected: if they
        // stayed open, the drain loop below would wait forever for an
        // EOF the child's exit alone cannot produce.
        let stdout_read = stdout_pipe.close_write();
        let stderr_read = stderr_pipe.close_write();

        let pid = spawned?;
        debug!(pid, command = %request.command, wait = request.wait, "spawned child process");

        if !request.wait {
            return Ok(LaunchOutcome {
                pid,
                stdout: Vec::new(),
                stderr: Vec::new(),
            });
        }

        let mut buffers = StreamBuffers::default();
        let drained = drain_streams(File::from(stdout_read), File::from(stderr_read), &mut buffers);

        // Reap even when the drain failed, so no zombie is left behind;
        // the drain error still takes precedence in the result.
        let reaped = Self::reap(pid);
        drained?;
        reaped?;

        Ok(LaunchOutcome {
            pid,
            stdout: buffers.stdout,
            stderr: buffers.stderr,
        })
    }

    /// Block until the child with the given PID terminates and collect
    /// its exit status. The status is logged, not surfaced.
    pub fn reap(pid: u32) -> ProcessResult<()> {
        match waitpid(Pid::from_raw(pid as i32), None) {
            Ok(status) => {
                debug!(pid, ?status, "reaped child process");
                Ok(())
            }
            Err(e) => Err(ProcessError::wait_failed(pid, e.desc())),
        }
    }
}
