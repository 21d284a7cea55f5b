//! Capture pipe creation.

use spawncap_common::{ProcessError, ProcessResult};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};

/// One unidirectional byte pipe backing a captured stream.
///
/// The read end stays in the parent for draining. The write end exists
/// only long enough to be mapped onto the child's stdout or stderr slot
/// by the redirection plan; the parent must close its own copy right
/// after the spawn call, or the drain loop will never see end-of-stream.
#[derive(Debug)]
pub struct CapturePipe {
    read: OwnedFd,
    write: OwnedFd,
}

impl CapturePipe {
    /// Create a fresh pipe pair.
    pub fn new() -> ProcessResult<Self> {
        let (read, write) =
            nix::unistd::pipe().map_err(|e| ProcessError::pipe_creation(e.desc()))?;
        Ok(Self { read, write })
    }

    /// Parent-facing read end.
    pub fn read_fd(&self) -> BorrowedFd<'_> {
        self.read.as_fd()
    }

    /// Raw read-end descriptor, for the redirection plan.
    pub fn read_raw_fd(&self) -> RawFd {
        self.read.as_raw_fd()
    }

    /// Raw write-end descriptor, for the redirection plan.
    pub fn write_raw_fd(&self) -> RawFd {
        self.write.as_raw_fd()
    }

    /// Split into (read, write) owned ends. Test seam for exercising the
    /// drain loop without spawning a child.
    pub(crate) fn into_parts(self) -> (OwnedFd, OwnedFd) {
        (self.read, self.write)
    }

    /// Close the parent's write end and hand back the read end.
    ///
    /// Called immediately after the spawn attempt, whether or not it
    /// succeeded: once the child (if any) holds the only writable copy,
    /// its exit is what produces EOF on the read end.
    pub fn close_write(self) -> OwnedFd {
        let Self { read, write } = self;
        drop(write);
        read
    }
}
