//! Readiness-driven drain of the two captured streams.
//!
//! The loop is a small state machine: each stream is Open or Exhausted,
//! a zero-length read moves it to Exhausted, and only Open streams are
//! polled. Draining both streams off a single blocking poll is what
//! avoids the classic deadlock of reading one pipe to EOF while the
//! child blocks writing the other.

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use spawncap_common::{ProcessError, ProcessResult};
use std::fs::File;
use std::io::Read;
use std::os::fd::AsFd;
use tracing::trace;

/// Bytes read per readiness notification.
const READ_CHUNK: usize = 1024;

/// Byte accumulators for the two captured streams, owned by the caller
/// and populated only while waiting for the child.
#[derive(Debug, Default)]
pub struct StreamBuffers {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Open,
    Exhausted,
}

struct DrainStream<'buf> {
    name: &'static str,
    file: File,
    state: StreamState,
    buffer: &'buf mut Vec<u8>,
}

impl DrainStream<'_> {
    /// One bounded read after a readiness notification.
    fn read_chunk(&mut self) -> ProcessResult<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.file.read(&mut chunk) {
                Ok(0) => {
                    trace!(stream = self.name, "stream exhausted");
                    self.state = StreamState::Exhausted;
                    return Ok(());
                }
                Ok(n) => {
                    self.buffer.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(ProcessError::poll_failed(format!(
                        "read on captured {} failed: {}",
                        self.name, e
                    )));
                }
            }
        }
    }
}

/// Drain both pipe read-ends until each reports end-of-stream.
///
/// Blocks indefinitely at the readiness check; there is no timeout and
/// no cancellation. A child that neither writes nor closes its
/// descriptors blocks the caller forever (accepted limitation of the
/// synchronous design).
pub fn drain_streams(
    stdout_read: File,
    stderr_read: File,
    buffers: &mut StreamBuffers,
) -> ProcessResult<()> {
    let StreamBuffers { stdout, stderr } = buffers;
    let mut streams = [
        DrainStream {
            name: "stdout",
            file: stdout_read,
            state: StreamState::Open,
            buffer: stdout,
        },
        DrainStream {
            name: "stderr",
            file: stderr_read,
            state: StreamState::Open,
            buffer: stderr,
        },
    ];

    while streams.iter().any(|s| s.state == StreamState::Open) {
        let mut ready = [false; 2];

        {
            // Poll only the streams still open; an exhausted stream must
            // not re-enter the poll set.
            let mut fds = Vec::with_capacity(streams.len());
            let mut mapping = Vec::with_capacity(streams.len());
            for (index, stream) in streams.iter().enumerate() {
                if stream.state == StreamState::Open {
                    fds.push(PollFd::new(stream.file.as_fd(), PollFlags::POLLIN));
                    mapping.push(index);
                }
            }

            match poll(&mut fds, PollTimeout::NONE) {
                Ok(_) => {}
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(ProcessError::poll_failed(e.desc())),
            }

            for (slot, index) in mapping.into_iter().enumerate() {
                let revents = fds[slot].revents().unwrap_or_else(PollFlags::empty);
                // POLLHUP/POLLERR still need a read: it returns whatever
                // data is left, then zero for end-of-stream.
                ready[index] = revents
                    .intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR);
            }
        }

        for (index, stream) in streams.iter_mut().enumerate() {
            if ready[index] {
                stream.read_chunk()?;
            }
        }
    }

    Ok(())
}
