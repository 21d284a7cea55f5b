//! Core domain types for process launch and capture.

/// A single process launch request.
///
/// Immutable once submitted to the runner. The command is either a
/// directory-qualified path or a bare name resolved against `PATH` by
/// the spawn primitive; `args` excludes argv[0] (the runner supplies
/// the command itself as the first argv entry).
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Executable path or `PATH`-searched name. Must be non-empty.
    pub command: String,

    /// Argument vector, excluding argv[0].
    pub args: Vec<String>,

    /// Environment override. `None` inherits the parent environment;
    /// `Some` replaces it entirely with the given variables.
    pub env: Option<Vec<(String, String)>>,

    /// When true, the runner drains stdout/stderr and reaps the child
    /// before returning. When false, it returns right after the spawn
    /// and the caller owns eventual reaping.
    pub wait: bool,
}

impl LaunchRequest {
    /// Create a request that waits for completion and captures output.
    pub fn new(command: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: None,
            wait: true,
        }
    }

    /// Replace the child's environment instead of inheriting it.
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = Some(env);
        self
    }

    /// Launch without waiting: no capture, no reaping by the runner.
    pub fn fire_and_forget(mut self) -> Self {
        self.wait = false;
        self
    }
}

/// Result of a successful launch.
///
/// When the request asked to wait, `stdout`/`stderr` hold exactly the
/// bytes the child wrote, in arrival order. For fire-and-forget
/// launches both buffers are empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// OS-assigned process identifier.
    pub pid: u32,

    /// Bytes the child wrote to its standard output.
    pub stdout: Vec<u8>,

    /// Bytes the child wrote to its standard error.
    pub stderr: Vec<u8>,
}

impl LaunchOutcome {
    /// Standard output as text, with invalid UTF-8 replaced.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error as text, with invalid UTF-8 replaced.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}
