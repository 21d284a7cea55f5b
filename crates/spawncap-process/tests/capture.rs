//! End-to-end launch-and-capture tests against real child processes.

use spawncap_process::{process_exists, LaunchRequest, ProcessError, ProcessRunner};
use std::time::{Duration, Instant};

#[test]
fn test_directory_listing_is_captured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker-file.txt"), b"x").unwrap();

    let request = LaunchRequest::new("/bin/ls", ["-al", dir.path().to_str().unwrap()]);
    let outcome = ProcessRunner::run(&request).unwrap();

    assert!(outcome.pid > 0);
    assert!(!outcome.stdout.is_empty());
    assert!(outcome.stdout_text().contains("marker-file.txt"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn test_nonexistent_command_fails_to_spawn() {
    let request = LaunchRequest::new("/definitely/not/here/no-such-binary", Vec::<String>::new());
    let err = ProcessRunner::run(&request).unwrap_err();
    assert!(matches!(err, ProcessError::SpawnFailed { .. }));
}

#[test]
fn test_command_is_resolved_on_path() {
    // Bare name, resolved the way a shell would resolve it.
    let request = LaunchRequest::new("ls", ["/"]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert!(!outcome.stdout.is_empty());
}

#[test]
fn test_silent_child_produces_empty_buffers() {
    let request = LaunchRequest::new("/bin/true", Vec::<String>::new());
    let outcome = ProcessRunner::run(&request).unwrap();
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.is_empty());
}

#[test]
fn test_interleaved_streams_are_captured_exactly() {
    // 100 writes of 100 bytes to each stream, interleaved by the child.
    let script = r#"i=0
while [ "$i" -lt 100 ]; do
    printf '%0100d' "$i"
    printf '%0100d' "$i" >&2
    i=$((i+1))
done"#;
    let request = LaunchRequest::new("/bin/sh", ["-c", script]);
    let outcome = ProcessRunner::run(&request).unwrap();

    let expected: String = (0..100).map(|i| format!("{:0100}", i)).collect();
    assert_eq!(outcome.stdout.len(), 10_000);
    assert_eq!(outcome.stderr.len(), 10_000);
    assert_eq!(outcome.stdout_text(), expected);
    assert_eq!(outcome.stderr_text(), expected);
}

#[test]
fn test_output_beyond_pipe_capacity_is_not_truncated() {
    // Well past both the internal read chunk and the kernel pipe buffer,
    // so the child necessarily blocks until the parent drains.
    let request = LaunchRequest::new("/bin/sh", ["-c", "head -c 200000 /dev/zero"]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert_eq!(outcome.stdout.len(), 200_000);
    assert!(outcome.stdout.iter().all(|b| *b == 0));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn test_stream_closed_early_by_child_is_dropped_from_poll_set() {
    // The child closes stdout, then keeps writing to stderr. The drain
    // loop must stop polling the exhausted stream and keep serving the
    // open one.
    let script = "printf out; exec 1>&-; sleep 0.2; printf err >&2";
    let request = LaunchRequest::new("/bin/sh", ["-c", script]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert_eq!(outcome.stdout_text(), "out");
    assert_eq!(outcome.stderr_text(), "err");
}

#[test]
fn test_environment_override_replaces_parent_environment() {
    let script = r#"printf '%s|%s' "$SPAWNCAP_MARKER" "${HOME:-unset}""#;
    let request = LaunchRequest::new("/bin/sh", ["-c", script])
        .with_env(vec![("SPAWNCAP_MARKER".to_string(), "present".to_string())]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert_eq!(outcome.stdout_text(), "present|unset");
}

#[test]
fn test_inherited_environment_reaches_the_child() {
    // PATH exists in the parent and must be visible without an override.
    let script = r#"printf '%s' "${PATH:+set}""#;
    let request = LaunchRequest::new("/bin/sh", ["-c", script]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert_eq!(outcome.stdout_text(), "set");
}

#[test]
fn test_identical_requests_produce_independent_children() {
    let request = LaunchRequest::new("/bin/echo", ["same output"]);
    let first = ProcessRunner::run(&request).unwrap();
    let second = ProcessRunner::run(&request).unwrap();

    assert_ne!(first.pid, second.pid);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stdout_text(), "same output\n");
}

#[test]
fn test_fire_and_forget_returns_before_the_child_exits() {
    let request = LaunchRequest::new("/bin/sleep", ["1"]).fire_and_forget();

    let started = Instant::now();
    let outcome = ProcessRunner::run(&request).unwrap();
    let elapsed = started.elapsed();

    assert!(outcome.pid > 0);
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.is_empty());
    assert!(
        elapsed < Duration::from_millis(800),
        "run() blocked for {:?} despite wait = false",
        elapsed
    );
    assert!(process_exists(outcome.pid).unwrap());

    // Caller obligation for fire-and-forget launches.
    ProcessRunner::reap(outcome.pid).unwrap();
    assert!(!process_exists(outcome.pid).unwrap());
}

#[test]
fn test_failing_child_is_still_reaped_and_captured() {
    let request = LaunchRequest::new("/bin/ls", ["/definitely/not/here/no-such-dir"]);
    // The spawn itself succeeds; the child exits nonzero after writing
    // its complaint to stderr. Exit status is reaped, not surfaced.
    let outcome = ProcessRunner::run(&request).unwrap();
    assert!(outcome.stdout.is_empty());
    assert!(!outcome.stderr.is_empty());
    assert!(!process_exists(outcome.pid).unwrap());
}

#[test]
fn test_empty_command_is_rejected_without_acquiring_resources() {
    let request = LaunchRequest::new("", Vec::<String>::new());
    let err = ProcessRunner::run(&request).unwrap_err();
    assert!(matches!(err, ProcessError::InvalidArgument { .. }));
}
