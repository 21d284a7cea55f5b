//! Descriptor-leak detection around launch-and-capture calls.
//!
//! Kept in its own integration binary so no concurrent test can skew
//! the process-wide descriptor count.

#![cfg(target_os = "linux")]

use spawncap_process::{LaunchRequest, ProcessRunner};

fn open_descriptor_count() -> usize {
    // The read_dir handle itself is open during both measurements, so
    // it cancels out of the comparison.
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn test_no_descriptors_remain_open_after_run() {
    // Warm up lazy stdio/runtime descriptors before measuring.
    let warmup = LaunchRequest::new("/bin/true", Vec::<String>::new());
    ProcessRunner::run(&warmup).unwrap();

    let before = open_descriptor_count();

    let request = LaunchRequest::new("/bin/echo", ["leak check"]);
    let outcome = ProcessRunner::run(&request).unwrap();
    assert_eq!(outcome.stdout_text(), "leak check\n");

    let failing = LaunchRequest::new("/definitely/not/here/no-such-binary", Vec::<String>::new());
    ProcessRunner::run(&failing).unwrap_err();

    assert_eq!(
        open_descriptor_count(),
        before,
        "pipe descriptors leaked past run()"
    );
}
