//! The spawn call and the argument/environment vectors around it.
//!
//! Arguments are kept as owned `CString`s in native Rust collections;
//! the NUL-terminated raw pointer array the OS expects is materialized
//! only for the duration of the `posix_spawnp` call.

use nix::errno::Errno;
use spawncap_common::{ProcessError, ProcessResult};
use std::ffi::CString;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStringExt;
use std::ptr;

use crate::plan::RedirectionPlan;

/// An owned set of C strings plus the transient pointer array handed to
/// the OS call boundary. The `CString`s own the bytes; the raw array is
/// rebuilt per call and never outlives them.
#[derive(Debug)]
pub(crate) struct CStringTable {
    strings: Vec<CString>,
}

impl CStringTable {
    /// Argument vector for the child: the command itself first (the
    /// spawn primitive passes it through as argv[0]), then each
    /// caller-supplied argument.
    pub(crate) fn argv(command: &str, args: &[String]) -> ProcessResult<Self> {
        let mut strings = Vec::with_capacity(args.len() + 1);
        strings.push(to_cstring(command)?);
        for arg in args {
            strings.push(to_cstring(arg)?);
        }
        Ok(Self { strings })
    }

    /// Environment vector: the override when one was supplied, otherwise
    /// a snapshot of the parent environment.
    pub(crate) fn envp(overrides: Option<&[(String, String)]>) -> ProcessResult<Self> {
        let strings = match overrides {
            Some(vars) => vars
                .iter()
                .map(|(key, value)| to_cstring(&format!("{}={}", key, value)))
                .collect::<ProcessResult<Vec<_>>>()?,
            None => std::env::vars_os()
                .map(|(key, value)| {
                    let mut bytes = key.into_vec();
                    bytes.push(b'=');
                    bytes.extend(value.into_vec());
                    CString::new(bytes).map_err(|_| {
                        ProcessError::invalid_argument(
                            "environment variable contains a NUL byte",
                        )
                    })
                })
                .collect::<ProcessResult<Vec<_>>>()?,
        };
        Ok(Self { strings })
    }

    /// First entry, used as the file argument of the spawn call.
    fn program(&self) -> Option<&CString> {
        self.strings.first()
    }

    /// NUL-terminated raw array, valid while `self` is alive.
    fn as_raw(&self) -> Vec<*mut c_char> {
        self.strings
            .iter()
            .map(|s| s.as_ptr().cast_mut())
            .chain(std::iter::once(ptr::null_mut()))
            .collect()
    }
}

fn to_cstring(value: &str) -> ProcessResult<CString> {
    CString::new(value).map_err(|_| {
        ProcessError::invalid_argument(format!("'{}' contains a NUL byte", value.escape_debug()))
    })
}

/// Launch the child with the redirection plan applied.
///
/// A non-zero status from `posix_spawnp` is a launch failure; the
/// caller still owns the parent-side pipe cleanup regardless of the
/// outcome here.
pub(crate) fn spawn_child(
    argv: &CStringTable,
    envp: &CStringTable,
    plan: &RedirectionPlan,
) -> ProcessResult<u32> {
    let program = argv
        .program()
        .ok_or_else(|| ProcessError::invalid_argument("empty argument vector"))?;

    let argv_raw = argv.as_raw();
    let envp_raw = envp.as_raw();
    let mut pid: libc::pid_t = 0;

    // SAFETY: program, argv_raw and envp_raw point at NUL-terminated
    // strings owned by the tables, which outlive this call; the plan
    // pointer is valid for the call; pid is a valid out-pointer.
    let rc = unsafe {
        libc::posix_spawnp(
            &mut pid,
            program.as_ptr(),
            plan.as_ptr(),
            ptr::null(),
            argv_raw.as_ptr(),
            envp_raw.as_ptr(),
        )
    };

    if rc != 0 {
        return Err(ProcessError::spawn_failed(
            program.to_string_lossy(),
            Errno::from_raw(rc).desc(),
        ));
    }

    Ok(pid as u32)
}
