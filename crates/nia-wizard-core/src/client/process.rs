//! Bounded child-process runs.
//!
//! Agent CLIs can hang (health checks in `mcp list`, login prompts), so every
//! run has a deadline and the child is killed once it passes.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;
use wait_timeout::ChildExt;

/// Run `command` to completion with output captured, or fail with
/// [`io::ErrorKind::TimedOut`] after `timeout`.
pub fn output_within(command: &mut Command, timeout: Duration) -> io::Result<Output> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    // Pipes are drained while waiting; a full pipe would stall the child.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    match child.wait_timeout(timeout)? {
        Some(status) => Ok(Output {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        }),
        None => {
            kill(&mut child);
            Err(timed_out(timeout))
        }
    }
}

/// Run `command` with all output discarded, or fail after `timeout`.
pub fn status_within(command: &mut Command, timeout: Duration) -> io::Result<ExitStatus> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    match child.wait_timeout(timeout)? {
        Some(status) => Ok(status),
        None => {
            kill(&mut child);
            Err(timed_out(timeout))
        }
    }
}

fn kill(child: &mut std::process::Child) {
    if let Err(err) = child.kill() {
        warn!(pid = child.id(), error = %err, "failed to kill timed out process");
    }
    // Reap it; the exit status of a killed child is of no interest.
    let _ = child.wait();
}

fn timed_out(timeout: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("timed out after {}s", timeout.as_secs_f32()),
    )
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
