//! Process creation and completion.
//!
//! Every executor goes through [`spawn`] or [`fork_child`]; the child side
//! never returns into the engine, it either becomes the requested program
//! or leaves through `_exit`.

use std::convert::Infallible;
use std::ffi::CString;
use std::io;
use std::io::Write;

use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};
use tracing::debug;

use crate::error::{self, Error, Result};
use crate::types::ArgumentVector;

pub const EXIT_FAILURE: i32 = 1;

pub trait WaitStatusExt {
	fn code(self) -> i32;
}

impl WaitStatusExt for WaitStatus {
	fn code(self) -> i32 {
		match self {
			WaitStatus::Exited(_, code) => code,
			WaitStatus::Signaled(_, sig, _) => 128 + sig as i32,
			_ => EXIT_FAILURE,
		}
	}
}

/// Forks; the child runs `body` and exits with the status it returns.
pub fn fork_child<F>(body: F) -> Result<Pid> where F: FnOnce() -> i32 {
	// anything still buffered would otherwise be written twice
	let _ = io::stdout().flush();
	match unsafe { unistd::fork() }.map_err(Error::Spawn)? {
		ForkResult::Parent { child } => {
			debug!(pid = child.as_raw(), "forked");
			Ok(child)
		},
		ForkResult::Child => {
			let status = body();
			unsafe { libc::_exit(status) }
		},
	}
}

fn do_exec_command<F>(argv: &[CString], prepare: F) -> Result<Infallible> where F: FnOnce() -> Result<()> {
	prepare()?;
	unistd::execvp(&argv[0], argv).map_err(|e| Error::Exec {
		program: argv[0].to_string_lossy().into_owned(),
		source: e,
	})
}

fn exec_command<F>(argv: &[CString], prepare: F) -> i32 where F: FnOnce() -> Result<()> {
	match do_exec_command(argv, prepare) {
		Ok(never) => match never {},
		Err(e) => error::report(&e),
	}
	EXIT_FAILURE
}

/// Spawns `command`, running `prepare` in the child right before the image
/// is replaced. A failing `prepare` is reported by the child, which then
/// exits with failure.
pub fn spawn<F>(command: &ArgumentVector, prepare: F) -> Result<Pid> where F: FnOnce() -> Result<()> {
	// allocate before forking; the child only wires descriptors and execs
	let argv = command.to_cstrings()?;
	let pid = fork_child(move || exec_command(&argv, prepare))?;
	debug!(pid = pid.as_raw(), command = %command, "spawned");
	Ok(pid)
}

pub fn wait_for(pid: Pid) -> Result<WaitStatus> {
	loop {
		match wait::waitpid(pid, None) {
			Err(Errno::EINTR) => continue,
			Err(e) => return Err(Error::Sys(e)),
			Ok(status) => {
				debug!(pid = pid.as_raw(), ?status, "reaped");
				return Ok(status);
			},
		}
	}
}

/// Spawns without any descriptor changes and waits; returns the exit code.
pub fn run(command: &ArgumentVector) -> Result<i32> {
	let pid = spawn(command, || Ok(()))?;
	Ok(wait_for(pid)?.code())
}
