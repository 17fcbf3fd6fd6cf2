use std::ffi::CString;
use std::io;

use nix::fcntl::{self, OFlag};
use nix::sys::stat::Mode;
use nix::unistd;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fd::SavedDescriptor;
use crate::launch::{self, WaitStatusExt};
use crate::types::{Redirect, RedirectMode};

fn open_flags(mode: RedirectMode) -> OFlag {
	match mode {
		RedirectMode::Input => OFlag::O_RDONLY,
		RedirectMode::Truncate => OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
		RedirectMode::Append => OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
	}
}

fn standard_fd(mode: RedirectMode) -> i32 {
	match mode {
		RedirectMode::Input => libc::STDIN_FILENO,
		_ => libc::STDOUT_FILENO,
	}
}

/// Runs `redirect.command` with stdin or stdout bound to the target file and
/// waits for it. Returns the command's exit code.
pub fn execute(redirect: &Redirect) -> Result<i32> {
	let fd = standard_fd(redirect.mode);
	let path = CString::new(redirect.target.as_bytes())?;
	let flags = open_flags(redirect.mode);
	let target = redirect.target.clone();

	let saved = SavedDescriptor::save(fd)?;
	let pid = launch::spawn(&redirect.command, move || {
		let file = fcntl::open(path.as_c_str(), flags, Mode::from_bits_truncate(0o644))
			.map_err(|e| Error::file_access(target, io::Error::from(e)))?;
		unistd::dup2(file, fd)?;
		unistd::close(file)?;
		Ok(())
	})?;
	let status = launch::wait_for(pid)?;
	drop(saved);
	debug!(command = %redirect.command, file = %redirect.target, ?status, "redirection finished");
	Ok(status.code())
}
