use std::os::unix::io::RawFd;

use nix::fcntl::{self, FcntlArg};
use nix::unistd;
use tracing::{debug, warn};

/// Duplicate of a standard descriptor, put back in place on drop.
///
/// Lives exactly as long as one redirection or one pipeline invocation.
#[derive(Debug)]
pub struct SavedDescriptor {
	target: RawFd,
	saved: RawFd,
}

impl SavedDescriptor {
	pub fn save(target: RawFd) -> nix::Result<SavedDescriptor> {
		// close-on-exec so spawned programs never inherit the copy
		let saved = fcntl::fcntl(target, FcntlArg::F_DUPFD_CLOEXEC(0))?;
		debug!(fd = target, saved, "saved descriptor");
		Ok(SavedDescriptor { target: target, saved: saved })
	}
}

impl Drop for SavedDescriptor {
	fn drop(&mut self) {
		if let Err(e) = unistd::dup2(self.saved, self.target) {
			warn!(fd = self.target, error = %e, "failed to restore descriptor");
		}
		if let Err(e) = unistd::close(self.saved) {
			warn!(saved = self.saved, error = %e, "failed to close saved descriptor");
		}
	}
}

/// Saved stdin and stdout, restored together.
#[derive(Debug)]
pub struct SavedStdio {
	_stdin: SavedDescriptor,
	_stdout: SavedDescriptor,
}

impl SavedStdio {
	pub fn save() -> nix::Result<SavedStdio> {
		Ok(SavedStdio {
			_stdin: SavedDescriptor::save(libc::STDIN_FILENO)?,
			_stdout: SavedDescriptor::save(libc::STDOUT_FILENO)?,
		})
	}
}
