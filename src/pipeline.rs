use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};

use nix::fcntl::OFlag;
use nix::unistd::{self, Pid};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fd::SavedStdio;
use crate::launch;
use crate::types::{ArgumentVector, StagePosition};

#[derive(Debug)]
struct Pipe {
	read: OwnedFd,
	write: OwnedFd,
}

impl Pipe {
	fn raw(&self) -> (RawFd, RawFd) {
		(self.read.as_raw_fd(), self.write.as_raw_fd())
	}
}

// Runs in the stage's child. The bound ends have been duplicated onto
// stdin/stdout, so every original pipe descriptor is closed afterwards.
// The child never drops the parent's `OwnedFd`s: it execs or `_exit`s.
fn bind_stage(pipes: &[(RawFd, RawFd)], i: usize, position: StagePosition) -> Result<()> {
	match position {
		StagePosition::First => {
			unistd::dup2(pipes[0].1, libc::STDOUT_FILENO)?;
		},
		StagePosition::Last => {
			unistd::dup2(pipes[i - 1].0, libc::STDIN_FILENO)?;
		},
		StagePosition::Middle => {
			unistd::dup2(pipes[i - 1].0, libc::STDIN_FILENO)?;
			unistd::dup2(pipes[i].1, libc::STDOUT_FILENO)?;
		},
	}
	for &(read, write) in pipes {
		unistd::close(read)?;
		unistd::close(write)?;
	}
	Ok(())
}

/// Runs `stages` as one pipeline and waits for every stage.
///
/// All pipes exist before the first stage is forked. A stage that cannot be
/// forked is skipped; the remaining stages still run and the first such
/// error is returned once everything has been reaped.
pub fn execute(stages: &[ArgumentVector]) -> Result<()> {
	let n = stages.len();
	if n < 2 {
		return Err(Error::validation("Pipeline needs at least two commands"));
	}

	let _saved = SavedStdio::save()?;

	let mut pipes: Vec<Pipe> = Vec::with_capacity(n - 1);
	for _ in 0 .. n - 1 {
		let (read, write) = unistd::pipe2(OFlag::O_CLOEXEC)?;
		pipes.push(Pipe { read: read, write: write });
	}
	let raw: Vec<(RawFd, RawFd)> = pipes.iter().map(Pipe::raw).collect();
	debug!(stages = n, pipes = ?raw, "pipeline created");

	let mut children: Vec<Pid> = Vec::with_capacity(n);
	let mut first_error = None;
	for (i, stage) in stages.iter().enumerate() {
		let position = StagePosition::of(i, n);
		let raw = raw.clone();
		match launch::spawn(stage, move || bind_stage(&raw, i, position)) {
			Ok(pid) => children.push(pid),
			Err(e) => {
				warn!(stage = i, command = %stage, error = %e, "pipeline stage not started");
				if first_error.is_none() {
					first_error = Some(e);
				}
			},
		}
	}

	// the engine itself uses no pipe end
	drop(pipes);

	for pid in children {
		if let Err(e) = launch::wait_for(pid) {
			warn!(pid = pid.as_raw(), error = %e, "pipeline stage not reaped");
			if first_error.is_none() {
				first_error = Some(e);
			}
		}
	}
	match first_error {
		Some(e) => Err(e),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_stage_is_rejected() {
		let stage = ArgumentVector::new(vec!["true".to_string()]).unwrap();
		match execute(&[stage]) {
			Err(Error::Validation(_)) => {},
			other => panic!("unexpected {:?}", other),
		}
		match execute(&[]) {
			Err(Error::Validation(_)) => {},
			other => panic!("unexpected {:?}", other),
		}
	}
}
