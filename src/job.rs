use nix::sys::wait::WaitStatus;
use nix::unistd::{self, Pid};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::launch;
use crate::parser;
use crate::types::MAX_JOBS;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State { Running, Reaped }

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Job {
	pub pid: Pid,
	pub command: String,
	pub status: Option<WaitStatus>,
}

impl Job {
	pub fn state(&self) -> State {
		match self.status {
			None => State::Running,
			Some(_) => State::Reaped,
		}
	}
}

/// Detached processes in launch order. `reclaim` takes the newest one.
#[derive(Debug, Default)]
pub struct JobTable {
	jobs: Vec<Job>,
}

impl JobTable {
	pub fn new() -> JobTable {
		JobTable { jobs: Vec::with_capacity(MAX_JOBS) }
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}

	pub fn is_full(&self) -> bool {
		self.jobs.len() >= MAX_JOBS
	}

	pub fn jobs(&self) -> &[Job] {
		&self.jobs
	}

	/// Spawns `command` in its own process group without waiting for it.
	pub fn launch(&mut self, command: &str) -> Result<&Job> {
		if self.is_full() {
			return Err(Error::CapacityExceeded(MAX_JOBS));
		}
		let argv = parser::parse_arguments(command)?;
		let pid = launch::spawn(&argv, || {
			unistd::setpgid(Pid::from_raw(0), Pid::from_raw(0))?;
			Ok(())
		})?;
		// set from both sides; the child may already have exec'd (EACCES)
		let _ = unistd::setpgid(pid, pid);
		info!(pid = pid.as_raw(), command, "background job started");
		self.jobs.push(Job { pid: pid, command: command.to_string(), status: None });
		Ok(&self.jobs[self.jobs.len() - 1])
	}

	/// Removes the most recently launched job and blocks until it exits.
	pub fn reclaim(&mut self) -> Result<Option<Job>> {
		let mut job = match self.jobs.pop() {
			Some(job) => job,
			None => { return Ok(None); },
		};
		let status = launch::wait_for(job.pid)?;
		job.status = Some(status);
		debug!(pid = job.pid.as_raw(), state = ?job.state(), ?status, "background job reclaimed");
		Ok(Some(job))
	}
}

/// `a & b &`: launches every non-empty segment, stopping at the first
/// capacity rejection.
pub fn launch_line<R>(table: &mut JobTable, line: &str, mut report: R) where R: FnMut(&Error) {
	for command in parser::parse_background(line) {
		match table.launch(command) {
			Ok(job) => println!("Started background process {}: {}", job.pid, job.command),
			Err(e @ Error::CapacityExceeded(_)) => {
				report(&e);
				break;
			},
			Err(e) => report(&e),
		}
	}
}

/// `fg`
pub fn foreground(table: &mut JobTable) -> Result<()> {
	if table.is_empty() {
		println!("No background processes");
		return Ok(());
	}
	if let Some(job) = table.reclaim()? {
		println!("Process {} brought to foreground", job.pid);
	}
	Ok(())
}
