use std::ffi;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const NAME: &'static str = "mbash";

fn write_report<W: Write>(w: &mut W, e: &Error) -> io::Result<()> {
	writeln!(w, "{}: {}", NAME, e)?;
	w.flush()
}

/// One error line on stderr, used by the engine and by its children alike.
pub fn report(e: &Error) {
	let _ = write_report(&mut io::stderr(), e);
}

#[derive(Debug, Error)]
pub enum Error {
	/// Rejected before any process was created.
	#[error("{0}")]
	Validation(String),

	/// `fork` itself failed.
	#[error("Fork error: {0}")]
	Spawn(#[source] nix::Error),

	/// Raised inside a child that could not run its program.
	#[error("Execution failed: {program}: {source}")]
	Exec {
		program: String,
		#[source]
		source: nix::Error,
	},

	#[error("Open failed: {}: {source}", .path.display())]
	FileAccess {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Background process limit reached ({0} jobs)")]
	CapacityExceeded(usize),

	#[error("System error: {0}")]
	Sys(#[from] nix::Error),

	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	#[error("Nul char in argument: {0}")]
	Nul(#[from] ffi::NulError),
}

impl Error {
	pub fn validation<S: Into<String>>(msg: S) -> Error {
		Error::Validation(msg.into())
	}

	pub fn file_access<P: Into<PathBuf>>(path: P, source: io::Error) -> Error {
		Error::FileAccess { path: path.into(), source: source }
	}
}
