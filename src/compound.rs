//! The engine's own multi-file operators: `#` (word count), `++`
//! (concatenation) and `+` (mutual append).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{self, Error, Result};
use crate::launch::{self, WaitStatusExt, EXIT_FAILURE};
use crate::parser;
use crate::types::ArgumentVector;

fn with_files(prefix: &[String], files: &[String]) -> Result<ArgumentVector> {
	let mut words = prefix.to_vec();
	words.extend(files.iter().cloned());
	ArgumentVector::unbounded(words)
}

/// One word-count invocation per file, each awaited before the next starts.
pub fn word_count<R>(config: &Config, line: &str, mut report: R) -> Result<()> where R: FnMut(&Error) {
	let files = parser::parse_files(line, "#", 1 ..= 4)?;
	for file in &files {
		let argv = with_files(&config.word_count, std::slice::from_ref(file))?;
		match launch::run(&argv) {
			Ok(code) => debug!(file = %file, code, "word count finished"),
			Err(e) => report(&e),
		}
	}
	Ok(())
}

/// A single concatenation invocation over all files.
pub fn concatenate(config: &Config, line: &str) -> Result<i32> {
	let files = parser::parse_files(line, "++", 2 ..= 5)?;
	let argv = with_files(std::slice::from_ref(&config.concatenate), &files)?;
	launch::run(&argv)
}

fn append_file(from: &Path, to: &Path) -> Result<u64> {
	let mut source = File::open(from).map_err(|e| Error::file_access(from, e))?;
	let mut sink = OpenOptions::new().append(true).create(true).open(to)
		.map_err(|e| Error::file_access(to, e))?;
	Ok(io::copy(&mut source, &mut sink)?)
}

/// Appends `b` to `a`, then the updated `a` to `b`: afterwards
/// `a = a0 b0` and `b = b0 a0 b0`.
pub fn mutual_append_files(a: &Path, b: &Path) -> Result<()> {
	append_file(b, a)?;
	append_file(a, b)?;
	Ok(())
}

/// Whether both paths name the same file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
	match (fs::metadata(a), fs::metadata(b)) {
		(Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
		_ => a == b,
	}
}

/// `a + b`, performed inside one child process.
pub fn mutual_append(line: &str) -> Result<i32> {
	let files = parser::parse_files(line, "+", 2 ..= 2)?;
	let (a, b) = (Path::new(&files[0]), Path::new(&files[1]));
	if same_file(a, b) {
		return Err(Error::validation("Exactly two distinct files required"));
	}
	let pid = launch::fork_child(|| {
		match mutual_append_files(a, b) {
			Ok(()) => {
				println!("Mutually appended {} and {}", a.display(), b.display());
				0
			},
			Err(e) => {
				error::report(&e);
				EXIT_FAILURE
			},
		}
	})?;
	Ok(launch::wait_for(pid)?.code())
}
