use std::ffi::CString;
use std::fmt;

use crate::error::{Error, Result};

/// Program name plus at most four arguments.
pub const MAX_ARGUMENTS: usize = 5;
/// Background jobs tracked at once.
pub const MAX_JOBS: usize = 4;
/// Stages in one pipeline.
pub const MAX_PIPELINE_STAGES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
	words: Vec<String>,
}

impl ArgumentVector {
	/// Builds a vector from already split words, enforcing `1..=MAX_ARGUMENTS`.
	pub fn new(words: Vec<String>) -> Result<ArgumentVector> {
		if words.is_empty() || words.len() > MAX_ARGUMENTS {
			return Err(Error::Validation(format!(
				"Invalid argument count (1-{} allowed)", MAX_ARGUMENTS)));
		}
		ArgumentVector::unbounded(words)
	}

	/// For invocations the engine assembles itself (compound operators,
	/// `newt`), which are not subject to the user-facing capacity.
	pub fn unbounded(words: Vec<String>) -> Result<ArgumentVector> {
		if words.is_empty() {
			return Err(Error::validation("empty command"));
		}
		// exec cannot carry a NUL; reject it before anything is forked
		if let Some(word) = words.iter().find(|w| w.contains('\0')) {
			return Err(Error::Validation(format!("Nul char in argument: {:?}", word)));
		}
		Ok(ArgumentVector { words: words })
	}

	pub fn program(&self) -> &str {
		&self.words[0]
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn to_cstrings(&self) -> Result<Vec<CString>> {
		self.words.iter().map(|w| CString::new(w.as_bytes()).map_err(Error::from)).collect()
	}
}

impl fmt::Display for ArgumentVector {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.words.join(" "))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode { Input, Truncate, Append }

impl RedirectMode {
	pub fn operator(self) -> &'static str {
		match self {
			RedirectMode::Input => "<",
			RedirectMode::Truncate => ">",
			RedirectMode::Append => ">>",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	pub command: ArgumentVector,
	pub target: String,
	pub mode: RedirectMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus { Unset, Success, Failure }

impl ExecutionStatus {
	pub fn from_code(code: i32) -> ExecutionStatus {
		if code == 0 { ExecutionStatus::Success } else { ExecutionStatus::Failure }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator { And, Or }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePosition { First, Middle, Last }

impl StagePosition {
	pub fn of(index: usize, total: usize) -> StagePosition {
		if index == 0 {
			StagePosition::First
		} else if index + 1 == total {
			StagePosition::Last
		} else {
			StagePosition::Middle
		}
	}
}
