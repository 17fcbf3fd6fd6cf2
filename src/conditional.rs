use tracing::debug;

use crate::error::Error;
use crate::launch;
use crate::parser::{self, ChainScanner};
use crate::types::{ExecutionStatus, Operator};

/// Decides a segment before it runs, from the status of the last segment
/// that actually ran and the operator recorded after the previous segment.
pub fn should_execute(last_status: ExecutionStatus, last_operator: Option<Operator>) -> bool {
	match (last_status, last_operator) {
		(ExecutionStatus::Unset, _) => true,
		(ExecutionStatus::Success, Some(Operator::And)) => true,
		(ExecutionStatus::Failure, Some(Operator::Or)) => true,
		_ => false,
	}
}

/// Evaluates a flat `&&`/`||` chain left to right.
///
/// Skipped segments leave `last_status` untouched but still record the
/// operator that follows them. A segment that fails validation counts as
/// skipped. Returns the final `last_status`.
pub fn execute<R>(line: &str, mut report: R) -> ExecutionStatus where R: FnMut(&Error) {
	let mut last_status = ExecutionStatus::Unset;
	let mut last_operator: Option<Operator> = None;

	for (segment, following) in ChainScanner::new(line) {
		if should_execute(last_status, last_operator) {
			match parser::parse_arguments(segment).and_then(|argv| launch::run(&argv)) {
				Ok(code) => {
					last_status = ExecutionStatus::from_code(code);
					debug!(segment = segment.trim(), code, "chain segment finished");
				},
				Err(e) => report(&e),
			}
		} else {
			debug!(segment = segment.trim(), "chain segment skipped");
		}
		last_operator = following;
	}
	last_status
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_segment_always_runs() {
		assert!(should_execute(ExecutionStatus::Unset, None));
		assert!(should_execute(ExecutionStatus::Unset, Some(Operator::Or)));
	}

	#[test]
	fn and_needs_success_or_needs_failure() {
		assert!(should_execute(ExecutionStatus::Success, Some(Operator::And)));
		assert!(!should_execute(ExecutionStatus::Failure, Some(Operator::And)));
		assert!(should_execute(ExecutionStatus::Failure, Some(Operator::Or)));
		assert!(!should_execute(ExecutionStatus::Success, Some(Operator::Or)));
	}
}
