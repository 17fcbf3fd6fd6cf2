use tracing::debug;

use crate::error::Error;
use crate::launch;
use crate::parser;

/// `a ; b ; c`: each command runs to completion before the next starts,
/// whatever its exit code. Per-command errors go to `report` and the chain
/// goes on.
pub fn execute<R>(line: &str, mut report: R) where R: FnMut(&Error) {
	for command in parser::parse_sequence(line) {
		match parser::parse_arguments(command).and_then(|argv| launch::run(&argv)) {
			Ok(code) => debug!(command, code, "sequence step finished"),
			Err(e) => report(&e),
		}
	}
}
