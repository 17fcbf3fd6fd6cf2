use tracing::{debug, error};

use crate::builtin;
use crate::classify::{self, Handler};
use crate::compound;
use crate::conditional;
use crate::error::{Error, Result};
pub use crate::error::report;
use crate::global;
use crate::job;
use crate::launch;
use crate::parser;
use crate::pipeline;
use crate::redirect;
use crate::sequence;

/// Exit status used when forking a plain command fails.
pub const FATAL_STATUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit(i32),
}

fn eval_single(line: &str) -> Result<Flow> {
	let argv = parser::parse_arguments(line)?;
	match launch::run(&argv) {
		Ok(code) => {
			debug!(command = %argv, code, "command finished");
			Ok(Flow::Continue)
		},
		// unlike every other path, a failed fork here ends the engine
		Err(e @ Error::Spawn(_)) => {
			report(&e);
			error!(command = %argv, "fork failed, terminating");
			Ok(Flow::Exit(FATAL_STATUS))
		},
		Err(e) => Err(e),
	}
}

fn dispatch(state: &mut global::State, handler: Handler, line: &str) -> Result<Flow> {
	match handler {
		Handler::Exit => { return builtin::builtin_killterm(state); },
		Handler::NewTerminal => { return builtin::builtin_newt(state); },
		Handler::Conditional => {
			let status = conditional::execute(line, report);
			debug!(?status, "chain finished");
		},
		Handler::ReversedPipeline => pipeline::execute(&parser::parse_reversed_pipeline(line)?)?,
		Handler::WordCount => compound::word_count(&state.config, line, report)?,
		Handler::Concatenate => { compound::concatenate(&state.config, line)?; },
		Handler::MutualAppend => { compound::mutual_append(line)?; },
		Handler::Background => {
			if line == "fg" {
				job::foreground(&mut state.job_table)?;
			} else {
				job::launch_line(&mut state.job_table, line, report);
			}
		},
		Handler::Pipeline => pipeline::execute(&parser::parse_pipeline(line)?)?,
		Handler::Redirect(mode) => { redirect::execute(&parser::parse_redirect(line, mode)?)?; },
		Handler::Sequence => sequence::execute(line, report),
		Handler::Single => { return eval_single(line); },
	}
	Ok(Flow::Continue)
}

/// Runs one trimmed line through exactly one handler.
///
/// Errors are reported here and never stop the engine, except for the exit
/// command and a failed fork of a plain command.
pub fn eval(state: &mut global::State, line: &str) -> Flow {
	let handler = classify::classify(line);
	debug!(line, ?handler, "dispatch");
	match dispatch(state, handler, line) {
		Ok(flow) => flow,
		Err(e) => {
			report(&e);
			Flow::Continue
		},
	}
}
