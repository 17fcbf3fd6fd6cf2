use std::env;

use tracing::info;

use crate::error::Result;
use crate::eval::Flow;
use crate::global;
use crate::launch;
use crate::types::ArgumentVector;

pub fn builtin_killterm(_: &mut global::State) -> Result<Flow> {
	Ok(Flow::Exit(0))
}

/// Opens another engine in a new terminal window; not awaited.
pub fn builtin_newt(state: &mut global::State) -> Result<Flow> {
	let exe = env::current_exe()?;
	let mut words = state.config.terminal.clone();
	words.push(exe.to_string_lossy().into_owned());
	let argv = ArgumentVector::unbounded(words)?;
	let pid = launch::spawn(&argv, || Ok(()))?;
	info!(pid = pid.as_raw(), command = %argv, "new terminal started");
	Ok(Flow::Continue)
}
