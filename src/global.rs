use crate::config::Config;
use crate::job::JobTable;

pub struct State {
	pub config: Config,
	pub job_table: JobTable,
}

impl State {
	pub fn new(config: Config) -> State {
		State { config: config, job_table: JobTable::new() }
	}
}

impl Default for State {
	fn default() -> State {
		State::new(Config::default())
	}
}
