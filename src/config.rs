pub const DEFAULT_PROMPT: &'static str = "mbash25$";

/// Runtime settings of one engine instance.
///
/// Capacities are not configurable; see the constants in `types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub prompt: String,
	/// Terminal launcher used by `newt`; the engine executable is appended.
	pub terminal: Vec<String>,
	/// Word counter used by `#`; one filename is appended per invocation.
	pub word_count: Vec<String>,
	/// Concatenation program used by `++`; all filenames are appended.
	pub concatenate: String,
}

impl Default for Config {
	fn default() -> Config {
		Config {
			prompt: DEFAULT_PROMPT.to_string(),
			terminal: vec!["xterm".to_string(), "-e".to_string()],
			word_count: vec!["wc".to_string(), "-w".to_string()],
			concatenate: "cat".to_string(),
		}
	}
}

impl Config {
	/// Splits a launcher given on the command line, e.g. `"gnome-terminal --"`.
	pub fn with_terminal(mut self, launcher: &str) -> Config {
		let words: Vec<String> = launcher.split_whitespace().map(str::to_string).collect();
		if !words.is_empty() {
			self.terminal = words;
		}
		self
	}

	pub fn with_prompt<S: Into<String>>(mut self, prompt: S) -> Config {
		self.prompt = prompt.into();
		self
	}
}
