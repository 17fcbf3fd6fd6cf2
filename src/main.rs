use std::io;
use std::io::{BufRead, Write};
use std::process;

use clap::Parser;
use mbash::{Config, Flow, State};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mbash", version, about = "Line-oriented command engine")]
struct Args {
	/// Prompt printed before each line
	#[arg(long, env = "MBASH_PROMPT")]
	prompt: Option<String>,

	/// Terminal launcher used by `newt`, e.g. "xterm -e"
	#[arg(long, env = "MBASH_TERMINAL")]
	terminal: Option<String>,

	/// Run one line and exit
	#[arg(short = 'c')]
	command: Option<String>,

	/// Debug logging on stderr
	#[arg(short, long)]
	debug: bool,
}

fn init_logging(debug: bool) {
	let level = if debug { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
		.init();
}

fn main() {
	let args = Args::parse();
	init_logging(args.debug);

	let mut config = Config::default();
	if let Some(prompt) = args.prompt {
		config = config.with_prompt(prompt);
	}
	if let Some(terminal) = args.terminal {
		config = config.with_terminal(&terminal);
	}
	let mut state = State::new(config);

	if let Some(line) = args.command {
		if let Flow::Exit(code) = mbash::eval(&mut state, line.trim()) {
			process::exit(code);
		}
		return;
	}

	let mut stdout = io::stdout();
	let stdin = io::stdin();
	let mut stdin_locked = stdin.lock();
	loop {
		let _ = stdout.write_all(state.config.prompt.as_bytes());
		let _ = stdout.flush();
		let mut line = String::new();
		match stdin_locked.read_line(&mut line) {
			Ok(0) => { break; },
			Ok(_) => {},
			Err(e) => {
				let invalid = e.kind() == io::ErrorKind::InvalidData;
				mbash::eval::report(&e.into());
				if invalid { continue; } else { break; }
			},
		}
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		if let Flow::Exit(code) = mbash::eval(&mut state, line) {
			process::exit(code);
		}
	}
}
