use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::types::*;

pub fn parse_arguments(text: &str) -> Result<ArgumentVector> {
	ArgumentVector::new(text.split_whitespace().map(str::to_string).collect())
}

fn build_stages(segments: &[&str]) -> Result<Vec<ArgumentVector>> {
	if segments.len() < 2 || segments.len() > MAX_PIPELINE_STAGES {
		return Err(Error::Validation(format!(
			"Invalid pipeline length (2-{} commands allowed)", MAX_PIPELINE_STAGES)));
	}
	segments.iter().map(|s| parse_arguments(s)).collect()
}

/// `a | b | c`; every stage is validated before anything is spawned.
pub fn parse_pipeline(line: &str) -> Result<Vec<ArgumentVector>> {
	let segments: Vec<&str> = line.split('|').collect();
	build_stages(&segments)
}

/// `c ~ b ~ a` runs as `a | b | c`.
pub fn parse_reversed_pipeline(line: &str) -> Result<Vec<ArgumentVector>> {
	let mut segments: Vec<&str> = line.split('~').map(str::trim).filter(|s| !s.is_empty()).collect();
	if segments.len() < 2 {
		return Err(Error::validation("At least two commands required"));
	}
	segments.reverse();
	build_stages(&segments)
}

pub fn parse_redirect(line: &str, mode: RedirectMode) -> Result<Redirect> {
	let (command, target) = match line.split_once(mode.operator()) {
		Some(parts) => parts,
		None => { return Err(Error::validation(format!("missing '{}'", mode.operator()))); },
	};
	let target = target.trim();
	if target.is_empty() || target.split_whitespace().count() != 1 {
		return Err(Error::validation("Invalid redirection target"));
	}
	Ok(Redirect { command: parse_arguments(command)?, target: target.to_string(), mode: mode })
}

pub fn parse_sequence(line: &str) -> Vec<&str> {
	line.split(';').map(str::trim).filter(|s| !s.is_empty()).collect()
}

pub fn parse_background(line: &str) -> Vec<&str> {
	line.split('&').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Filenames around a compound operator, e.g. `a.txt # b.txt`.
pub fn parse_files(line: &str, operator: &str, allowed: RangeInclusive<usize>) -> Result<Vec<String>> {
	let files: Vec<String> = line.split(operator)
		.flat_map(str::split_whitespace)
		.map(str::to_string)
		.collect();
	if !allowed.contains(&files.len()) {
		let msg = if allowed.start() == allowed.end() {
			format!("Exactly {} files required", allowed.start())
		} else {
			format!("Invalid file count ({}-{} allowed)", allowed.start(), allowed.end())
		};
		return Err(Error::Validation(msg));
	}
	Ok(files)
}

struct Parser<'a> {
	line: &'a [u8],
	i: usize,
}

impl<'a> Parser<'a> {
	fn peek_operator(&self) -> Option<Operator> {
		match (self.line.get(self.i), self.line.get(self.i + 1)) {
			(Some(&b'&'), Some(&b'&')) => Some(Operator::And),
			(Some(&b'|'), Some(&b'|')) => Some(Operator::Or),
			_ => None,
		}
	}

	fn proceed_until_operator(&mut self) {
		while self.i < self.line.len() && self.peek_operator().is_none() {
			self.i += 1;
		}
	}
}

/// Single left-to-right pass over an `&&`/`||` chain.
///
/// Yields each segment together with the operator that follows it, `None`
/// for the last one.
pub struct ChainScanner<'a> {
	text: &'a str,
	parser: Parser<'a>,
	done: bool,
}

impl<'a> ChainScanner<'a> {
	pub fn new(text: &'a str) -> ChainScanner<'a> {
		ChainScanner { text: text, parser: Parser { line: text.as_bytes(), i: 0 }, done: false }
	}
}

impl<'a> Iterator for ChainScanner<'a> {
	type Item = (&'a str, Option<Operator>);

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let orig = self.parser.i;
		self.parser.proceed_until_operator();
		// both operators are ASCII, so `i` always sits on a char boundary
		let segment = &self.text[orig .. self.parser.i];
		match self.parser.peek_operator() {
			Some(op) => {
				self.parser.i += 2;
				Some((segment, Some(op)))
			},
			None => {
				self.done = true;
				Some((segment, None))
			},
		}
	}
}
