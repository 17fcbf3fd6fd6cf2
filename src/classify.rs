use crate::types::RedirectMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
	Exit,
	NewTerminal,
	Conditional,
	ReversedPipeline,
	WordCount,
	Concatenate,
	MutualAppend,
	Background,
	Pipeline,
	Redirect(RedirectMode),
	Sequence,
	Single,
}

struct Rule {
	matches: fn(&str) -> bool,
	handler: Handler,
}

// First match wins; the order is part of the command language.
const RULES: &[Rule] = &[
	Rule { matches: |l| l == "killterm", handler: Handler::Exit },
	Rule { matches: |l| l == "newt", handler: Handler::NewTerminal },
	Rule { matches: |l| l.contains("&&") || l.contains("||"), handler: Handler::Conditional },
	Rule { matches: |l| l.contains('~'), handler: Handler::ReversedPipeline },
	Rule { matches: |l| l.contains('#'), handler: Handler::WordCount },
	Rule { matches: |l| l.contains("++"), handler: Handler::Concatenate },
	Rule { matches: |l| l.contains('+'), handler: Handler::MutualAppend },
	Rule { matches: |l| l.contains('&') || l == "fg", handler: Handler::Background },
	Rule { matches: |l| l.contains('|'), handler: Handler::Pipeline },
	Rule { matches: |l| l.contains('<'), handler: Handler::Redirect(RedirectMode::Input) },
	Rule { matches: |l| l.contains(">>"), handler: Handler::Redirect(RedirectMode::Append) },
	Rule { matches: |l| l.contains('>'), handler: Handler::Redirect(RedirectMode::Truncate) },
	Rule { matches: |l| l.contains(';'), handler: Handler::Sequence },
];

pub fn classify(line: &str) -> Handler {
	RULES.iter()
		.find(|rule| (rule.matches)(line))
		.map_or(Handler::Single, |rule| rule.handler)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exact_words() {
		assert_eq!(classify("killterm"), Handler::Exit);
		assert_eq!(classify("newt"), Handler::NewTerminal);
		assert_eq!(classify("fg"), Handler::Background);
		assert_eq!(classify("killterm now"), Handler::Single);
		assert_eq!(classify("fgrep x"), Handler::Single);
	}

	#[test]
	fn conditional_outranks_everything_but_exact_words() {
		assert_eq!(classify("ls | wc && echo ok"), Handler::Conditional);
		assert_eq!(classify("false || ls > out"), Handler::Conditional);
	}

	#[test]
	fn compound_operators_outrank_pipes() {
		assert_eq!(classify("a.txt | b.txt # c.txt"), Handler::WordCount);
		assert_eq!(classify("a ~ b | c"), Handler::ReversedPipeline);
		assert_eq!(classify("a ++ b"), Handler::Concatenate);
		assert_eq!(classify("a + b"), Handler::MutualAppend);
	}

	#[test]
	fn background_before_pipe_and_redirection() {
		assert_eq!(classify("sleep 5 &"), Handler::Background);
		assert_eq!(classify("ls | wc &"), Handler::Background);
	}

	#[test]
	fn redirection_modes() {
		assert_eq!(classify("sort < in"), Handler::Redirect(RedirectMode::Input));
		assert_eq!(classify("sort < in > out"), Handler::Redirect(RedirectMode::Input));
		assert_eq!(classify("echo a >> log"), Handler::Redirect(RedirectMode::Append));
		assert_eq!(classify("echo a > log"), Handler::Redirect(RedirectMode::Truncate));
	}

	#[test]
	fn sequence_and_fallback() {
		assert_eq!(classify("ls; pwd"), Handler::Sequence);
		assert_eq!(classify("echo a > x; ls"), Handler::Redirect(RedirectMode::Truncate));
		assert_eq!(classify("ls -l"), Handler::Single);
	}
}
