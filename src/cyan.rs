use std::{fs::read_to_string, path::Path, time::Instant};

use anyhow::Context;
use log::{Level, debug, log_enabled, trace, warn};

use crate::{
	CyanError,
	environment::Scope,
	interpreter::{Config, Console, Interpreter, StdConsole, Value},
	parser::Parser,
	position::Source,
	scanner::Scanner,
};

/// Run `text` once over a fresh global scope, printing to standard output.
pub fn run(source_name: &str, text: &str) -> Result<Value, CyanError> {
	Cyan::new().run_fresh(source_name, text)
}

/// Cyan is the pipeline driver: tokenize, parse, then evaluate.
///
/// It owns one long-lived global scope, so consecutive [`Cyan::run`] calls
/// see each other's bindings the way shell lines do. Files get their own
/// fresh global scope.
pub struct Cyan<C: Console = StdConsole> {
	console: C,
	config:  Config,
	globals: Scope,
}

impl Cyan {
	pub fn new() -> Self { Self::with_console(StdConsole) }
}

impl Default for Cyan {
	fn default() -> Self { Self::new() }
}

impl<C: Console> Cyan<C> {
	pub fn with_console(console: C) -> Self { Self { console, config: Config::default(), globals: Scope::global() } }

	#[must_use]
	pub fn with_config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	pub fn console(&self) -> &C { &self.console }

	pub fn console_mut(&mut self) -> &mut C { &mut self.console }

	/// Run `text` against the persistent global scope.
	pub fn run(&mut self, source_name: &str, text: &str) -> Result<Value, CyanError> {
		let globals = self.globals.clone();
		self.execute(source_name, text, &globals)
	}

	/// Run `text` against a fresh global scope, which is released afterwards.
	pub fn run_fresh(&mut self, source_name: &str, text: &str) -> Result<Value, CyanError> {
		let globals = Scope::global();
		let result = self.execute(source_name, text, &globals);
		globals.release();
		result
	}

	/// Run a script file against a fresh global scope, naming it by its path.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Value, CyanError> {
		let path = path.as_ref();
		let text = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		self.run_fresh(&path.display().to_string(), &text)
	}

	/// Run the interactive shell until input ends. Results other than `none`
	/// are echoed, errors are printed and the shell carries on.
	pub fn run_prompt(&mut self) {
		let mode = if log_enabled!(Level::Debug) { " [DEBUG MODE]" } else { "" };
		self.print(&format!("Cyan {} shell on {}{mode}\n", env!("CARGO_PKG_VERSION"), std::env::consts::OS));
		loop {
			self.print(">>> ");
			let line = match self.console.read_line() {
				Ok(Some(line)) => line,
				Ok(None) => break,
				Err(e) => {
					warn!("Failed read line: {e}");
					break;
				}
			};
			if line.trim().is_empty() {
				continue;
			}
			match self.run("<stdin>", &line) {
				Ok(Value::None) => {}
				Ok(value) => self.print(&format!("{value}\n")),
				Err(e) => self.print(&format!("{}\n", e.to_display_string())),
			}
		}
		self.print("\nExiting...\n");
	}

	fn print(&mut self, text: &str) {
		if let Err(e) = self.console.write_str(text) {
			warn!("Failed write to console: {e}");
		}
	}

	fn execute(&mut self, source_name: &str, text: &str, scope: &Scope) -> Result<Value, CyanError> {
		let source = Source::new(source_name, text);

		let start = Instant::now();
		let tokens = Scanner::new(&source).scan_tokens()?;
		debug!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());
		trace!("TOKENS: {}", tokens.iter().map(|token| format!("{:?}", token.r#type)).collect::<Vec<_>>().join(", "));

		let parsed = Instant::now();
		let program = Parser::new(tokens).parse()?;
		debug!("Parsed {} statements in {:?}", program.statement_count(), parsed.elapsed());

		let evaluated = Instant::now();
		let value = Interpreter::new(&mut self.console, self.config).interpret(&program, scope)?;
		debug!("Run time {:?}, total {:?}", evaluated.elapsed(), start.elapsed());
		Ok(value)
	}
}
