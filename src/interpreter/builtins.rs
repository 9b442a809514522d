//! Globally bound built-in functions and the console they talk to.

use std::{
	collections::VecDeque,
	io::{self, BufRead, Write},
	rc::Rc,
};

use super::{
	callable::{BuiltInFunction, NativeFunction},
	value::Value,
};
use crate::{environment::Scope, error::interpreter::RuntimeErrorType};

/// Where `out` writes and `inp` reads.
pub trait Console {
	fn write_str(&mut self, text: &str) -> io::Result<()>;

	/// The next input line without its line ending, `None` at end of input.
	fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// The process' standard output and input.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
	fn write_str(&mut self, text: &str) -> io::Result<()> {
		let mut stdout = io::stdout().lock();
		stdout.write_all(text.as_bytes())?;
		stdout.flush()
	}

	fn read_line(&mut self) -> io::Result<Option<String>> {
		let mut line = String::new();
		if io::stdin().lock().read_line(&mut line)? == 0 {
			return Ok(None);
		}
		Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
	}
}

/// An in-memory console: records everything written, serves queued input.
#[derive(Debug, Default)]
pub struct BufferConsole {
	output: String,
	input:  VecDeque<String>,
}

impl BufferConsole {
	pub fn new() -> Self { Self::default() }

	pub fn with_input<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { output: String::new(), input: lines.into_iter().map(Into::into).collect() }
	}

	pub fn output(&self) -> &str { &self.output }

	/// Take the output written so far, leaving the buffer empty.
	pub fn take_output(&mut self) -> String { std::mem::take(&mut self.output) }
}

impl Console for BufferConsole {
	fn write_str(&mut self, text: &str) -> io::Result<()> {
		self.output.push_str(text);
		Ok(())
	}

	fn read_line(&mut self) -> io::Result<Option<String>> { Ok(self.input.pop_front()) }
}

const BUILTINS: [(&str, NativeFunction); 5] = [
	("out", NativeFunction::Variadic(out)),
	("inp", NativeFunction::Nullary(inp)),
	("Bool", NativeFunction::Unary(to_bool)),
	("Num", NativeFunction::Unary(to_number)),
	("Str", NativeFunction::Unary(to_string)),
];

/// Bind every built-in in `scope`.
pub(crate) fn define_builtins(scope: &Scope) {
	for (name, function) in BUILTINS {
		scope.set(name, Value::BuiltIn(Rc::new(BuiltInFunction::new(name, function))));
	}
}

fn console_failure(error: io::Error) -> RuntimeErrorType { RuntimeErrorType::Console(error.to_string()) }

/// Print the arguments separated by spaces, then a newline.
fn out(console: &mut dyn Console, arguments: &[Value]) -> Result<Value, RuntimeErrorType> {
	let line = arguments.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
	console.write_str(&format!("{line}\n")).map_err(console_failure)?;
	Ok(Value::None)
}

/// Read one line, `none` once input is exhausted.
fn inp(console: &mut dyn Console) -> Result<Value, RuntimeErrorType> {
	Ok(console.read_line().map_err(console_failure)?.map_or(Value::None, |line| Value::Str(line.into())))
}

fn to_bool(value: &Value) -> Result<Value, RuntimeErrorType> { Ok(Value::Bool(value.is_truthy())) }

fn to_number(value: &Value) -> Result<Value, RuntimeErrorType> { Ok(Value::Number(value.to_number()?)) }

fn to_string(value: &Value) -> Result<Value, RuntimeErrorType> { Ok(Value::Str(value.to_string().into())) }
