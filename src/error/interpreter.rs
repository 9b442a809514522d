use std::rc::Rc;

use crate::position::Span;

/// One call context: the function being run and the call site it was
/// entered from. The chain of parents is the call stack.
#[derive(Debug)]
pub struct Frame {
	pub name:   Rc<str>,
	pub parent: Option<Rc<Frame>>,
	pub entry:  Option<Span>,
	/// Number of calls between this frame and the module.
	pub depth:  usize,
}

impl Frame {
	/// The outermost context of every run.
	pub fn module() -> Rc<Self> { Rc::new(Self { name: "<module>".into(), parent: None, entry: None, depth: 0 }) }

	pub fn call(name: Rc<str>, parent: &Rc<Frame>, entry: Span) -> Rc<Self> {
		Rc::new(Self { name, parent: Some(parent.clone()), entry: Some(entry), depth: parent.depth + 1 })
	}
}

/// A traceback line: which context was running and at which line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
	pub source_name: String,
	pub line:        usize,
	pub context:     Rc<str>,
}

/// Errors that can occur during evaluation. The traceback is captured when
/// the error is created, innermost context first.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{type}")]
pub struct RuntimeError {
	pub span:      Span,
	pub r#type:    RuntimeErrorType,
	pub traceback: Vec<TraceEntry>,
}

impl RuntimeError {
	pub fn new(r#type: RuntimeErrorType, span: Span, frame: &Frame) -> Self {
		let mut traceback = Vec::new();
		let mut at = span.clone();
		let mut frame = Some(frame);
		while let Some(current) = frame {
			traceback.push(TraceEntry {
				source_name: at.source.name.clone(),
				line:        at.line(),
				context:     current.name.clone(),
			});
			let (Some(entry), Some(parent)) = (&current.entry, &current.parent) else { break };
			at = entry.clone();
			frame = Some(parent.as_ref());
		}
		Self { span, r#type, traceback }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
	/// Lookup walked the whole scope chain without a match.
	UndefinedVariable(String),
	/// The left operand has no entry for this operator and right operand.
	UnsupportedOperation { left: &'static str, operation: &'static str, right: &'static str },
	DivisionByZero,
	/// Argument count does not match the callee's parameters.
	ArgumentCount { name: Rc<str>, given: usize, takes: usize },
	NotCallable(&'static str),
	/// A string that reads as neither an integer nor a float.
	InvalidNumber(String),
	/// A value kind with no numeric form.
	NoNumberConversion(&'static str),
	RecursionLimit,
	/// The console sink failed to read or write.
	Console(String),
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			UndefinedVariable(name) => write!(f, "'{name}' not defined"),
			UnsupportedOperation { left, operation, right } => {
				write!(f, "{left} does not support {operation} with {right}")
			}
			DivisionByZero => write!(f, "Division by Zero"),
			ArgumentCount { name, given, takes } => {
				let amount = if given > takes { "Too many" } else { "Not enough" };
				write!(f, "{amount} arguments, {given} given into '{name}', takes {takes}")
			}
			NotCallable(type_name) => write!(f, "{type_name} is not callable"),
			InvalidNumber(text) => write!(f, "Cannot convert to Number: {text}"),
			NoNumberConversion(type_name) => write!(f, "Cannot convert {type_name} to Number"),
			RecursionLimit => write!(f, "Maximum recursion depth exceeded"),
			Console(reason) => write!(f, "Console failure: {reason}"),
		}
	}
}
