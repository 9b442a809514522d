use std::{fmt, rc::Rc};

use super::{builtins::Console, value::Value};
use crate::{environment::Scope, error::interpreter::RuntimeErrorType, parser::node::FunctionDef};

/// Native body of a built-in, by the arguments it takes. Only the variadic
/// and argument-less ones get to use the console.
#[derive(Clone, Copy)]
pub(crate) enum NativeFunction {
	Variadic(fn(&mut dyn Console, &[Value]) -> Result<Value, RuntimeErrorType>),
	Nullary(fn(&mut dyn Console) -> Result<Value, RuntimeErrorType>),
	Unary(fn(&Value) -> Result<Value, RuntimeErrorType>),
}

impl NativeFunction {
	pub fn arity(self) -> Arity {
		match self {
			NativeFunction::Variadic(_) => Arity::Variadic,
			NativeFunction::Nullary(_) => Arity::Fixed(0),
			NativeFunction::Unary(_) => Arity::Fixed(1),
		}
	}
}

/// How many arguments a callable takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
	Fixed(usize),
	Variadic,
}

impl Arity {
	pub fn check(self, name: &str, given: usize) -> Result<(), RuntimeErrorType> {
		match self {
			Arity::Fixed(takes) if takes != given => Err(argument_count(name, given, takes)),
			_ => Ok(()),
		}
	}
}

fn argument_count(name: &str, given: usize, takes: usize) -> RuntimeErrorType {
	RuntimeErrorType::ArgumentCount { name: name.into(), given, takes }
}

/// A user defined function, closed over the scope it was defined in.
pub struct Function {
	pub(crate) definition: Rc<FunctionDef>,
	pub(crate) closure:    Scope,
}

impl Function {
	pub(crate) fn new(definition: Rc<FunctionDef>, closure: Scope) -> Self { Self { definition, closure } }

	pub fn name(&self) -> &str { &self.definition.name }

	pub fn parameters(&self) -> &[String] { &self.definition.parameters }

	pub fn arity(&self) -> Arity { Arity::Fixed(self.definition.parameters.len()) }
}

// The closure scope usually holds the function itself, so it is left out.
impl fmt::Debug for Function {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Function").field("name", &self.name()).field("parameters", &self.parameters()).finish_non_exhaustive()
	}
}

pub struct BuiltInFunction {
	pub name:            &'static str,
	pub(crate) function: NativeFunction,
}

impl BuiltInFunction {
	pub(crate) fn new(name: &'static str, function: NativeFunction) -> Self { Self { name, function } }

	pub fn arity(&self) -> Arity { self.function.arity() }

	/// Run the native body once the arguments fit its shape.
	pub(crate) fn call(&self, console: &mut dyn Console, arguments: &[Value]) -> Result<Value, RuntimeErrorType> {
		match (self.function, arguments) {
			(NativeFunction::Variadic(function), _) => function(console, arguments),
			(NativeFunction::Nullary(function), []) => function(console),
			(NativeFunction::Unary(function), [argument]) => function(argument),
			(NativeFunction::Nullary(_), _) => Err(argument_count(self.name, arguments.len(), 0)),
			(NativeFunction::Unary(_), _) => Err(argument_count(self.name, arguments.len(), 1)),
		}
	}
}

impl fmt::Debug for BuiltInFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BuiltInFunction").field("name", &self.name).field("arity", &self.arity()).finish_non_exhaustive()
	}
}
