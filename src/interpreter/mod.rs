//! Cyan tree-walking interpreter.
//!
//! The interpreter walks the abstract syntax tree (AST) produced by the parser,
//! recursively evaluating each node against a scope and computing its runtime
//! value.
//!
//! # Node Types
//!
//! - **Literals**: `none`, booleans, numbers, strings
//! - **Unary**: `+`, `-` (sugar for multiplying by `-1`), `not`
//! - **Binary**: arithmetic, comparisons, `and`/`or` (both sides always
//!   evaluated)
//! - **Variables**: lookup through the scope chain, `let` binds in the current
//!   scope only
//! - **Control flow**: `if ... then ... else ...` and `while`, both
//!   expressions
//! - **Functions**: definitions close over the defining scope, each call runs
//!   in a fresh child of that scope

pub(crate) mod builtins;
pub(crate) mod callable;
pub(crate) mod value;

use std::rc::Rc;

pub use builtins::{BufferConsole, Console, StdConsole};
use callable::Function;
use log::trace;
pub use value::{Number, Value};

use crate::{
	environment::Scope,
	error::interpreter::{Frame, RuntimeError, RuntimeErrorType},
	parser::node::{BinaryOperator, Node, NodeKind, UnaryOperator},
	scanner::Literal,
	utils::grow_stack,
};

/// Interpreter limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	/// Nested user function calls allowed before evaluation fails with a
	/// recursion error.
	pub max_call_depth: usize,
}

impl Default for Config {
	fn default() -> Self { Self { max_call_depth: 1000 } }
}

/// Interpreter that evaluates Cyan nodes.
pub(crate) struct Interpreter<'a> {
	console: &'a mut dyn Console,
	config:  Config,
}

impl<'a> Interpreter<'a> {
	pub fn new(console: &'a mut dyn Console, config: Config) -> Self { Self { console, config } }

	/// Evaluate a whole program in `scope`, at module level.
	pub fn interpret(&mut self, program: &Node, scope: &Scope) -> Result<Value, RuntimeError> {
		self.evaluate(program, scope, &Frame::module())
	}

	/// Evaluate the given node and return its value.
	fn evaluate(&mut self, node: &Node, scope: &Scope, frame: &Rc<Frame>) -> Result<Value, RuntimeError> {
		grow_stack(|| self.evaluate_node(node, scope, frame))
	}

	fn evaluate_node(&mut self, node: &Node, scope: &Scope, frame: &Rc<Frame>) -> Result<Value, RuntimeError> {
		let error = |r#type: RuntimeErrorType| RuntimeError::new(r#type, node.span.clone(), frame);

		Ok(match &node.kind {
			NodeKind::Statements(statements) => {
				let mut last = Value::None;
				for statement in statements {
					last = self.evaluate(statement, scope, frame)?;
				}
				// Only a single statement passes its value on.
				if statements.len() == 1 { last } else { Value::None }
			}
			NodeKind::Pass => Value::None,
			NodeKind::Number(n) => Value::Number(*n),
			NodeKind::Literal(literal) => match literal {
				Literal::True => Value::Bool(true),
				Literal::False => Value::Bool(false),
				Literal::None => Value::None,
			},
			NodeKind::String(s) => Value::Str(s.clone()),
			NodeKind::Variable(name) => {
				scope.get(name).ok_or_else(|| error(RuntimeErrorType::UndefinedVariable(name.clone())))?
			}
			NodeKind::Assign { name, value } => {
				let value = self.evaluate(value, scope, frame)?;
				scope.set(name.as_str(), value.clone());
				value
			}
			NodeKind::Binary { left, operator, right } => {
				let left = self.evaluate(left, scope, frame)?;
				let right = self.evaluate(right, scope, frame)?;
				left.binary_op(*operator, &right).map_err(error)?
			}
			NodeKind::Unary { operator, operand } => {
				let operand = self.evaluate(operand, scope, frame)?;
				match operator {
					UnaryOperator::Plus => operand,
					UnaryOperator::Minus => {
						operand.binary_op(BinaryOperator::Multiply, &Value::Number(Number::Int(-1))).map_err(error)?
					}
					UnaryOperator::Not => operand.logical_not().map_err(error)?,
				}
			}
			NodeKind::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition, scope, frame)?.is_truthy() {
					self.evaluate(then_branch, scope, frame)?
				} else {
					self.evaluate(else_branch, scope, frame)?
				}
			}
			NodeKind::While { condition, body } => {
				while self.evaluate(condition, scope, frame)?.is_truthy() {
					self.evaluate(body, scope, frame)?;
				}
				Value::None
			}
			NodeKind::FunctionDef(definition) => {
				let function = Value::Function(Rc::new(Function::new(definition.clone(), scope.clone())));
				// Bound in the defining scope so the body can call itself.
				scope.set(definition.name.as_ref(), function.clone());
				function
			}
			NodeKind::Call { callee, arguments } => {
				let callee = self.evaluate(callee, scope, frame)?;
				let arguments =
					arguments.iter().map(|argument| self.evaluate(argument, scope, frame)).collect::<Result<Vec<_>, _>>()?;
				self.call(&callee, arguments, node, frame)?
			}
		})
	}

	fn call(
		&mut self,
		callee: &Value,
		arguments: Vec<Value>,
		node: &Node,
		frame: &Rc<Frame>,
	) -> Result<Value, RuntimeError> {
		let error = |r#type: RuntimeErrorType| RuntimeError::new(r#type, node.span.clone(), frame);

		match callee {
			Value::BuiltIn(builtin) => {
				trace!("call built-in {} with {} arguments", builtin.name, arguments.len());
				builtin.call(&mut *self.console, &arguments).map_err(error)
			}
			Value::Function(function) => {
				function.arity().check(function.name(), arguments.len()).map_err(error)?;
				if frame.depth >= self.config.max_call_depth {
					return Err(error(RuntimeErrorType::RecursionLimit));
				}
				trace!("call {} at depth {}", function.name(), frame.depth + 1);

				let definition = &function.definition;
				let frame = Frame::call(definition.name.clone(), frame, node.span.clone());
				let scope = function.closure.child();
				for (parameter, argument) in definition.parameters.iter().zip(arguments) {
					scope.set(parameter.as_str(), argument);
				}
				self.evaluate(&definition.body, &scope, &frame)
			}
			_ => Err(error(RuntimeErrorType::NotCallable(callee.type_name()))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{parser::Parser, scanner::tokenize};

	fn run_with(source: &str, config: Config) -> (Result<Value, RuntimeError>, String) {
		let program = Parser::new(tokenize("<test>", source).unwrap()).parse().unwrap();
		let mut console = BufferConsole::new();
		let result = Interpreter::new(&mut console, config).interpret(&program, &Scope::global());
		(result, console.take_output())
	}

	fn evaluate(source: &str) -> String {
		match run_with(source, Config::default()).0 {
			Ok(value) => value.to_string(),
			Err(error) => format!("error: {error}"),
		}
	}

	fn output(source: &str) -> String { run_with(source, Config::default()).1 }

	#[test]
	fn evaluate_arithmetic() {
		assert_eq!(evaluate("2 + 3 * 4"), "14");
		assert_eq!(evaluate("2 ** 3 ** 2"), "512");
		assert_eq!(evaluate("(2 ** 3) ** 2"), "64");
		assert_eq!(evaluate("5 / 2"), "2.5");
		assert_eq!(evaluate("-2 ** 2"), "-4");
		assert_eq!(evaluate("+7"), "7");
		assert_eq!(evaluate("-(1.5)"), "-1.5");
		assert_eq!(evaluate("5 / 0"), "error: Division by Zero");
		assert_eq!(evaluate("-\"x\""), "error: String does not support * operator with Number");
	}

	#[test]
	fn evaluate_logic() {
		assert_eq!(evaluate("1 < 2 and 2 < 3"), "true");
		assert_eq!(evaluate("not 1 == 1"), "false");
		assert_eq!(evaluate("none == none"), "true");
		assert_eq!(evaluate("\"a\" == 1"), "false");
		assert_eq!(evaluate("not \"a\""), "error: String does not support 'not' logic with String");
	}

	#[test]
	fn logic_evaluates_both_sides() {
		assert_eq!(output("fun t() { out(\"t\"); true }\nfalse and t()"), "t\n");
		assert_eq!(output("fun t() { out(\"t\"); true }\ntrue or t()"), "t\n");
	}

	#[test]
	fn statements_value() {
		assert_eq!(evaluate("42"), "42");
		assert_eq!(evaluate("1; 2"), "none");
		assert_eq!(evaluate("pass"), "none");
		assert_eq!(evaluate("let x = 3"), "3");
	}

	#[test]
	fn variables() {
		assert_eq!(evaluate("let x = 1\nlet y = x + 1\nout(y)"), "none");
		assert_eq!(output("let x = 1\nlet y = x + 1\nout(y)"), "2\n");
		assert_eq!(evaluate("nope"), "error: 'nope' not defined");
		assert_eq!(evaluate("let a = let b = 5"), "5");
	}

	#[test]
	fn conditionals() {
		assert_eq!(evaluate("if 1 < 2 then \"yes\" else \"no\""), "yes");
		assert_eq!(evaluate("if 0 then 1 else if \"\" then 2 else 3"), "3");
		assert_eq!(output("if none then { out(1) } else { out(2); out(3) }"), "2\n3\n");
		assert_eq!(output("if true then out(1) else undefined_name"), "1\n");
	}

	#[test]
	fn while_loops() {
		assert_eq!(output("let i = 0\nwhile i < 3 {\n  out(i)\n  let i = i + 1\n}"), "0\n1\n2\n");
		assert_eq!(evaluate("let i = 0; while i < 3 { let i = i + 1 }"), "none");
	}

	#[test]
	fn functions() {
		assert_eq!(evaluate("fun add(a, b) { a + b }\nadd(2, 3)"), "none");
		assert_eq!(output("fun add(a, b) { a + b }\nout(add(2, 3))"), "5\n");
		assert_eq!(evaluate("fun f() { 1 }"), "<Function f>");
		assert_eq!(evaluate("fun () { 1 }"), "<Function [lambda]>");
		assert_eq!(evaluate("out"), "<Built-in Function out>");
		assert_eq!(output("let twice = fun (f, x) { f(f(x)) }\nout(twice(fun (n) { n * 2 }, 3))"), "12\n");
		assert_eq!(output("fun make() { fun (x) { x + 1 } }\nout(make()(1))"), "2\n");
	}

	#[test]
	fn function_scoping() {
		assert_eq!(output("let x = 1; fun f() { let x = 2; out(x) }; f(); out(x)"), "2\n1\n");
		assert_eq!(
			output("let x = \"captured\"\nfun show() { out(x) }\nfun caller() { let x = \"caller\"; show() }\ncaller()"),
			"captured\n"
		);
	}

	#[test]
	fn recursion() {
		let source = "fun fact(n) { if n < 2 then 1 else n * fact(n - 1) }\nlet n = 99\nout(fact(10))\nout(n)";
		assert_eq!(output(source), "3628800\n99\n");
	}

	#[test]
	fn call_errors() {
		assert_eq!(evaluate("fun f(a) { a }\nf(1, 2)"), "error: Too many arguments, 2 given into 'f', takes 1");
		assert_eq!(evaluate("fun f(a, b) { a }\nf(1)"), "error: Not enough arguments, 1 given into 'f', takes 2");
		assert_eq!(evaluate("inp(1)"), "error: Too many arguments, 1 given into 'inp', takes 0");
		assert_eq!(evaluate("let x = 3\nx()"), "error: Number is not callable");
	}

	#[test]
	fn recursion_limit() {
		let (result, _) = run_with("fun loop(n) { loop(n + 1) }\nloop(0)", Config { max_call_depth: 40 });
		let error = result.unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::RecursionLimit);
		assert_eq!(error.traceback.len(), 41);
	}

	#[test]
	fn traceback_names_call_contexts() {
		let (result, _) = run_with("fun inner() { 1 / 0 }\nfun outer() {\n  inner()\n}\nouter()", Config::default());
		let error = result.unwrap_err();
		let contexts: Vec<_> = error.traceback.iter().map(|entry| (entry.line, entry.context.to_string())).collect();
		assert_eq!(contexts, vec![
			(1, "inner".to_string()),
			(3, "outer".to_string()),
			(5, "<module>".to_string())
		]);
		assert_eq!(error.span.text(), "1 / 0");
	}
}
