use std::{cmp::Ordering, fmt, rc::Rc};

use super::callable::{BuiltInFunction, Function};
use crate::{error::interpreter::RuntimeErrorType, parser::node::BinaryOperator};

/// Number is either an integer or a float. Integer arithmetic stays exact
/// until it overflows, then it continues in floating point.
#[derive(Debug, Clone, Copy)]
pub enum Number {
	Int(i64),
	Float(f64),
}

impl Number {
	pub fn as_f64(self) -> f64 {
		match self {
			Number::Int(n) => n as f64,
			Number::Float(n) => n,
		}
	}

	pub fn is_zero(self) -> bool { self.as_f64() == 0.0 }

	/// Apply `int` when both sides are integers and it does not overflow,
	/// `float` otherwise.
	fn arithmetic(self, other: Self, int: fn(i64, i64) -> Option<i64>, float: fn(f64, f64) -> f64) -> Self {
		if let (Number::Int(l), Number::Int(r)) = (self, other)
			&& let Some(n) = int(l, r)
		{
			return Number::Int(n);
		}
		Number::Float(float(self.as_f64(), other.as_f64()))
	}

	pub fn add(self, other: Self) -> Self { self.arithmetic(other, i64::checked_add, |l, r| l + r) }

	pub fn subtract(self, other: Self) -> Self { self.arithmetic(other, i64::checked_sub, |l, r| l - r) }

	pub fn multiply(self, other: Self) -> Self { self.arithmetic(other, i64::checked_mul, |l, r| l * r) }

	/// Division always produces a float. `None` when dividing by zero.
	pub fn divide(self, other: Self) -> Option<Self> {
		if other.is_zero() {
			return None;
		}
		Some(Number::Float(self.as_f64() / other.as_f64()))
	}

	/// Negative exponents produce a float.
	pub fn power(self, other: Self) -> Self {
		self.arithmetic(other, |base, exponent| base.checked_pow(u32::try_from(exponent).ok()?), f64::powf)
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool { self.partial_cmp(other) == Some(Ordering::Equal) }
}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Number::Int(l), Number::Int(r)) => Some(l.cmp(r)),
			_ => self.as_f64().partial_cmp(&other.as_f64()),
		}
	}
}

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Number::Int(n) => write!(f, "{n}"),
			// Debug keeps the fractional part of whole floats, e.g. `2.0`.
			Number::Float(n) => write!(f, "{n:?}"),
		}
	}
}

/// Value represents a runtime value in Cyan.
///
/// Cloning is cheap: strings and functions are shared, so a function value
/// keeps its identity however many times it is read or passed around.
#[derive(Debug, Clone)]
pub enum Value {
	None,
	Bool(bool),
	Number(Number),
	Str(Rc<str>),
	Function(Rc<Function>),
	BuiltIn(Rc<BuiltInFunction>),
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => write!(f, "none"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Number(n) => write!(f, "{n}"),
			Value::Str(s) => write!(f, "{s}"),
			Value::Function(function) => write!(f, "<Function {}>", function.name()),
			Value::BuiltIn(function) => write!(f, "<Built-in Function {}>", function.name),
		}
	}
}

impl From<Number> for Value {
	fn from(n: Number) -> Self { Value::Number(n) }
}

impl From<bool> for Value {
	fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<&str> for Value {
	fn from(s: &str) -> Self { Value::Str(s.into()) }
}

impl Value {
	/// The name of the value's type as it appears in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::None => "None",
			Value::Bool(_) => "Bool",
			Value::Number(_) => "Number",
			Value::Str(_) => "String",
			Value::Function(_) => "Function",
			Value::BuiltIn(_) => "BuiltInFunction",
		}
	}

	/// Determines if the value is considered "true" in a boolean context.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::None => false,
			Value::Bool(b) => *b,
			Value::Number(n) => !n.is_zero(),
			Value::Str(s) => !s.is_empty(),
			Value::Function(_) | Value::BuiltIn(_) => true,
		}
	}

	/// Performs a binary operation between two values. Combinations the left
	/// operand has no rule for are reported as unsupported.
	pub(crate) fn binary_op(&self, operator: BinaryOperator, right: &Self) -> Result<Value, RuntimeErrorType> {
		use BinaryOperator::*;

		let value = match operator {
			Add => self.add(right),
			Subtract => self.numbers(right).map(|(l, r)| l.subtract(r).into()),
			Multiply => self.numbers(right).map(|(l, r)| l.multiply(r).into()),
			Divide => match self.numbers(right) {
				Some((l, r)) => Some(l.divide(r).ok_or(RuntimeErrorType::DivisionByZero)?.into()),
				None => None,
			},
			Power => self.numbers(right).map(|(l, r)| l.power(r).into()),
			Equal => self.equal(right).map(Value::Bool),
			NotEqual => self.equal(right).map(|equal| Value::Bool(!equal)),
			Less => self.numbers(right).map(|(l, r)| Value::Bool(l < r)),
			Greater => self.numbers(right).map(|(l, r)| Value::Bool(l > r)),
			LessEqual => self.numbers(right).map(|(l, r)| Value::Bool(l <= r)),
			GreaterEqual => self.numbers(right).map(|(l, r)| Value::Bool(l >= r)),
			And => self.logic(right, |l, r| l && r),
			Or => self.logic(right, |l, r| l || r),
		};
		value.ok_or_else(|| self.unsupported(operator.description(), right))
	}

	/// `not`, defined for booleans and numbers.
	pub fn logical_not(&self) -> Result<Value, RuntimeErrorType> {
		match self {
			Value::Bool(_) | Value::Number(_) => Ok(Value::Bool(!self.is_truthy())),
			_ => Err(self.unsupported("'not' logic", self)),
		}
	}

	/// The numeric form of the value, as produced by `Num(x)`.
	pub fn to_number(&self) -> Result<Number, RuntimeErrorType> {
		match self {
			Value::Number(n) => Ok(*n),
			Value::Bool(b) => Ok(Number::Int(i64::from(*b))),
			Value::Str(s) => {
				let text = s.trim();
				text.parse()
					.map(Number::Int)
					.or_else(|_| text.parse().map(Number::Float))
					.map_err(|_| RuntimeErrorType::InvalidNumber(s.to_string()))
			}
			_ => Err(RuntimeErrorType::NoNumberConversion(self.type_name())),
		}
	}

	fn numbers(&self, right: &Self) -> Option<(Number, Number)> {
		match (self, right) {
			(Value::Number(l), Value::Number(r)) => Some((*l, *r)),
			_ => None,
		}
	}

	fn add(&self, right: &Self) -> Option<Value> {
		match (self, right) {
			(Value::Number(l), Value::Number(r)) => Some(l.add(*r).into()),
			(Value::Str(l), Value::Str(r)) => Some(Value::Str(format!("{l}{r}").into())),
			_ => None,
		}
	}

	/// A string equals only an equal string, but can be compared with anything.
	fn equal(&self, right: &Self) -> Option<bool> {
		Some(match (self, right) {
			(Value::None, Value::None) => true,
			(Value::Bool(l), Value::Bool(r)) => l == r,
			(Value::Number(l), Value::Number(r)) => l == r,
			(Value::Str(l), Value::Str(r)) => l == r,
			(Value::Str(_), _) => false,
			_ => return None,
		})
	}

	/// Booleans combine with the truthiness of anything, numbers only with
	/// numbers.
	fn logic(&self, right: &Self, combine: fn(bool, bool) -> bool) -> Option<Value> {
		match (self, right) {
			(Value::Bool(_), _) | (Value::Number(_), Value::Number(_)) => {
				Some(Value::Bool(combine(self.is_truthy(), right.is_truthy())))
			}
			_ => None,
		}
	}

	fn unsupported(&self, operation: &'static str, right: &Self) -> RuntimeErrorType {
		RuntimeErrorType::UnsupportedOperation { left: self.type_name(), operation, right: right.type_name() }
	}
}
