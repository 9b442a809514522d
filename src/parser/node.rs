//! AST nodes
//!
//! A [`Node`] is a tree structure representing code like `-123 * (45.67)`
//! as nested nodes. Every node knows the span of source it came from.

use std::{fmt, rc::Rc};

use crate::{
	interpreter::Number,
	position::Span,
	scanner::{Keyword, Literal, TokenType},
};

#[derive(Debug)]
pub(crate) struct Node {
	pub kind: NodeKind,
	pub span: Span,
}

#[derive(Debug)]
pub(crate) enum NodeKind {
	/// Statements evaluated in order in the same scope.
	Statements(Vec<Node>),
	Pass,
	Number(Number),
	Literal(Literal),
	String(Rc<str>),
	Binary { left: Box<Node>, operator: BinaryOperator, right: Box<Node> },
	Unary { operator: UnaryOperator, operand: Box<Node> },
	Variable(String),
	Assign { name: String, value: Box<Node> },
	/// `else` is mandatory, so an `if` always produces a value.
	If { condition: Box<Node>, then_branch: Box<Node>, else_branch: Box<Node> },
	While { condition: Box<Node>, body: Box<Node> },
	FunctionDef(Rc<FunctionDef>),
	Call { callee: Box<Node>, arguments: Vec<Node> },
}

/// Shared with every closure created from it.
#[derive(Debug)]
pub(crate) struct FunctionDef {
	/// `[lambda]` for anonymous functions.
	pub name:       Rc<str>,
	pub parameters: Vec<String>,
	pub body:       Node,
}

impl Node {
	pub fn new(kind: NodeKind, span: Span) -> Self { Self { kind, span } }

	/// Top level statements in a program, one for any other node.
	pub fn statement_count(&self) -> usize {
		match &self.kind {
			NodeKind::Statements(statements) => statements.len(),
			_ => 1,
		}
	}

	pub fn binary(left: Node, operator: BinaryOperator, right: Node) -> Self {
		let span = left.span.to(&right.span);
		Self::new(NodeKind::Binary { left: Box::new(left), operator, right: Box::new(right) }, span)
	}

	pub fn unary(operator_span: &Span, operator: UnaryOperator, operand: Node) -> Self {
		let span = operator_span.to(&operand.span);
		Self::new(NodeKind::Unary { operator, operand: Box::new(operand) }, span)
	}

	pub fn assign(keyword_span: &Span, name: String, value: Node) -> Self {
		let span = keyword_span.to(&value.span);
		Self::new(NodeKind::Assign { name, value: Box::new(value) }, span)
	}

	pub fn call(callee: Node, arguments: Vec<Node>, close_span: &Span) -> Self {
		let span = callee.span.to(close_span);
		Self::new(NodeKind::Call { callee: Box::new(callee), arguments }, span)
	}

	pub fn function_def(name: Option<String>, parameters: Vec<String>, body: Node, span: Span) -> Self {
		let name = name.map_or_else(|| Rc::from("[lambda]"), Rc::from);
		Self::new(NodeKind::FunctionDef(Rc::new(FunctionDef { name, parameters, body })), span)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOperator {
	Add,
	Subtract,
	Multiply,
	Divide,
	Power,
	Equal,
	NotEqual,
	Less,
	Greater,
	LessEqual,
	GreaterEqual,
	And,
	Or,
}

impl BinaryOperator {
	pub fn from_token(r#type: &TokenType) -> Option<Self> {
		Some(match r#type {
			TokenType::Plus => Self::Add,
			TokenType::Minus => Self::Subtract,
			TokenType::Star => Self::Multiply,
			TokenType::Slash => Self::Divide,
			TokenType::StarStar => Self::Power,
			TokenType::EqualEqual => Self::Equal,
			TokenType::BangEqual => Self::NotEqual,
			TokenType::Less => Self::Less,
			TokenType::Greater => Self::Greater,
			TokenType::LessEqual => Self::LessEqual,
			TokenType::GreaterEqual => Self::GreaterEqual,
			TokenType::Keyword(Keyword::And) => Self::And,
			TokenType::Keyword(Keyword::Or) => Self::Or,
			_ => return None,
		})
	}

	pub fn symbol(self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Subtract => "-",
			Self::Multiply => "*",
			Self::Divide => "/",
			Self::Power => "**",
			Self::Equal => "==",
			Self::NotEqual => "!=",
			Self::Less => "<",
			Self::Greater => ">",
			Self::LessEqual => "<=",
			Self::GreaterEqual => ">=",
			Self::And => "and",
			Self::Or => "or",
		}
	}

	/// How the operation is named in unsupported-operation errors.
	pub fn description(self) -> &'static str {
		match self {
			Self::Add => "+ operator",
			Self::Subtract => "- operator",
			Self::Multiply => "* operator",
			Self::Divide => "/ operator",
			Self::Power => "** operator",
			Self::Equal => "== operator",
			Self::NotEqual => "!= operator",
			Self::Less => "< operator",
			Self::Greater => "> operator",
			Self::LessEqual => "<= operator",
			Self::GreaterEqual => ">= operator",
			Self::And => "'and' logic",
			Self::Or => "'or' logic",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOperator {
	Plus,
	Minus,
	Not,
}

impl fmt::Display for UnaryOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			UnaryOperator::Plus => "+",
			UnaryOperator::Minus => "-",
			UnaryOperator::Not => "not",
		})
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use NodeKind::*;
		match &self.kind {
			Statements(statements) => {
				let statements = statements.iter().map(ToString::to_string).collect::<Vec<_>>();
				write!(f, "{{{}}}", statements.join("; "))
			}
			Pass => write!(f, "pass"),
			Number(n) => write!(f, "{n}"),
			Literal(literal) => write!(f, "{literal}"),
			String(s) => write!(f, "{s:?}"),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.symbol()),
			Unary { operator, operand } => write!(f, "({operator} {operand})"),
			Variable(name) => write!(f, "{name}"),
			Assign { name, value } => write!(f, "(let {name} {value})"),
			If { condition, then_branch, else_branch } => write!(f, "(if {condition} {then_branch} {else_branch})"),
			While { condition, body } => write!(f, "(while {condition} {body})"),
			FunctionDef(def) => write!(f, "(fun {} ({}) {})", def.name, def.parameters.join(" "), def.body),
			Call { callee, arguments } => {
				let arguments = arguments.iter().map(ToString::to_string).collect::<Vec<_>>();
				write!(f, "(call {callee} ({}))", arguments.join(" "))
			}
		}
	}
}
