use crate::position::Span;

/// The first token that could not extend the grammar.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{type}")]
pub struct ParseError {
	pub span:   Span,
	pub r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(span: Span, r#type: ParseErrorType) -> Self { Self { span, r#type } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
	ExpectedExpression,
	ExpectedIdentifier,
	/// A fixed piece of punctuation or a keyword was missing, e.g. `')'`.
	Expected(&'static str),
	/// Tokens left over after the last statement.
	InvalidSyntax,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedExpression => {
				write!(f, "Expected expression: let, if, while, fun, number, string, identifier, '+', '-' or '('")
			}
			ExpectedIdentifier => {
				write!(f, "Expected identifier")
			}
			Expected(what) => {
				write!(f, "Expected {what}")
			}
			InvalidSyntax => {
				write!(f, "Invalid Syntax")
			}
		}
	}
}
