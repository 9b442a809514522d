use crate::{error::ErrorKind, position::Span};

/// A scanning error with the offending span and type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{type}")]
pub struct ScanError {
	/// Where the error occurred.
	pub span:   Span,
	/// The type of scanning error.
	pub r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(span: Span, r#type: ScanErrorType) -> Self { Self { span, r#type } }

	pub fn kind(&self) -> ErrorKind { self.r#type.kind() }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// A character outside the lexical grammar.
	InvalidCharacter(char),
	/// `!` only exists as part of `!=`.
	ExpectedEqualAfterBang,
	/// End of input inside a string literal.
	UnterminatedString,
}

impl ScanErrorType {
	pub fn kind(&self) -> ErrorKind {
		match self {
			ScanErrorType::InvalidCharacter(_) => ErrorKind::InvalidCharacter,
			_ => ErrorKind::InvalidSyntax,
		}
	}
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			InvalidCharacter(c) => {
				write!(f, "Character {c:?} is invalid.")
			}
			ExpectedEqualAfterBang => {
				write!(f, "Expected '=' after '!'")
			}
			UnterminatedString => {
				write!(f, "Unterminated string literal")
			}
		}
	}
}
