pub mod interpreter;
pub mod parser;
pub mod scanner;

use std::fmt;

use interpreter::RuntimeError;
use parser::ParseError;
use scanner::ScanError;

use crate::position::Span;

/// The user-facing error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	InvalidCharacter,
	InvalidSyntax,
	RuntimeError,
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ErrorKind::InvalidCharacter => "InvalidCharacter",
			ErrorKind::InvalidSyntax => "InvalidSyntax",
			ErrorKind::RuntimeError => "RuntimeError",
		})
	}
}

/// CyanError is the top-level error type of the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CyanError {
	/// Host failure outside the language, e.g. an unreadable script file
	#[error("InternalError: {0:#}")]
	InternalError(#[from] anyhow::Error),
	/// Scanning stopped at a character it could not accept
	#[error("{kind}: {0}", kind = .0.kind())]
	ScanError(#[from] ScanError),
	/// Parsing stopped at a token that does not fit the grammar
	#[error("InvalidSyntax: {0}")]
	ParseError(#[from] ParseError),
	/// Evaluation failed
	#[error("RuntimeError: {0}")]
	RuntimeError(#[from] RuntimeError),
}

impl CyanError {
	/// `None` for internal errors, which are not part of the language.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			CyanError::InternalError(_) => None,
			CyanError::ScanError(e) => Some(e.kind()),
			CyanError::ParseError(_) => Some(ErrorKind::InvalidSyntax),
			CyanError::RuntimeError(_) => Some(ErrorKind::RuntimeError),
		}
	}

	pub fn span(&self) -> Option<&Span> {
		match self {
			CyanError::InternalError(_) => None,
			CyanError::ScanError(e) => Some(&e.span),
			CyanError::ParseError(e) => Some(&e.span),
			CyanError::RuntimeError(e) => Some(&e.span),
		}
	}

	/// The full diagnostic: traceback, highlighted source excerpt and a final
	/// `<ErrorKind>: <message>` line.
	pub fn to_display_string(&self) -> String {
		let Some(span) = self.span() else { return self.to_string() };
		let header = match self {
			CyanError::RuntimeError(e) => {
				let mut header = String::from("Traceback:\n");
				for entry in &e.traceback {
					header += &format!("  File {}, line {}, in {}.\n", entry.source_name, entry.line, entry.context);
				}
				header
			}
			_ => format!("Traceback: file \"{}\", line {}.\n", span.source.name, span.line()),
		};
		format!("{header}{}\n{self}", span.highlight())
	}
}
