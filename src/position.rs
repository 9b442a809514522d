//! Source locations.
//!
//! Every token, AST node and error is delimited by a [`Span`]: two
//! [`Position`]s inside one [`Source`]. Positions are plain values, a span
//! only adds a shared handle to the text it points into so a diagnostic can
//! always quote the failing line, even when the code that failed came from
//! an earlier shell input.

use std::{fmt, rc::Rc};

/// A named chunk of source text, e.g. a script file or one line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
	pub name: String,
	pub text: String,
}

impl Source {
	pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
		Rc::new(Self { name: name.into(), text: text.into() })
	}
}

/// An exact location in a [`Source`]. `line` and `column` are zero based,
/// `index` is a byte offset into the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
	pub index:  usize,
	pub line:   usize,
	pub column: usize,
}

impl Position {
	/// The position right after `current`, which is the character at `self`.
	#[must_use]
	pub fn advance(self, current: char) -> Self {
		let index = self.index + current.len_utf8();
		if current == '\n' {
			Self { index, line: self.line + 1, column: 0 }
		} else {
			Self { index, line: self.line, column: self.column + 1 }
		}
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}:{}", self.line + 1, self.column + 1) }
}

/// A `start..end` range of a source. `end` is one past the last character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
	pub source: Rc<Source>,
	pub start:  Position,
	pub end:    Position,
}

impl Span {
	pub fn new(source: Rc<Source>, start: Position, end: Position) -> Self { Self { source, start, end } }

	/// A span starting where `self` starts and ending where `other` ends.
	#[must_use]
	pub fn to(&self, other: &Span) -> Self { Self::new(self.source.clone(), self.start, other.end) }

	/// One based line number of the start, as shown to users.
	pub fn line(&self) -> usize { self.start.line + 1 }

	/// The text this span covers.
	pub fn text(&self) -> &str { self.source.text.get(self.start.index..self.end.index).unwrap_or_default() }

	/// The lines this span covers, each followed by a `~` underline below the
	/// implicated columns.
	pub fn highlight(&self) -> String {
		let lines: Vec<&str> = self.source.text.split('\n').collect();
		let last_line = self.end.line.max(self.start.line);

		let mut excerpt = Vec::new();
		for number in self.start.line..=last_line {
			let line = lines.get(number).map_or("", |line| line.trim_end_matches('\r')).replace('\t', " ");
			let width = line.chars().count();
			let from = if number == self.start.line { self.start.column } else { 0 };
			let to = if number == last_line { self.end.column } else { width };
			let underline = to.saturating_sub(from).max(1);
			excerpt.push(format!("{line}\n{}{}", " ".repeat(from), "~".repeat(underline)));
		}
		excerpt.join("\n")
	}
}
