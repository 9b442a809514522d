use std::fmt;

use crate::position::Span;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub r#type: TokenType,
	pub span:   Span,
}

impl Token {
	pub fn new(r#type: TokenType, span: Span) -> Self { Self { r#type, span } }

	/// Render the token back into source text that scans to the same token.
	pub fn to_source(&self) -> String { self.r#type.to_string() }
}

/// The different types of tokens in Cyan.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
	/// Integer literal, e.g. `42`.
	Int(i64),
	/// Float literal, e.g. `4.2` or `4.`.
	Float(f64),
	/// String literal, quoted with `'` or `"`.
	String(String),
	/// Identifier, e.g. variable or function name.
	Identifier(String),
	/// Reserved word.
	Keyword(Keyword),
	/// `true`, `false` or `none`.
	Literal(Literal),
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Double asterisk `**`.
	StarStar,
	/// Slash `/`.
	Slash,
	/// Equal `=`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Bang equal `!=`.
	BangEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Colon `:`.
	Colon,
	/// Semicolon `;`.
	Semicolon,
	/// Comma `,`.
	Comma,
	/// Dot `.`, only ever produced after a numeral that already has one.
	Dot,
	/// New line, separates statements.
	NewLine,
	/// End of input.
	Eof,
}

impl TokenType {
	pub fn keyword_or_identifier(word: &str) -> Self {
		match word {
			"let" => Self::Keyword(Keyword::Let),
			"and" => Self::Keyword(Keyword::And),
			"or" => Self::Keyword(Keyword::Or),
			"not" => Self::Keyword(Keyword::Not),
			"if" => Self::Keyword(Keyword::If),
			"then" => Self::Keyword(Keyword::Then),
			"elif" => Self::Keyword(Keyword::Elif),
			"else" => Self::Keyword(Keyword::Else),
			"while" => Self::Keyword(Keyword::While),
			"fun" => Self::Keyword(Keyword::Fun),
			"pass" => Self::Keyword(Keyword::Pass),
			"true" => Self::Literal(Literal::True),
			"false" => Self::Literal(Literal::False),
			"none" => Self::Literal(Literal::None),
			_ => Self::Identifier(word.to_string()),
		}
	}

	/// Newlines and semicolons both end a statement.
	pub fn is_separator(&self) -> bool { matches!(self, Self::NewLine | Self::Semicolon) }
}

impl fmt::Display for TokenType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use TokenType::*;
		match self {
			Int(n) => write!(f, "{n}"),
			Float(n) => write!(f, "{n:?}"),
			String(s) if s.contains('"') => write!(f, "'{s}'"),
			String(s) => write!(f, "\"{s}\""),
			Identifier(name) => write!(f, "{name}"),
			Keyword(keyword) => write!(f, "{keyword}"),
			Literal(literal) => write!(f, "{literal}"),
			Plus => write!(f, "+"),
			Minus => write!(f, "-"),
			Star => write!(f, "*"),
			StarStar => write!(f, "**"),
			Slash => write!(f, "/"),
			Equal => write!(f, "="),
			EqualEqual => write!(f, "=="),
			BangEqual => write!(f, "!="),
			Less => write!(f, "<"),
			LessEqual => write!(f, "<="),
			Greater => write!(f, ">"),
			GreaterEqual => write!(f, ">="),
			LeftParen => write!(f, "("),
			RightParen => write!(f, ")"),
			LeftBrace => write!(f, "{{"),
			RightBrace => write!(f, "}}"),
			Colon => write!(f, ":"),
			Semicolon => write!(f, ";"),
			Comma => write!(f, ","),
			Dot => write!(f, "."),
			NewLine => writeln!(f),
			Eof => Ok(()),
		}
	}
}

/// Reserved words. `elif` is reserved but not part of any grammar rule yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
	Let,
	And,
	Or,
	Not,
	If,
	Then,
	Elif,
	Else,
	While,
	Fun,
	Pass,
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let word = match self {
			Keyword::Let => "let",
			Keyword::And => "and",
			Keyword::Or => "or",
			Keyword::Not => "not",
			Keyword::If => "if",
			Keyword::Then => "then",
			Keyword::Elif => "elif",
			Keyword::Else => "else",
			Keyword::While => "while",
			Keyword::Fun => "fun",
			Keyword::Pass => "pass",
		};
		f.write_str(word)
	}
}

/// Literal keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
	True,
	False,
	None,
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Literal::True => "true",
			Literal::False => "false",
			Literal::None => "none",
		})
	}
}
