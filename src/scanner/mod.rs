//! Turns Cyan source text into tokens.
//!
//! The lexical grammar is small: numerals (at most one `.`), identifiers and
//! reserved words, quoted strings, a fixed table of punctuation and operators,
//! `#` line comments and significant newlines. Any other whitespace is
//! skipped.
//!
//! Scanning stops at the first error. Keywords are recognised by maximal
//! munch: the whole word is read before deciding whether it is reserved.
mod token;

use std::{iter::Peekable, rc::Rc, str::Chars};

use TokenType::*;
use log::trace;
pub use token::{Keyword, Literal, Token, TokenType};

use crate::{
	error::scanner::{ScanError, ScanErrorType},
	position::{Position, Source, Span},
};

/// A scanner for Cyan source code
pub(crate) struct Scanner<'a> {
	source:      &'a Rc<Source>,
	/// User input source code iterator
	source_iter: Peekable<Chars<'a>>,
	/// Points at the beginning of the current lexeme
	start:       Position,
	/// Points at the character currently being considered
	cursor:      Position,
	/// The last numeral stopped at a second `.`, which is scanned next
	stray_dot:   bool,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a Rc<Source>) -> Self {
		let source_iter = source.text.chars().peekable();

		Self { source, source_iter, start: Position::default(), cursor: Position::default(), stray_dot: false }
	}

	/// Scan all tokens from the source code, ending with [`TokenType::Eof`].
	pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScanError> {
		let mut tokens = Vec::new();
		while self.peek().is_some() {
			// We are at the beginning of the next lexeme.
			self.start = self.cursor;
			if let Some(r#type) = self.scan_token()? {
				tokens.push(Token::new(r#type, self.span()));
			}
		}
		self.start = self.cursor;
		tokens.push(Token::new(Eof, self.span()));
		trace!("scanned {} tokens from {}", tokens.len(), self.source.name);
		Ok(tokens)
	}

	/// Scan a single token. Comments and blanks produce nothing.
	fn scan_token(&mut self) -> Result<Option<TokenType>, ScanError> {
		let Some(next_char) = self.advance() else { return Ok(None) };
		#[rustfmt::skip]
		let r#type = match next_char {
			'+' => Plus,
			'-' => Minus,
			'/' => Slash,
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			':' => Colon,
			';' => Semicolon,
			',' => Comma,
			'*' => if self.match_next('*') { StarStar } else { Star },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'!' => if self.match_next('=') { BangEqual } else {
				self.advance();
				return Err(self.error(ScanErrorType::ExpectedEqualAfterBang));
			},
			'#' => {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				return Ok(None);
			}
			'\n' => NewLine,
			c if c.is_whitespace() => return Ok(None),
			'\'' | '"' => self.string(next_char)?,
			'.' if self.take_stray_dot() => Dot,
			c if c.is_ascii_digit() => self.number(c),
			c if c.is_alphabetic() || c == '_' => self.identifier(c),
			c => return Err(self.error(ScanErrorType::InvalidCharacter(c))),
		};

		Ok(Some(r#type))
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let c = self.source_iter.next()?;
		self.cursor = self.cursor.advance(c);
		Some(c)
	}

	/// Whether a `.` right here ends a numeral that already had one.
	fn take_stray_dot(&mut self) -> bool { std::mem::take(&mut self.stray_dot) }

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().copied() }

	fn span(&self) -> Span { Span::new(self.source.clone(), self.start, self.cursor) }

	fn error(&self, r#type: ScanErrorType) -> ScanError { ScanError::new(self.span(), r#type) }

	/// Scan a string literal. There are no escape sequences, everything up to
	/// the matching quote is taken verbatim.
	fn string(&mut self, quote: char) -> Result<TokenType, ScanError> {
		let mut value = std::string::String::new();
		loop {
			match self.advance() {
				Some(c) if c == quote => return Ok(String(value)),
				Some(c) => value.push(c),
				None => return Err(self.error(ScanErrorType::UnterminatedString)),
			}
		}
	}

	/// Scan a numeral. A second `.` ends the numeral, so `1.2.3` scans as
	/// `1.2`, `.`, `3`.
	fn number(&mut self, first: char) -> TokenType {
		let mut text = std::string::String::from(first);
		let mut has_dot = false;
		while let Some(c) = self.peek() {
			if c == '.' {
				if has_dot {
					self.stray_dot = true;
					break;
				}
				has_dot = true;
			} else if !c.is_ascii_digit() {
				break;
			}
			text.push(c);
			self.advance();
		}

		if !has_dot && let Ok(n) = text.parse() {
			return Int(n);
		}
		// Digits with at most one `.` always read as a float, integers too
		// wide for i64 included.
		Float(text.parse().unwrap_or(f64::INFINITY))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self, first: char) -> TokenType {
		let mut word = std::string::String::from(first);
		while let Some(c) = self.peek().filter(|&c| c.is_alphanumeric() || c == '_') {
			word.push(c);
			self.advance();
		}
		TokenType::keyword_or_identifier(&word)
	}
}

/// Scan `text` into tokens, naming it `source_name` in diagnostics.
pub fn tokenize(source_name: &str, text: &str) -> Result<Vec<Token>, ScanError> {
	let source = Source::new(source_name, text);
	Scanner::new(&source).scan_tokens()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	fn scan(input: &str, ok: bool) {
		let result = tokenize("<test>", input);
		assert!(result.is_ok() == ok, "{input:?} => {result:?}");
	}

	fn types(input: &str) -> Vec<TokenType> {
		tokenize("<test>", input).unwrap().into_iter().map(|token| token.r#type).collect()
	}

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("(){}", true);
		scan(" ( ) ", true);
		scan("@", false);
		scan("$", false);
		scan(r#""世界""#, true);
		scan("12345", true);
		scan("user", true);
		scan("fun", true);
	}

	#[test]
	fn scan_operators() {
		assert_eq!(types("+ - * ** /"), vec![Plus, Minus, Star, StarStar, Slash, Eof]);
		assert_eq!(types("= == != < <= > >="), vec![
			Equal,
			EqualEqual,
			BangEqual,
			Less,
			LessEqual,
			Greater,
			GreaterEqual,
			Eof
		]);
		assert_eq!(types("(){}:;,"), vec![
			LeftParen, RightParen, LeftBrace, RightBrace, Colon, Semicolon, Comma, Eof
		]);
		assert_eq!(types("***"), vec![StarStar, Star, Eof]);
	}

	#[test]
	fn scan_bang_requires_equal() {
		let error = tokenize("<test>", "1 ! 2").unwrap_err();
		assert_eq!(error.kind(), ErrorKind::InvalidSyntax);
		assert_eq!(error.span.start.column, 2);
	}

	#[test]
	fn scan_invalid_character() {
		let error = tokenize("<test>", "let x = 1 $ 2").unwrap_err();
		assert_eq!(error.kind(), ErrorKind::InvalidCharacter);
		assert_eq!(error.r#type, ScanErrorType::InvalidCharacter('$'));
		assert_eq!(error.span.start.column, 10);
	}

	#[test]
	fn scan_numbers() {
		assert_eq!(types("0"), vec![Int(0), Eof]);
		assert_eq!(types("42"), vec![Int(42), Eof]);
		assert_eq!(types("2.75"), vec![Float(2.75), Eof]);
		assert_eq!(types("1."), vec![Float(1.0), Eof]);
		assert_eq!(types("1.2.3"), vec![Float(1.2), Dot, Int(3), Eof]);
		assert_eq!(types("99999999999999999999"), vec![Float(1e20), Eof]);
	}

	#[test]
	fn scan_dot_outside_numeral() {
		for input in ["x.y", ".5", "1 . 2", "1.2 .3"] {
			let error = tokenize("<test>", input).unwrap_err();
			assert_eq!(error.r#type, ScanErrorType::InvalidCharacter('.'), "{input:?}");
			assert_eq!(error.kind(), ErrorKind::InvalidCharacter);
		}
		assert_eq!(types("1.2.3.4"), vec![Float(1.2), Dot, Float(3.4), Eof]);
	}

	#[test]
	fn scan_strings() {
		assert_eq!(types(r#""""#), vec![String("".into()), Eof]);
		assert_eq!(types(r#""hello world""#), vec![String("hello world".into()), Eof]);
		assert_eq!(types(r#"'say "hi"'"#), vec![String("say \"hi\"".into()), Eof]);
		assert_eq!(types(r#""a\n""#), vec![String("a\\n".into()), Eof]);
		assert_eq!(types("\"two\nlines\""), vec![String("two\nlines".into()), Eof]);
	}

	#[test]
	fn scan_unterminated_string() {
		let error = tokenize("<test>", "out('oops)").unwrap_err();
		assert_eq!(error.r#type, ScanErrorType::UnterminatedString);
		assert_eq!(error.kind(), ErrorKind::InvalidSyntax);
	}

	#[test]
	fn scan_keywords_and_literals() {
		assert_eq!(types("let and or not if then elif else while fun pass"), vec![
			Keyword(token::Keyword::Let),
			Keyword(token::Keyword::And),
			Keyword(token::Keyword::Or),
			Keyword(token::Keyword::Not),
			Keyword(token::Keyword::If),
			Keyword(token::Keyword::Then),
			Keyword(token::Keyword::Elif),
			Keyword(token::Keyword::Else),
			Keyword(token::Keyword::While),
			Keyword(token::Keyword::Fun),
			Keyword(token::Keyword::Pass),
			Eof
		]);
		assert_eq!(types("true false none"), vec![
			Literal(token::Literal::True),
			Literal(token::Literal::False),
			Literal(token::Literal::None),
			Eof
		]);
	}

	#[test]
	fn scan_identifiers() {
		assert_eq!(types("x"), vec![Identifier("x".into()), Eof]);
		assert_eq!(types("_name"), vec![Identifier("_name".into()), Eof]);
		assert_eq!(types("snake_case2"), vec![Identifier("snake_case2".into()), Eof]);
		assert_eq!(types("letter"), vec![Identifier("letter".into()), Eof]);
		assert_eq!(types("2x"), vec![Int(2), Identifier("x".into()), Eof]);
	}

	#[test]
	fn scan_comments_and_newlines() {
		assert_eq!(types("# only a comment"), vec![Eof]);
		assert_eq!(types("1 # trailing\n2"), vec![Int(1), NewLine, Int(2), Eof]);
		assert_eq!(types(" \t\r\n"), vec![NewLine, Eof]);
	}

	#[test]
	fn token_spans() {
		let tokens = tokenize("<test>", "let total = 10\nout(total)").unwrap();
		let total = &tokens[1];
		assert_eq!(total.span.text(), "total");
		assert_eq!((total.span.start.line, total.span.start.column), (0, 4));
		let out = &tokens[5];
		assert_eq!(out.r#type, Identifier("out".into()));
		assert_eq!((out.span.start.line, out.span.start.column), (1, 0));
		assert_eq!(out.span.end.column, 3);
	}

	#[test]
	fn tokens_render_back_to_source() {
		let input = "let s = 'a \"b\"' + \"c\"; fun f(x) { x ** 2.5 }\n";
		let tokens = tokenize("<test>", input).unwrap();
		let rendered = tokens.iter().map(Token::to_source).collect::<Vec<_>>().join(" ");
		let rescanned: Vec<TokenType> =
			tokenize("<test>", &rendered).unwrap().into_iter().map(|token| token.r#type).collect();
		assert_eq!(rescanned, tokens.into_iter().map(|token| token.r#type).collect::<Vec<_>>());
	}
}
