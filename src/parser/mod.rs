//! The `Scanner` works on the lexical grammar, whose alphabet is characters.
//! The `Parser` works on the syntactic grammar, whose alphabet is tokens.
//!
//! Every construct of Cyan is an expression, statements are just expressions
//! separated by newlines or semicolons. Precedence, lowest first:
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|let =|Right
//! Logic|and or|Left
//! Comparison|== != < > <= >= not|Left
//! Arithmetic|+ -|Left
//! Term|* /|Left
//! Factor|+ - (prefix)|Right
//! Power|**|Right
//! Call|()|Left
//!
//! ``` BNF
//! statements  → separator* statement ( separator+ statement )* ;
//! statement   → "pass" | expression ;
//! expression  → "let" IDENTIFIER "=" expression
//!             | comparison ( ( "and" | "or" ) comparison )* ;
//! comparison  → "not" comparison
//!             | arithmetic ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) arithmetic )* ;
//! arithmetic  → term ( ( "+" | "-" ) term )* ;
//! term        → factor ( ( "*" | "/" ) factor )* ;
//! factor      → ( "+" | "-" ) factor | power ;
//! power       → call ( "**" factor )* ;
//! call        → atom ( "(" ( expression ( "," expression )* )? ")" )* ;
//! atom        → INT | FLOAT | STRING | IDENTIFIER | "true" | "false" | "none"
//!             | "(" expression ")" | if | while | fun ;
//! if          → "if" comparison "then" ( expression "else" expression
//!             | "{" statements "}" "else" "{" statements "}" ) ;
//! while       → "while" comparison "{" statements "}" ;
//! fun         → "fun" IDENTIFIER? "(" ( IDENTIFIER ( "," IDENTIFIER )* ","? )? ")" "{" statements "}" ;
//! ```

pub(crate) mod node;

use TokenType::*;
use log::trace;
use node::{BinaryOperator, Node, NodeKind, UnaryOperator};

use crate::{
	error::parser::{ParseError, ParseErrorType},
	interpreter::Number,
	position::Span,
	scanner::{Keyword, Token, TokenType},
	utils::grow_stack,
};

const COMPARISON_OPERATORS: [BinaryOperator; 6] = [
	BinaryOperator::Equal,
	BinaryOperator::NotEqual,
	BinaryOperator::Less,
	BinaryOperator::Greater,
	BinaryOperator::LessEqual,
	BinaryOperator::GreaterEqual,
];

/// A rule of the grammar, as a method of the parser.
type Rule = fn(&mut Parser) -> Result<Node, ParseError>;

pub(crate) struct Parser {
	/// The tokens to parse, always ending with [`TokenType::Eof`].
	tokens:  Vec<Token>,
	/// Index of the token currently being considered.
	cursor:  usize,
	/// The latest statement that failed to parse and was rewound, with the
	/// cursor it was rewound to.
	failure: Option<(usize, ParseError)>,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self { Self { tokens, cursor: 0, failure: None } }

	/// Parse the whole token stream into one statement sequence.
	pub fn parse(mut self) -> Result<Node, ParseError> {
		let statements = self.statements()?;
		if !matches!(self.peek().r#type, Eof | NewLine) {
			return Err(self.unexpected(ParseErrorType::InvalidSyntax));
		}
		trace!("parsed {statements}");
		Ok(statements)
	}

	fn statements(&mut self) -> Result<Node, ParseError> {
		self.skip_separators();
		let mut statements = vec![self.statement()?];
		while self.skip_separators() > 0 {
			match self.attempt(Self::statement) {
				Some(statement) => statements.push(statement),
				None => break,
			}
		}

		let span = match (statements.first(), statements.last()) {
			(Some(first), Some(last)) => first.span.to(&last.span),
			_ => self.peek().span.clone(),
		};
		Ok(Node::new(NodeKind::Statements(statements), span))
	}

	fn statement(&mut self) -> Result<Node, ParseError> {
		if self.check_keyword(Keyword::Pass) {
			let token = self.advance();
			return Ok(Node::new(NodeKind::Pass, token.span));
		}
		self.expression()
	}

	fn expression(&mut self) -> Result<Node, ParseError> {
		if self.check_keyword(Keyword::Let) {
			let keyword = self.advance();
			let name = self.identifier()?;
			self.expect(Equal, "'='")?;
			let value = grow_stack(|| self.expression())?;
			return Ok(Node::assign(&keyword.span, name, value));
		}
		self.binary(Self::comparison, &[BinaryOperator::And, BinaryOperator::Or], Self::comparison)
	}

	fn comparison(&mut self) -> Result<Node, ParseError> {
		if self.check_keyword(Keyword::Not) {
			let operator = self.advance();
			let operand = grow_stack(|| self.comparison())?;
			return Ok(Node::unary(&operator.span, UnaryOperator::Not, operand));
		}
		self.binary(Self::arithmetic, &COMPARISON_OPERATORS, Self::arithmetic)
	}

	fn arithmetic(&mut self) -> Result<Node, ParseError> {
		self.binary(Self::term, &[BinaryOperator::Add, BinaryOperator::Subtract], Self::term)
	}

	fn term(&mut self) -> Result<Node, ParseError> {
		self.binary(Self::factor, &[BinaryOperator::Multiply, BinaryOperator::Divide], Self::factor)
	}

	fn factor(&mut self) -> Result<Node, ParseError> {
		let operator = match self.peek().r#type {
			Plus => UnaryOperator::Plus,
			Minus => UnaryOperator::Minus,
			_ => return self.power(),
		};
		let token = self.advance();
		let operand = grow_stack(|| self.factor())?;
		Ok(Node::unary(&token.span, operator, operand))
	}

	/// The right operand goes back through `factor`, which makes `**` right
	/// associative and lets it take a signed exponent.
	fn power(&mut self) -> Result<Node, ParseError> { self.binary(Self::call, &[BinaryOperator::Power], Self::factor) }

	fn call(&mut self) -> Result<Node, ParseError> {
		let mut callee = self.atom()?;
		while self.check(&LeftParen) {
			self.advance();
			let mut arguments = Vec::new();
			if !self.check(&RightParen) {
				arguments.push(self.expression()?);
				while self.check(&Comma) {
					self.advance();
					arguments.push(self.expression()?);
				}
			}
			let close = self.expect(RightParen, "',' or ')'")?;
			callee = Node::call(callee, arguments, &close.span);
		}
		Ok(callee)
	}

	fn atom(&mut self) -> Result<Node, ParseError> {
		let token = self.peek().clone();
		let kind = match token.r#type {
			Int(n) => NodeKind::Number(Number::Int(n)),
			Float(n) => NodeKind::Number(Number::Float(n)),
			String(s) => NodeKind::String(s.into()),
			Identifier(name) => NodeKind::Variable(name),
			Literal(literal) => NodeKind::Literal(literal),
			LeftParen => {
				self.advance();
				let expression = self.expression()?;
				let close = self.expect(RightParen, "')'")?;
				return Ok(Node::new(expression.kind, token.span.to(&close.span)));
			}
			TokenType::Keyword(Keyword::If) => return self.if_expression(),
			TokenType::Keyword(Keyword::While) => return self.while_expression(),
			TokenType::Keyword(Keyword::Fun) => return self.function_definition(),
			_ => return Err(self.error(ParseErrorType::ExpectedExpression)),
		};
		self.advance();
		Ok(Node::new(kind, token.span))
	}

	fn if_expression(&mut self) -> Result<Node, ParseError> {
		let keyword = self.advance();
		let condition = self.comparison()?;
		self.expect_keyword(Keyword::Then, "'then'")?;

		let (then_branch, else_branch) = if self.check(&LeftBrace) {
			let then_branch = self.block()?;
			self.expect_keyword(Keyword::Else, "'else'")?;
			(then_branch, self.block()?)
		} else {
			let then_branch = self.expression()?;
			self.expect_keyword(Keyword::Else, "'else'")?;
			(then_branch, self.expression()?)
		};

		let span = keyword.span.to(&else_branch.span);
		let kind = NodeKind::If {
			condition:   Box::new(condition),
			then_branch: Box::new(then_branch),
			else_branch: Box::new(else_branch),
		};
		Ok(Node::new(kind, span))
	}

	fn while_expression(&mut self) -> Result<Node, ParseError> {
		let keyword = self.advance();
		let condition = self.comparison()?;
		let body = self.block()?;
		let span = keyword.span.to(&body.span);
		Ok(Node::new(NodeKind::While { condition: Box::new(condition), body: Box::new(body) }, span))
	}

	fn function_definition(&mut self) -> Result<Node, ParseError> {
		let keyword = self.advance();
		let name = match &self.peek().r#type {
			Identifier(name) => {
				let name = name.clone();
				self.advance();
				Some(name)
			}
			_ => None,
		};
		self.expect(LeftParen, if name.is_some() { "'('" } else { "identifier or '('" })?;

		let mut parameters = Vec::new();
		if !self.check(&RightParen) {
			parameters.push(self.identifier()?);
			while self.check(&Comma) {
				self.advance();
				match &self.peek().r#type {
					Identifier(parameter) => {
						parameters.push(parameter.clone());
						self.advance();
					}
					RightParen => break,
					_ => return Err(self.error(ParseErrorType::Expected("',' or ')'"))),
				}
			}
		}
		self.expect(RightParen, "',' or ')'")?;

		let body = self.block()?;
		let span = keyword.span.to(&body.span);
		Ok(Node::function_def(name, parameters, body, span))
	}

	/// `{ statements }`, spanning the braces.
	fn block(&mut self) -> Result<Node, ParseError> {
		let open = self.expect(LeftBrace, "'{'")?;
		let statements = self.statements()?;
		if !self.check(&RightBrace) {
			return Err(self.unexpected(ParseErrorType::Expected("'}'")));
		}
		let close = self.advance();
		Ok(Node::new(statements.kind, open.span.to(&close.span)))
	}

	/// A left associative chain of `operators`, with operands parsed by
	/// `left` for the first one and `right` for the rest.
	fn binary(&mut self, left: Rule, operators: &[BinaryOperator], right: Rule) -> Result<Node, ParseError> {
		let mut expression = grow_stack(|| left(self))?;
		while let Some(operator) = BinaryOperator::from_token(&self.peek().r#type).filter(|op| operators.contains(op)) {
			self.advance();
			expression = Node::binary(expression, operator, grow_stack(|| right(self))?);
		}
		Ok(expression)
	}

	/// Try `rule`, rewinding the cursor if it fails.
	fn attempt(&mut self, rule: Rule) -> Option<Node> {
		let checkpoint = self.cursor;
		match rule(self) {
			Ok(node) => Some(node),
			Err(error) => {
				let consumed = self.cursor - checkpoint;
				trace!("rewind {consumed} tokens after: {error}");
				self.cursor = checkpoint;
				// A statement that fails on its first token simply is not there.
				if consumed > 0 {
					self.failure = Some((checkpoint, error));
				}
				None
			}
		}
	}

	/// The error for a token nothing could be parsed from. When a statement
	/// attempt was rewound to this very token, its error says more.
	fn unexpected(&mut self, fallback: ParseErrorType) -> ParseError {
		match self.failure.take() {
			Some((at, error)) if at == self.cursor => error,
			_ => self.error(fallback),
		}
	}

	fn identifier(&mut self) -> Result<std::string::String, ParseError> {
		match &self.peek().r#type {
			Identifier(name) => {
				let name = name.clone();
				self.advance();
				Ok(name)
			}
			_ => Err(self.error(ParseErrorType::ExpectedIdentifier)),
		}
	}

	fn expect(&mut self, r#type: TokenType, what: &'static str) -> Result<Token, ParseError> {
		if self.check(&r#type) { Ok(self.advance()) } else { Err(self.error(ParseErrorType::Expected(what))) }
	}

	fn expect_keyword(&mut self, keyword: Keyword, what: &'static str) -> Result<Token, ParseError> {
		if self.check_keyword(keyword) { Ok(self.advance()) } else { Err(self.error(ParseErrorType::Expected(what))) }
	}

	/// Skip newlines and semicolons, returning how many were skipped.
	fn skip_separators(&mut self) -> usize {
		let mut count = 0;
		while self.peek().r#type.is_separator() {
			self.advance();
			count += 1;
		}
		count
	}

	fn check(&self, r#type: &TokenType) -> bool { &self.peek().r#type == r#type }

	fn check_keyword(&self, keyword: Keyword) -> bool { self.check(&TokenType::Keyword(keyword)) }

	/// Peek at the current token. Never moves past [`TokenType::Eof`].
	fn peek(&self) -> &Token { &self.tokens[self.cursor.min(self.tokens.len() - 1)] }

	/// Consume the current token.
	fn advance(&mut self) -> Token {
		let token = self.peek().clone();
		if token.r#type != Eof {
			self.cursor += 1;
		}
		token
	}

	fn error(&self, r#type: ParseErrorType) -> ParseError { ParseError::new(self.span(), r#type) }

	fn span(&self) -> Span { self.peek().span.clone() }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::tokenize;

	fn parse_source(input: &str) -> Result<Node, ParseError> { Parser::new(tokenize("<test>", input).unwrap()).parse() }

	fn parse(input: &str, equals: &str) {
		let ast = parse_source(input).unwrap();
		assert_eq!(ast.to_string(), equals);
	}

	fn fails(input: &str, message: &str) {
		let error = parse_source(input).unwrap_err();
		assert_eq!(error.to_string(), message, "{input:?}");
	}

	#[test]
	fn parse_arithmetic() {
		parse("2 + 3 * 4", "{(+ 2 (* 3 4))}");
		parse("1 + 2 * 3 / 4 - 5", "{(- (+ 1 (/ (* 2 3) 4)) 5)}");
		parse("(1 + 2) * 3", "{(* (+ 1 2) 3)}");
		parse("8 + 800.5 * 123", "{(+ 8 (* 800.5 123))}");
	}

	#[test]
	fn parse_power() {
		parse("2 ** 3 ** 2", "{(** 2 (** 3 2))}");
		parse("2 ** -1", "{(** 2 (- 1))}");
		parse("-2 ** 2", "{(- (** 2 2))}");
		parse("2 * 3 ** 2", "{(* 2 (** 3 2))}");
	}

	#[test]
	fn parse_unary() {
		parse("-123", "{(- 123)}");
		parse("+x", "{(+ x)}");
		parse("--1", "{(- (- 1))}");
		parse("not true", "{(not true)}");
		parse("not 1 == 2", "{(not (== 1 2))}");
	}

	#[test]
	fn parse_comparison_and_logic() {
		parse("1 < 2", "{(< 1 2)}");
		parse("1 <= 2 == true", "{(== (<= 1 2) true)}");
		parse("1 != 2", "{(!= 1 2)}");
		parse("a and b or c", "{(or (and a b) c)}");
		parse("1 + 1 == 2 and none == none", "{(and (== (+ 1 1) 2) (== none none))}");
	}

	#[test]
	fn parse_literals() {
		parse("42", "{42}");
		parse("3.5", "{3.5}");
		parse("\"hello\"", "{\"hello\"}");
		parse("true; false; none", "{true; false; none}");
		parse("pass", "{pass}");
	}

	#[test]
	fn parse_assignment() {
		parse("let x = 1", "{(let x 1)}");
		parse("let x = let y = 2", "{(let x (let y 2))}");
		parse("let f = fun (a) { a }", "{(let f (fun [lambda] (a) {a}))}");
		fails("let 1 = 2", "Expected identifier");
		fails("let x 2", "Expected '='");
	}

	#[test]
	fn parse_statements() {
		parse("\n\n1\n2;3\n", "{1; 2; 3}");
		parse("let x = 1; out(x)", "{(let x 1); (call out (x))}");
		parse("1;;;2", "{1; 2}");
		fails("1 2", "Invalid Syntax");
		fails("", "Expected expression: let, if, while, fun, number, string, identifier, '+', '-' or '('");
	}

	#[test]
	fn parse_statement_failure_is_reported() {
		fails("let x = 1\nlet y = (2", "Expected ')'");
		fails("out(1)\n)", "Invalid Syntax");
		fails("fun f() { 1\n let x = }", "Expected expression: let, if, while, fun, number, string, identifier, '+', '-' or '('");
		fails("while true { pass\n", "Expected '}'");
	}

	#[test]
	fn parse_calls() {
		parse("f()", "{(call f ())}");
		parse("out(1, 2 + 3, \"x\")", "{(call out (1 (+ 2 3) \"x\"))}");
		parse("make()(1)", "{(call (call make ()) (1))}");
		parse("-f(2) ** 2", "{(- (** (call f (2)) 2))}");
		fails("f(1,)", "Expected expression: let, if, while, fun, number, string, identifier, '+', '-' or '('");
		fails("f(1 2)", "Expected ',' or ')'");
	}

	#[test]
	fn parse_if() {
		parse("if x then 1 else 2", "{(if x 1 2)}");
		parse("if a == b then \"y\" else if c then 1 else 2", "{(if (== a b) \"y\" (if c 1 2))}");
		parse("if x then {\n out(1)\n out(2)\n} else { pass }", "{(if x {(call out (1)); (call out (2))} {pass})}");
		fails("if x 1 else 2", "Expected 'then'");
		fails("if x then 1", "Expected 'else'");
	}

	#[test]
	fn parse_while() {
		parse("while i < 3 { let i = i + 1 }", "{(while (< i 3) {(let i (+ i 1))})}");
		parse("while true {\n  pass\n}", "{(while true {pass})}");
		fails("while true pass", "Expected '{'");
		fails("while true { pass", "Expected '}'");
	}

	#[test]
	fn parse_function_definition() {
		parse("fun add(a, b) { a + b }", "{(fun add (a b) {(+ a b)})}");
		parse("fun () { 1 }", "{(fun [lambda] () {1})}");
		parse("fun f(a,) { a }", "{(fun f (a) {a})}");
		parse("fun f() {\n  let x = 2\n  out(x)\n}", "{(fun f () {(let x 2); (call out (x))})}");
		fails("fun f { 1 }", "Expected '('");
		fails("fun { 1 }", "Expected identifier or '('");
		fails("fun f(a b) { 1 }", "Expected ',' or ')'");
		fails("fun f(1) { 1 }", "Expected identifier");
	}

	#[test]
	fn node_spans_cover_their_children() {
		let ast = parse_source("let total = 10 + 20\nout(total)").unwrap();
		let NodeKind::Statements(statements) = &ast.kind else { panic!("not statements: {ast}") };
		assert_eq!(statements[0].span.text(), "let total = 10 + 20");
		assert_eq!(statements[1].span.text(), "out(total)");
		assert_eq!(statements[1].span.line(), 2);
		assert_eq!(ast.span.text(), "let total = 10 + 20\nout(total)");
	}

	#[test]
	fn parse_malformed_number_tail() {
		fails("1.2.3", "Invalid Syntax");
	}
}
