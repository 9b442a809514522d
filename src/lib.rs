//! # Cyan
//!
//! A small dynamically typed scripting language, run by a tree-walking
//! interpreter. Source text goes through three stages, each of which either
//! hands its result to the next or stops with an error:
//!
//! ``` text
//! text ──scanner──▶ tokens ──parser──▶ AST ──interpreter──▶ value
//! ```

//! ## Scanning
//!
//! Takes in the characters and converts them into tokens: numbers `12`,
//! `1.5`, strings `"hi!"` or `'hi!'`, identifiers `total`, reserved words
//! `let`, and punctuation. Newlines are tokens too, they separate statements
//! like `;` does. Other whitespace and `#` comments are dropped.

//! ## Parsing
//!
//! A recursive descent parser builds a tree out of the tokens, one rule per
//! precedence level. Every construct is an expression, so
//! `let average = (min + max) / 2` parses to
//!
//! ``` markdown
//! let average
//! └── /
//!     ├── +
//!     │   ├── min
//!     │   └── max
//!     └── 2
//! ```
//!
//! and `if`, `while` and `fun` produce values like any other expression.

//! ## Evaluation
//!
//! The interpreter walks the tree against a chain of scopes. Names resolve
//! lexically: a function sees the scope it was defined in, not the one it is
//! called from, and every call gets a fresh child scope for its parameters.
//! Runtime errors remember the chain of calls they happened in, which is
//! rendered as a traceback.
//!
//! ```
//! use cyan::{BufferConsole, Cyan};
//!
//! let mut cyan = Cyan::with_console(BufferConsole::new());
//! cyan.run("<doc>", "fun square(x) { x * x }\nout(square(7))").unwrap();
//! assert_eq!(cyan.console().output(), "49\n");
//! ```

pub mod cli;
mod cyan;
mod environment;
mod error;
mod interpreter;
mod parser;
mod position;
mod scanner;
mod utils;

pub use cyan::{Cyan, run};
pub use error::{
	CyanError, ErrorKind,
	interpreter::{RuntimeError, RuntimeErrorType, TraceEntry},
	parser::{ParseError, ParseErrorType},
	scanner::{ScanError, ScanErrorType},
};
pub use interpreter::{BufferConsole, Config, Console, Number, StdConsole, Value};
pub use position::{Position, Source, Span};
pub use scanner::{Keyword, Literal, Token, TokenType, tokenize};
