use std::fmt;

use logos::Logos;

use crate::{error::LexError, util::num::format_real};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Represents a lexical token in the source input.
///
/// Reserved words are matched without regard to case; identifiers are
/// normalized to lower case, so `Alpha` and `ALPHA` name the same variable.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real constants such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_real)]
    RealConst(f64),
    /// Integer constants such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntegerConst(i64),
    /// `PROGRAM`
    #[token("program", ignore(case))]
    Program,
    /// `VAR`
    #[token("var", ignore(case))]
    Var,
    /// `PROCEDURE`
    #[token("procedure", ignore(case))]
    Procedure,
    /// `INTEGER`
    #[token("integer", ignore(case))]
    Integer,
    /// `REAL`
    #[token("real", ignore(case))]
    Real,
    /// `BEGIN`
    #[token("begin", ignore(case))]
    Begin,
    /// `END`
    #[token("end", ignore(case))]
    End,
    /// User identifiers, lower-cased.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_lowercase())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `//`, also spelled `DIV`.
    #[token("//")]
    #[token("div", ignore(case))]
    DoubleSlash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `:`
    #[token(":")]
    Colon,
    /// `:=`
    #[token(":=")]
    Assign,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `{ comments }`, which do not nest.
    #[regex(r"\{[^}]*\}", |lex| {
        count_newlines(lex);
        logos::Skip
    })]
    Comment,
    /// A `{` whose closing brace never arrives. Only matches when the
    /// terminated form cannot, so it is always reported as an error.
    #[regex(r"\{[^}]*", allow_greedy = true)]
    UnterminatedComment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by the pattern table; the [`Lexer`]
    /// returns it once the source is exhausted.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RealConst(value) => write!(f, "real constant {}", format_real(*value)),
            Self::IntegerConst(value) => write!(f, "integer constant {value}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Program => f.write_str("PROGRAM"),
            Self::Var => f.write_str("VAR"),
            Self::Procedure => f.write_str("PROCEDURE"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Real => f.write_str("REAL"),
            Self::Begin => f.write_str("BEGIN"),
            Self::End => f.write_str("END"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::DoubleSlash => f.write_str("'//'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Colon => f.write_str("':'"),
            Self::Assign => f.write_str("':='"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Comment | Self::UnterminatedComment => f.write_str("comment"),
            Self::NewLine => f.write_str("line break"),
            Self::Ignored => f.write_str("whitespace"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

impl Token {
    /// Whether `self` and `other` are the same kind of token, ignoring any
    /// literal payload.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::lexer::Token;
    ///
    /// assert!(Token::IntegerConst(1).same_kind(&Token::IntegerConst(7)));
    /// assert!(!Token::Colon.same_kind(&Token::Assign));
    /// ```
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts so every token can be
/// reported with a line and column.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A token together with where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token itself.
    pub token:  Token,
    /// Line of the first character (1-based).
    pub line:   usize,
    /// Column of the first character (1-based, in characters).
    pub column: usize,
}

/// Pull-based tokenizer.
///
/// Each call to [`Lexer::next_token`] produces one token. Once the input is
/// exhausted every further call returns [`Token::Eof`].
pub struct Lexer<'src> {
    source: &'src str,
    inner:  logos::Lexer<'src, Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { source,
               inner: Token::lexer(source) }
    }

    /// Returns the next token.
    ///
    /// # Errors
    /// - `InvalidCharacter` for a character that begins no token.
    /// - `UnterminatedComment` for a `{` never closed by `}`.
    /// - `LiteralTooLarge` for integer constants beyond `i64` and real
    ///   constants beyond `f64`.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::lexer::{Lexer, Token};
    ///
    /// let mut lexer = Lexer::new("x := 1");
    /// assert_eq!(lexer.next_token().unwrap().token, Token::Identifier("x".into()));
    /// assert_eq!(lexer.next_token().unwrap().token, Token::Assign);
    /// assert_eq!(lexer.next_token().unwrap().token, Token::IntegerConst(1));
    /// assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    /// assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    /// ```
    pub fn next_token(&mut self) -> LexResult<Lexeme> {
        let Some(result) = self.inner.next() else {
            let (line, column) = self.position(self.source.len());
            return Ok(Lexeme { token: Token::Eof,
                               line,
                               column });
        };

        let start = self.inner.span().start;
        let (line, column) = self.position(start);

        match result {
            Ok(Token::UnterminatedComment) => Err(LexError::UnterminatedComment { line, column }),
            Ok(token) => Ok(Lexeme { token, line, column }),
            Err(()) => {
                let slice = self.inner.slice();
                if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(LexError::LiteralTooLarge { literal: slice.to_string(),
                                                           line });
                }
                let character = self.source[start..].chars().next().unwrap_or('\0');
                Err(LexError::InvalidCharacter { character,
                                                 line,
                                                 column })
            },
        }
    }

    /// Line and column of a byte offset at or after the current line start.
    fn position(&self, offset: usize) -> (usize, usize) {
        let extras = &self.inner.extras;
        let column = self.source
                         .get(extras.line_start..offset)
                         .map_or(1, |prefix| prefix.chars().count() + 1);
        (extras.line, column)
    }
}

/// Tokenizes a complete source string.
///
/// The returned vector always ends with a single [`Token::Eof`] lexeme.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
pub fn tokenize(source: &str) -> LexResult<Vec<Lexeme>> {
    let mut lexer = Lexer::new(source);
    let mut lexemes = Vec::new();
    loop {
        let lexeme = lexer.next_token()?;
        let done = lexeme.token == Token::Eof;
        lexemes.push(lexeme);
        if done {
            return Ok(lexemes);
        }
    }
}

/// Advances the line counter past every newline inside the current slice.
fn count_newlines(lex: &mut logos::Lexer<Token>) {
    let slice = lex.slice();
    if let Some(last) = slice.rfind('\n') {
        lex.extras.line += slice.matches('\n').count();
        lex.extras.line_start = lex.span().start + last + 1;
    }
}

/// Parses a real constant from the current token slice. Returns `None`
/// when the value is too large to be finite.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok().filter(|value: &f64| value.is_finite())
}

/// Parses an integer constant from the current token slice. Returns `None`
/// when the value overflows `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
