use crate::{
    ast::Program,
    error::ParseError,
    interpreter::lexer::{Lexeme, Lexer, Token},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Nesting limit used unless the caller picks another.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser.
///
/// Pulls one token at a time from its [`Lexer`] and keeps a single token of
/// lookahead. There is no error recovery: the first mismatch aborts the
/// parse.
pub struct Parser<'src> {
    lexer:     Lexer<'src>,
    current:   Lexeme,
    depth:     usize,
    max_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser and reads the first token.
    ///
    /// # Errors
    /// Fails if the first token cannot be lexed.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Self::with_max_depth(source, DEFAULT_MAX_DEPTH)
    }

    /// Creates a parser with a custom nesting limit.
    ///
    /// # Errors
    /// Fails if the first token cannot be lexed.
    pub fn with_max_depth(source: &'src str, max_depth: usize) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer,
                  current,
                  depth: 0,
                  max_depth })
    }

    /// Parses a whole program and requires the input to end after its final
    /// `.`.
    ///
    /// Grammar: `program := PROGRAM id ";" block "."`
    ///
    /// # Errors
    /// Returns the first lexical or syntax error, or `NestingTooDeep` when
    /// the input nests past the limit.
    pub fn parse(mut self) -> ParseResult<Program> {
        let line = self.eat(&Token::Program)?.line;
        let name = self.eat_identifier()?.name;
        self.eat(&Token::Semicolon)?;
        let block = self.parse_block()?;
        self.eat(&Token::Dot)?;
        self.eat(&Token::Eof)?;

        Ok(Program { name, block, line })
    }

    /// The current lookahead token.
    pub(in crate::interpreter::parser) const fn peek(&self) -> &Token {
        &self.current.token
    }

    /// Line of the current lookahead token.
    pub(in crate::interpreter::parser) const fn line(&self) -> usize {
        self.current.line
    }

    /// Consumes the current token and returns it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> ParseResult<Lexeme> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consumes the current token if it is of the `expected` kind.
    ///
    /// # Errors
    /// `UnexpectedToken` naming `expected` and the token actually found.
    pub(in crate::interpreter::parser) fn eat(&mut self, expected: &Token) -> ParseResult<Lexeme> {
        if self.current.token.same_kind(expected) {
            self.advance()
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Builds an `UnexpectedToken` error at the current token.
    pub(in crate::interpreter::parser) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken { expected: expected.to_string(),
                                      found:    self.current.token.to_string(),
                                      line:     self.current.line, }
    }

    /// Enters one level of nesting.
    ///
    /// # Errors
    /// `NestingTooDeep` once the limit is crossed.
    pub(in crate::interpreter::parser) fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep { limit: self.max_depth,
                                                    line:  self.current.line, });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` levels of nesting.
    pub(in crate::interpreter::parser) const fn ascend(&mut self, levels: usize) {
        self.depth -= levels;
    }

    /// Runs `rule` one nesting level deeper.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    rule: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        self.descend()?;
        let result = rule(self);
        self.ascend(1);
        result
    }
}
