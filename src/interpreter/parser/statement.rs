use crate::{
    ast::{Compound, Statement, Var},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a compound statement.
    ///
    /// Grammar: `compound_statement := BEGIN statement (";" statement)* END`
    ///
    /// An identifier right after a statement means a `;` is missing and is
    /// reported as such rather than as a missing `END`.
    pub(in crate::interpreter::parser) fn parse_compound_statement(&mut self)
                                                                   -> ParseResult<Compound> {
        self.nested(|parser| {
                parser.eat(&Token::Begin)?;

                let mut statements = vec![parser.parse_statement()?];
                while matches!(parser.peek(), Token::Semicolon) {
                    parser.advance()?;
                    statements.push(parser.parse_statement()?);
                }
                if matches!(parser.peek(), Token::Identifier(_)) {
                    return Err(parser.unexpected("';' or END"));
                }

                parser.eat(&Token::End)?;
                Ok(Compound { statements })
            })
    }

    /// Parses a single statement.
    ///
    /// Grammar: `statement := compound_statement | assignment | ε`
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.peek() {
            Token::Begin => Ok(Statement::Compound(self.parse_compound_statement()?)),
            Token::Identifier(_) => self.parse_assignment(),
            _ => Ok(Statement::NoOp),
        }
    }

    /// Parses `variable ":=" expr`.
    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let target = self.eat_identifier()?;
        let line = self.eat(&Token::Assign)?.line;
        let value = self.parse_expr()?;

        Ok(Statement::Assign { target,
                               value,
                               line })
    }

    /// Consumes an identifier and returns it as a [`Var`].
    ///
    /// # Errors
    /// `UnexpectedToken` if the current token is not an identifier.
    pub(in crate::interpreter::parser) fn eat_identifier(&mut self) -> ParseResult<Var> {
        let Token::Identifier(name) = self.peek() else {
            return Err(self.unexpected("identifier"));
        };
        let name = name.clone();
        let line = self.advance()?.line;
        Ok(Var { name, line })
    }
}
