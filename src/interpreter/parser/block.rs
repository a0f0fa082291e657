use crate::{
    ast::{Block, Declaration, Param, ProcedureDecl, TypeRef, Var, VarDecl},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a block.
    ///
    /// Grammar: `block := declarations compound_statement`
    pub(in crate::interpreter::parser) fn parse_block(&mut self) -> ParseResult<Block> {
        let declarations = self.parse_declarations()?;
        let compound = self.parse_compound_statement()?;
        Ok(Block { declarations,
                   compound })
    }

    /// Parses every declaration at the head of a block.
    ///
    /// All `VAR` groups come before all procedures:
    ///
    /// ```text
    /// declarations := (VAR (variable_declaration ";")+)*
    ///                 (PROCEDURE id ("(" params ")")? ";" block ";")*
    /// ```
    fn parse_declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();

        while matches!(self.peek(), Token::Var) {
            self.advance()?;
            loop {
                declarations.extend(self.parse_variable_declaration()?
                                        .into_iter()
                                        .map(Declaration::Variable));
                self.eat(&Token::Semicolon)?;
                if !matches!(self.peek(), Token::Identifier(_)) {
                    break;
                }
            }
        }

        while matches!(self.peek(), Token::Procedure) {
            let procedure = self.nested(Self::parse_procedure_declaration)?;
            declarations.push(Declaration::Procedure(procedure));
        }

        Ok(declarations)
    }

    /// Parses `id ("," id)* ":" type`, producing one declaration per name.
    fn parse_variable_declaration(&mut self) -> ParseResult<Vec<VarDecl>> {
        let vars = self.parse_identifier_list()?;
        self.eat(&Token::Colon)?;
        let type_ref = self.parse_type_spec()?;

        Ok(vars.into_iter()
               .map(|var| VarDecl { var,
                                    type_ref: type_ref.clone() })
               .collect())
    }

    /// Parses a procedure declaration, starting at `PROCEDURE`.
    fn parse_procedure_declaration(&mut self) -> ParseResult<ProcedureDecl> {
        let line = self.eat(&Token::Procedure)?.line;
        let name = self.eat_identifier()?.name;

        let params = if matches!(self.peek(), Token::LParen) {
            self.advance()?;
            let params = self.parse_formal_parameters()?;
            self.eat(&Token::RParen)?;
            params
        } else {
            Vec::new()
        };

        self.eat(&Token::Semicolon)?;
        let block = self.parse_block()?;
        self.eat(&Token::Semicolon)?;

        Ok(ProcedureDecl { name,
                           params,
                           block,
                           line })
    }

    /// Parses a formal parameter list without its parentheses.
    ///
    /// Grammar: `params := id ("," id)* ":" type (";" id ("," id)* ":" type)*`
    fn parse_formal_parameters(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        loop {
            let vars = self.parse_identifier_list()?;
            self.eat(&Token::Colon)?;
            let type_ref = self.parse_type_spec()?;
            params.extend(vars.into_iter().map(|var| Param { var,
                                                             type_ref: type_ref.clone() }));

            if !matches!(self.peek(), Token::Semicolon) {
                return Ok(params);
            }
            self.advance()?;
        }
    }

    /// Parses `id ("," id)*`.
    fn parse_identifier_list(&mut self) -> ParseResult<Vec<Var>> {
        let mut vars = vec![self.eat_identifier()?];
        while matches!(self.peek(), Token::Comma) {
            self.advance()?;
            vars.push(self.eat_identifier()?);
        }
        Ok(vars)
    }

    /// Parses `INTEGER | REAL`.
    fn parse_type_spec(&mut self) -> ParseResult<TypeRef> {
        let line = self.line();
        let name = match self.peek() {
            Token::Integer => "INTEGER",
            Token::Real => "REAL",
            _ => return Err(self.unexpected("a type (INTEGER or REAL)")),
        };
        self.advance()?;
        Ok(TypeRef { name: name.to_string(),
                     line })
    }
}
