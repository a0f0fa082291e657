use crate::{
    ast::{Expr, Number, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a factor.
    ///
    /// ```text
    /// factor := ("+" | "-") factor
    ///         | INTEGER_CONST | REAL_CONST
    ///         | "(" expr ")"
    ///         | variable
    /// ```
    ///
    /// Prefix operators recurse into `factor`, so they bind tighter than any
    /// binary operator and stack right to left: `--x` is `-(-x)`.
    pub(in crate::interpreter::parser) fn parse_factor(&mut self) -> ParseResult<Expr> {
        self.nested(|parser| {
                let line = parser.line();
                match parser.peek() {
                    Token::Plus | Token::Minus => {
                        let op = if matches!(parser.advance()?.token, Token::Plus) {
                            UnaryOperator::Plus
                        } else {
                            UnaryOperator::Minus
                        };
                        let operand = parser.parse_factor()?;
                        Ok(Expr::UnaryOp { op,
                                           operand: Box::new(operand),
                                           line })
                    },
                    Token::IntegerConst(value) => {
                        let value = Number::Integer(*value);
                        parser.advance()?;
                        Ok(Expr::Number { value, line })
                    },
                    Token::RealConst(value) => {
                        let value = Number::Real(*value);
                        parser.advance()?;
                        Ok(Expr::Number { value, line })
                    },
                    Token::LParen => {
                        parser.advance()?;
                        let expr = parser.parse_expr()?;
                        parser.eat(&Token::RParen)?;
                        Ok(expr)
                    },
                    Token::Identifier(_) => Ok(Expr::Variable(parser.eat_identifier()?)),
                    _ => Err(parser.unexpected("expression")),
                }
            })
    }
}
