use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses addition and subtraction.
    ///
    /// Handles left-associative binary operators: `+` and `-`.
    ///
    /// The rule is: `expr := term (("+" | "-") term)*`
    pub(in crate::interpreter::parser) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_chain(Self::parse_term, |token| match token {
                Token::Plus => Some(BinaryOperator::Add),
                Token::Minus => Some(BinaryOperator::Sub),
                _ => None,
            })
    }

    /// Parses multiplication-level expressions.
    ///
    /// The rule is: `term := factor (("*" | "//" | "/") factor)*`
    pub(in crate::interpreter::parser) fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_chain(Self::parse_factor, |token| match token {
                Token::Star => Some(BinaryOperator::Mul),
                Token::DoubleSlash => Some(BinaryOperator::IntegerDiv),
                Token::Slash => Some(BinaryOperator::FloatDiv),
                _ => None,
            })
    }

    /// Folds `operand (op operand)*` into a left-leaning tree.
    ///
    /// Every link deepens the tree by one, so each counts against the
    /// nesting limit until the whole chain is done.
    fn parse_chain(&mut self,
                   operand: fn(&mut Self) -> ParseResult<Expr>,
                   operator: fn(&Token) -> Option<BinaryOperator>)
                   -> ParseResult<Expr> {
        let mut left = operand(self)?;
        let mut links = 0;

        while let Some(op) = operator(self.peek()) {
            self.descend()?;
            links += 1;

            let line = self.advance()?.line;
            let right = operand(self)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
        }

        self.ascend(links);
        Ok(left)
    }
}
