use crate::{
    Expr, Func, ParseError,
    lexer::{Lexer, Token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Pos,
}

impl Operator {
    fn binary(op: char) -> Self {
        match op {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            _ => Self::Pow,
        }
    }

    // Unary minus binds looser than '^', so -x^2 is -(x^2) and 2^-3 still parses.
    fn precedence(self) -> (usize, Assoc) {
        match self {
            Self::Add | Self::Sub => (2, Assoc::Left),
            Self::Mul | Self::Div => (3, Assoc::Left),
            Self::Neg | Self::Pos => (4, Assoc::Right),
            Self::Pow => (5, Assoc::Right),
        }
    }

    fn is_unary(self) -> bool {
        matches!(self, Self::Neg | Self::Pos)
    }
}

/// Entries on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Op(Operator, usize),
    OParen(usize),
    Func(Func),
}

/// Shunting-yard parser that reduces directly into an [`Expr`] tree.
///
/// `expect_operand` tracks whether the next token must start an operand; it
/// decides whether `-` is unary and rejects adjacent operands such as `2 x`.
struct Parser {
    operands: Vec<Expr>,
    pending: Vec<Pending>,
    expect_operand: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            operands: Vec::new(),
            pending: Vec::new(),
            expect_operand: true,
        }
    }

    fn reduce(&mut self, op: Operator, position: usize) -> Result<(), ParseError> {
        let missing = ParseError::MissingOperand { position };
        let rhs = self.operands.pop().ok_or(missing.clone())?;
        let expr = match op {
            Operator::Neg => Expr::Neg(Box::new(rhs)),
            Operator::Pos => rhs,
            binary => {
                let lhs = self.operands.pop().ok_or(missing)?;
                let (l, r) = (Box::new(lhs), Box::new(rhs));
                match binary {
                    Operator::Add => Expr::Add(l, r),
                    Operator::Sub => Expr::Sub(l, r),
                    Operator::Mul => Expr::Mul(l, r),
                    Operator::Div => Expr::Div(l, r),
                    _ => Expr::Pow(l, r),
                }
            }
        };
        self.operands.push(expr);
        Ok(())
    }

    fn push_operand(&mut self, position: usize, expr: Expr) -> Result<(), ParseError> {
        if !self.expect_operand {
            return Err(ParseError::UnexpectedToken {
                position,
                token: expr.to_string(),
            });
        }
        self.operands.push(expr);
        self.expect_operand = false;
        Ok(())
    }

    fn push_operator(&mut self, position: usize, op: Operator) -> Result<(), ParseError> {
        if !op.is_unary() {
            let (prec_rhs, assoc_rhs) = op.precedence();
            while let Some(&Pending::Op(top, top_position)) = self.pending.last() {
                let (prec_lhs, _) = top.precedence();
                let pops = prec_lhs > prec_rhs || (prec_lhs == prec_rhs && assoc_rhs == Assoc::Left);
                if !pops {
                    break;
                }
                self.pending.pop();
                self.reduce(top, top_position)?;
            }
        }
        self.pending.push(Pending::Op(op, position));
        self.expect_operand = true;
        Ok(())
    }

    fn close_paren(&mut self, position: usize) -> Result<(), ParseError> {
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position });
        }
        loop {
            match self.pending.pop() {
                Some(Pending::Op(op, op_position)) => self.reduce(op, op_position)?,
                Some(Pending::OParen(_)) => break,
                Some(Pending::Func(_)) | None => {
                    return Err(ParseError::UnbalancedParen { position });
                }
            }
        }
        if let Some(&Pending::Func(func)) = self.pending.last() {
            self.pending.pop();
            let arg = self
                .operands
                .pop()
                .ok_or(ParseError::MissingOperand { position })?;
            self.operands.push(Expr::Call(func, Box::new(arg)));
        }
        Ok(())
    }

    fn ident(&mut self, position: usize, name: String, next: Option<&Token>) -> Result<(), ParseError> {
        if let Some(func) = Func::from_name(&name) {
            if next != Some(&Token::OParen) {
                return Err(ParseError::MissingArgument { position, name });
            }
            if !self.expect_operand {
                return Err(ParseError::UnexpectedToken { position, token: name });
            }
            self.pending.push(Pending::Func(func));
            return Ok(());
        }
        let expr = match name.as_str() {
            "x" => Expr::Var,
            "pi" => Expr::Const(std::f64::consts::PI),
            "e" => Expr::Const(std::f64::consts::E),
            _ => return Err(ParseError::UnknownIdentifier { position, name }),
        };
        self.push_operand(position, expr)
    }

    fn finish(mut self, end: usize) -> Result<Expr, ParseError> {
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position: end });
        }
        while let Some(top) = self.pending.pop() {
            match top {
                Pending::Op(op, position) => self.reduce(op, position)?,
                Pending::OParen(position) => return Err(ParseError::UnbalancedParen { position }),
                Pending::Func(_) => return Err(ParseError::UnbalancedParen { position: end }),
            }
        }
        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(ParseError::MissingOperand { position: end }),
        }
    }
}

/// Parses an expression in the variable `x`.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found.
///
/// # Example
///
/// ```
/// let expr = optiviz_expr::parse("(x - 2)**2 + 3").unwrap();
/// assert_eq!(expr.eval(2.0), Ok(3.0));
/// ```
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::new(text).collect::<Result<Vec<_>, _>>()?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser::new();
    let mut tokens = tokens.into_iter().peekable();
    while let Some((position, token)) = tokens.next() {
        match token {
            Token::Number(n) => parser.push_operand(position, Expr::Const(n))?,
            Token::Ident(name) => {
                let next = tokens.peek().map(|(_, t)| t);
                parser.ident(position, name, next)?;
            }
            Token::Op(op) if parser.expect_operand => match op {
                '-' => parser.push_operator(position, Operator::Neg)?,
                '+' => parser.push_operator(position, Operator::Pos)?,
                _ => return Err(ParseError::MissingOperand { position }),
            },
            Token::Op(op) => parser.push_operator(position, Operator::binary(op))?,
            Token::OParen => {
                if !parser.expect_operand {
                    return Err(ParseError::UnexpectedToken {
                        position,
                        token: "(".into(),
                    });
                }
                parser.pending.push(Pending::OParen(position));
            }
            Token::CParen => parser.close_paren(position)?,
        }
    }

    parser.finish(text.chars().count())
}
