use super::{ast::*, token::*, Column, Error, LineNumber};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(line_number: LineNumber, tokens: &[(Token, Column)]) -> Result<Vec<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, (Token, Column)>,
    peeked: Option<&'a (Token, Column)>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [(Token, Column)]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        parse.statement_list()
    }

    /// Colon separated statements up to the end of the line.
    fn statement_list(&mut self) -> Result<Vec<Statement>> {
        let mut r: Vec<Statement> = vec![];
        loop {
            match self.peek() {
                None | Some(Token::Eol) => return Ok(r),
                Some(Token::Colon) => {
                    self.next();
                    continue;
                }
                _ => {}
            }
            match self.statement() {
                Ok(s) => r.push(s),
                Err(e) => return Err(e.in_column(&self.col)),
            }
            match self.peek() {
                None | Some(Token::Eol) | Some(Token::Colon) | Some(Token::Remark(_)) => {}
                Some(_) => {
                    self.next();
                    return Err(error!(SyntaxError, ..&self.col; "EXPECTED END OF STATEMENT"));
                }
            }
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        let (token, col) = match self.peeked.take() {
            Some(t) => t,
            None => self.token_stream.next()?,
        };
        self.col = col.clone();
        Some(token)
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.token_stream.next();
        }
        self.peeked.map(|(token, _)| token)
    }

    fn peek_column(&mut self) -> Column {
        self.peek();
        match self.peeked {
            Some((_, col)) => col.clone(),
            None => self.column(),
        }
    }

    fn at_end_of_statement(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Eol) | Some(Token::Colon) | Some(Token::Remark(_))
        )
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => {
                let column = self.peek_column();
                Statement::r#let(self, column)
            }
            Some(Token::Literal(Literal::Number(_))) => {
                let column = self.peek_column();
                Statement::r#goto(self, column)
            }
            Some(Token::Word(word)) => {
                self.next();
                Statement::for_word(self, word)
            }
            Some(Token::Remark(_)) => {
                self.next();
                Ok(Statement::Rem(self.column()))
            }
            Some(Token::Data(payload)) => {
                self.next();
                Ok(Statement::Data(self.column(), payload.clone()))
            }
            _ => {
                self.next();
                Err(error!(SyntaxError; "EXPECTED STATEMENT"))
            }
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        self.expression_at(0)
    }

    fn expression_at(&mut self, precedence: usize) -> Result<Expression> {
        let mut lhs = self.prefix()?;
        loop {
            let op = match self.peek() {
                Some(Token::Operator(op)) => op,
                _ => break,
            };
            let op_precedence = match Expression::op_precedence(op) {
                Some(p) => p,
                None => break,
            };
            if op_precedence < precedence {
                break;
            }
            self.next();
            let column = self.column();
            let rhs = if *op == Operator::Caret {
                self.expression_at(op_precedence)?
            } else {
                self.expression_at(op_precedence + 1)?
            };
            lhs = Expression::for_binary_op(column, op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expression> {
        let token = self.next();
        let column = self.column();
        match token {
            Some(Token::Operator(Operator::Minus)) => {
                let expr = self.prefix()?;
                Ok(Expression::Negation(column, Box::new(expr)))
            }
            Some(Token::Operator(Operator::Plus)) => self.prefix(),
            Some(Token::Operator(Operator::Not)) => {
                let expr = self.expression_at(Expression::NOT_OPERAND)?;
                Ok(Expression::Not(column, Box::new(expr)))
            }
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Literal(Literal::Number(n))) => Ok(Expression::Number(column, *n)),
            Some(Token::Literal(Literal::String(s))) => {
                Ok(Expression::String(column, s.as_str().into()))
            }
            Some(Token::Ident(ident)) => match self.peek() {
                Some(Token::LParen) => {
                    let indices = self.expression_list()?;
                    Ok(Expression::Array(column, ident.clone(), indices))
                }
                _ => Ok(Expression::Var(column, ident.clone())),
            },
            Some(Token::Builtin(builtin)) => match self.peek() {
                Some(Token::LParen) => {
                    let args = self.expression_list()?;
                    Ok(Expression::Builtin(column, *builtin, args))
                }
                _ if *builtin == Builtin::Rnd => Ok(Expression::Builtin(column, *builtin, vec![])),
                _ => Err(error!(SyntaxError; "EXPECTED LEFT PARENTHESIS")),
            },
            Some(Token::Word(Word::Fn)) => {
                let (ident_column, ident) = self.ident()?;
                let args = match self.peek() {
                    Some(Token::LParen) => self.expression_list()?,
                    _ => vec![],
                };
                Ok(Expression::UserFn(column.start..ident_column.end, ident, args))
            }
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn printer_list(&mut self) -> Result<Vec<PrintItem>> {
        let mut v: Vec<PrintItem> = vec![];
        loop {
            match self.peek() {
                None | Some(Token::Eol) | Some(Token::Colon) | Some(Token::Remark(_)) => {
                    return Ok(v)
                }
                Some(Token::Semicolon) => {
                    self.next();
                    v.push(PrintItem::Empty(self.column()));
                }
                Some(Token::Comma) => {
                    self.next();
                    v.push(PrintItem::Zone(self.column()));
                }
                _ => v.push(PrintItem::Expression(self.expression()?)),
            };
        }
    }

    fn ident(&mut self) -> Result<(Column, Ident)> {
        let ident = match self.next() {
            Some(Token::Ident(i)) => i.clone(),
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        Ok((self.column(), ident))
    }

    fn ident_list(&mut self) -> Result<Vec<Ident>> {
        let mut v = vec![self.ident()?.1];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.ident()?.1);
        }
        Ok(v)
    }

    fn variable(&mut self) -> Result<Variable> {
        let (column, ident) = self.ident()?;
        match self.peek() {
            Some(Token::LParen) => {
                let indices = self.expression_list()?;
                Ok(Variable::Array(column.start..self.col.end, ident, indices))
            }
            _ => Ok(Variable::Unary(column, ident)),
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn line_number(&mut self) -> Result<LineNumber> {
        if let Some(Token::Literal(Literal::Number(n))) = self.next() {
            if n.fract() == 0.0 && *n >= 0.0 && *n <= LineNumber::max_value() as f32 {
                return Ok(*n as LineNumber);
            }
            return Err(error!(SyntaxError; "INVALID LINE NUMBER"));
        }
        Err(error!(SyntaxError; "EXPECTED LINE NUMBER"))
    }

    fn line_number_list(&mut self) -> Result<Vec<LineNumber>> {
        let mut v = vec![self.line_number()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.line_number()?);
        }
        Ok(v)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        Err(error!(SyntaxError;
            match token {
                Token::Unknown(_) | Token::Eol | Token::Remark(_) | Token::Data(_) => {
                    "UNEXPECTED TOKEN"
                }
                Token::Literal(_) => "EXPECTED LITERAL",
                Token::Word(Word::Then) => "EXPECTED THEN",
                Token::Word(Word::To) => "EXPECTED TO",
                Token::Word(Word::Fn) => "EXPECTED FN",
                Token::Word(_) => "EXPECTED RESERVED WORD",
                Token::Operator(Operator::Equal) => "EXPECTED EQUALS",
                Token::Operator(_) => "EXPECTED OPERATOR",
                Token::Builtin(_) => "EXPECTED FUNCTION",
                Token::Ident(_) => "EXPECTED VARIABLE",
                Token::LParen => "EXPECTED LEFT PARENTHESIS",
                Token::RParen => "EXPECTED RIGHT PARENTHESIS",
                Token::Comma => "EXPECTED COMMA",
                Token::Colon => "EXPECTED COLON",
                Token::Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }
}

impl Expression {
    const NOT_OPERAND: usize = 3;

    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
            Not => Expression::Not(col, rhs),
        }
    }

    /// Binding power of binary operators. `NOT` is prefix only.
    fn op_precedence(op: &Operator) -> Option<usize> {
        use Operator::*;
        match op {
            Or => Some(0),
            And => Some(1),
            Not => None,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => Some(3),
            Plus | Minus => Some(4),
            Multiply | Divide => Some(5),
            Caret => Some(6),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Def => Self::r#def(parse, column),
            Dim => Self::r#dim(parse, column),
            End => Ok(Statement::End(column)),
            For => Self::r#for(parse, column),
            Gosub => Ok(Statement::Gosub(column, parse.line_number()?)),
            Goto => Ok(Statement::Goto(column, parse.line_number()?)),
            If => Self::r#if(parse, column),
            Input => Self::r#input(parse, column),
            Let => Self::r#let(parse, column),
            Next => Self::r#next(parse, column),
            On => Self::r#on(parse, column),
            Print => Ok(Statement::Print(column, parse.printer_list()?)),
            Randomize => Self::r#randomize(parse, column),
            Read => Ok(Statement::Read(column, parse.variable_list()?)),
            Restore => Self::r#restore(parse, column),
            Return => Ok(Statement::Return(column)),
            Stop => Ok(Statement::Stop(column)),
            Data | Rem | Fn | Step | Then | To => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Let(column, var, expr))
    }

    fn r#goto(parse: &mut Parser, column: Column) -> Result<Statement> {
        Ok(Statement::Goto(column, parse.line_number()?))
    }

    fn r#def(parse: &mut Parser, column: Column) -> Result<Statement> {
        parse.expect(Token::Word(Word::Fn))?;
        let (_, name) = parse.ident()?;
        let mut params = vec![];
        if let Some(Token::LParen) = parse.peek() {
            parse.next();
            params = parse.ident_list()?;
            parse.expect(Token::RParen)?;
        }
        parse.expect(Token::Operator(Operator::Equal))?;
        let body = parse.expression()?;
        Ok(Statement::Def(column, name, params, Rc::new(body)))
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let vars = parse.variable_list()?;
        for var in &vars {
            if let Variable::Unary(col, _) = var {
                return Err(error!(SyntaxError, ..col; "EXPECTED ARRAY"));
            }
        }
        Ok(Statement::Dim(column, vars))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let (_, ident) = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let predicate = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Then)) => {}
            Some(Token::Word(Word::Goto)) => {
                let goto = Statement::Goto(parse.column(), parse.line_number()?);
                return Ok(Statement::If(column, predicate, vec![goto]));
            }
            _ => return Err(error!(SyntaxError; "EXPECTED THEN")),
        }
        let then = parse.statement_list()?;
        Ok(Statement::If(column, predicate, then))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut prompt = None;
        if let Some(Token::Literal(Literal::String(s))) = parse.peek() {
            parse.next();
            prompt = Some(s.clone());
            match parse.next() {
                Some(Token::Semicolon) | Some(Token::Comma) => {}
                _ => return Err(error!(SyntaxError; "EXPECTED SEMICOLON")),
            }
        }
        Ok(Statement::Input(column, prompt, parse.variable_list()?))
    }

    fn r#next(parse: &mut Parser, column: Column) -> Result<Statement> {
        if parse.at_end_of_statement() {
            return Ok(Statement::Next(column, vec![]));
        }
        Ok(Statement::Next(column, parse.ident_list()?))
    }

    fn r#on(parse: &mut Parser, column: Column) -> Result<Statement> {
        let index = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Goto)) => {
                Ok(Statement::OnGoto(column, index, parse.line_number_list()?))
            }
            Some(Token::Word(Word::Gosub)) => {
                Ok(Statement::OnGosub(column, index, parse.line_number_list()?))
            }
            _ => Err(error!(SyntaxError; "EXPECTED GOTO OR GOSUB")),
        }
    }

    fn r#randomize(parse: &mut Parser, column: Column) -> Result<Statement> {
        if parse.at_end_of_statement() {
            return Ok(Statement::Randomize(column, None));
        }
        Ok(Statement::Randomize(column, Some(parse.expression()?)))
    }

    fn r#restore(parse: &mut Parser, column: Column) -> Result<Statement> {
        if parse.at_end_of_statement() {
            return Ok(Statement::Restore(column, None));
        }
        Ok(Statement::Restore(column, Some(parse.line_number()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex;
    use super::*;
    use crate::lang::VarType;

    fn parse_str(s: &str) -> Statement {
        let tokens = lex(s, 1).unwrap();
        match parse(10, &tokens) {
            Ok(mut v) => {
                if v.len() != 1 {
                    panic!("{:?}", v);
                }
                v.pop().unwrap()
            }
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    fn var(name: &str) -> Ident {
        Ident::new(name, VarType::Float)
    }

    #[test]
    fn test_let_literal() {
        let answer = Statement::Let(
            0..3,
            Variable::Unary(4..5, var("A")),
            Expression::Number(8..11, 123.0),
        );
        assert_eq!(parse_str("LET A = 123"), answer);
    }

    #[test]
    fn test_implied_let() {
        let answer = Statement::Let(
            0..3,
            Variable::Unary(0..3, var("TER")),
            Expression::Var(4..7, var("BAR")),
        );
        assert_eq!(parse_str("ter=bar:"), answer);
    }

    #[test]
    fn test_precedence_and_paren() {
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, var("A")),
            Expression::Subtract(
                4..5,
                Box::new(Expression::Number(3..4, 2.0)),
                Box::new(Expression::Multiply(
                    18..19,
                    Box::new(Expression::Add(
                        7..8,
                        Box::new(Expression::Number(6..7, 3.0)),
                        Box::new(Expression::Builtin(
                            8..11,
                            Builtin::Cos,
                            vec![Expression::Number(12..16, 3.14)],
                        )),
                    )),
                    Box::new(Expression::Number(19..20, 4.0)),
                )),
            ),
        );
        assert_eq!(parse_str("A=(2-(3+cos(3.14))*4)"), answer);
    }

    #[test]
    fn test_power_is_right_associative() {
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, var("A")),
            Expression::Power(
                3..4,
                Box::new(Expression::Number(2..3, 2.0)),
                Box::new(Expression::Power(
                    5..6,
                    Box::new(Expression::Number(4..5, 3.0)),
                    Box::new(Expression::Number(6..7, 2.0)),
                )),
            ),
        );
        assert_eq!(parse_str("A=2^3^2"), answer);
    }

    #[test]
    fn test_printer_list() {
        let tokens = lex("? 1 2,3;:?", 1).unwrap();
        assert_eq!(
            parse(10, &tokens).unwrap(),
            vec!(
                Statement::Print(
                    0..1,
                    vec!(
                        PrintItem::Expression(Expression::Number(2..3, 1.0)),
                        PrintItem::Expression(Expression::Number(4..5, 2.0)),
                        PrintItem::Zone(5..6),
                        PrintItem::Expression(Expression::Number(6..7, 3.0)),
                        PrintItem::Empty(7..8),
                    )
                ),
                Statement::Print(9..10, vec!()),
            )
        );
    }

    #[test]
    fn test_if_then_line_number() {
        let answer = Statement::If(
            0..2,
            Expression::Var(3..4, var("X")),
            vec![Statement::Goto(10..13, 100)],
        );
        assert_eq!(parse_str("IF X THEN 100"), answer);
    }

    #[test]
    fn test_error_carries_line_and_column() {
        let tokens = lex("PRINT 1+", 3).unwrap();
        let e = parse(40, &tokens).unwrap_err();
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 40 (8..8); EXPECTED EXPRESSION");
    }
}
