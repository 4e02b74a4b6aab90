use super::token::Builtin;
use super::{Column, LineNumber};
use std::rc::Rc;

pub use super::ident::Ident;

#[derive(Debug, PartialEq)]
pub enum Statement {
    Data(Column, String),
    Def(Column, Ident, Vec<Ident>, Rc<Expression>),
    Dim(Column, Vec<Variable>),
    End(Column),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Gosub(Column, LineNumber),
    Goto(Column, LineNumber),
    If(Column, Expression, Vec<Statement>),
    Input(Column, Option<String>, Vec<Variable>),
    Let(Column, Variable, Expression),
    Next(Column, Vec<Ident>),
    OnGoto(Column, Expression, Vec<LineNumber>),
    OnGosub(Column, Expression, Vec<LineNumber>),
    Print(Column, Vec<PrintItem>),
    Randomize(Column, Option<Expression>),
    Read(Column, Vec<Variable>),
    Rem(Column),
    Restore(Column, Option<LineNumber>),
    Return(Column),
    Stop(Column),
}

#[derive(Debug, PartialEq)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(_, ident) | Variable::Array(_, ident, _) => ident,
        }
    }
}

/// `,` advances to the next print zone, `;` prints nothing.
/// Either one last in the list suppresses the newline.
#[derive(Debug, PartialEq)]
pub enum PrintItem {
    Expression(Expression),
    Zone(Column),
    Empty(Column),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Number(Column, f32),
    String(Column, Rc<str>),
    Var(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
    Builtin(Column, Builtin, Vec<Expression>),
    UserFn(Column, Ident, Vec<Expression>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Number(col, ..)
            | String(col, ..)
            | Var(col, ..)
            | Array(col, ..)
            | Builtin(col, ..)
            | UserFn(col, ..)
            | Negation(col, ..)
            | Not(col, ..)
            | Power(col, ..)
            | Multiply(col, ..)
            | Divide(col, ..)
            | Add(col, ..)
            | Subtract(col, ..)
            | Equal(col, ..)
            | NotEqual(col, ..)
            | Less(col, ..)
            | LessEqual(col, ..)
            | Greater(col, ..)
            | GreaterEqual(col, ..)
            | And(col, ..)
            | Or(col, ..) => col.clone(),
        }
    }
}
