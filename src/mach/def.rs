use crate::error;
use crate::lang::ast::Expression;
use crate::lang::{Error, Ident};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// A `DEF FN` body and its parameter names.
#[derive(Debug)]
pub struct UserFn {
    pub params: Vec<Ident>,
    pub body: Rc<Expression>,
}

/// ## User function table

#[derive(Debug, Default)]
pub struct Defs {
    fns: HashMap<Ident, Rc<UserFn>>,
}

impl Defs {
    pub fn new() -> Defs {
        Defs::default()
    }

    /// Executing the same DEF again replaces the definition.
    pub fn define(&mut self, name: &Ident, params: &[Ident], body: &Rc<Expression>) {
        let function = UserFn {
            params: params.to_vec(),
            body: body.clone(),
        };
        self.fns.insert(name.clone(), Rc::new(function));
    }

    pub fn get(&self, name: &Ident) -> Result<Rc<UserFn>> {
        match self.fns.get(name) {
            Some(function) => Ok(function.clone()),
            None => Err(error!(UndefinedFunction)),
        }
    }
}
