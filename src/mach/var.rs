use super::{Array, Val};
use crate::error;
use crate::lang::{Error, Ident};
use std::collections::HashMap;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Bound used when an array is indexed before any DIM.
const DEFAULT_BOUND: usize = 10;

/// ## Variable memory
///
/// Keyed by `Ident`, so only the type and the first two
/// characters of a name select the slot.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Ident, Val>,
    arrays: HashMap<Ident, Array>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    /// The stored value, or the zero value of the declared type.
    pub fn fetch(&self, ident: &Ident) -> Val {
        match self.vars.get(ident) {
            Some(val) => val.clone(),
            None => Val::default_for(ident.var_type()),
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        let value = value.coerce_to(ident.var_type())?;
        match self.vars.get_mut(ident) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(ident.clone(), value);
            }
        }
        Ok(())
    }

    pub fn dimension_array(&mut self, ident: &Ident, bounds: Vec<Val>) -> Result<()> {
        if self.arrays.contains_key(ident) {
            return Err(error!(RedimensionedArray));
        }
        let mut dims = Vec::with_capacity(bounds.len());
        for bound in bounds {
            let bound = f32::try_from(bound)?.floor();
            if bound < 0.0 {
                return Err(error!(NegativeArrayDim));
            }
            dims.push(bound as usize);
        }
        let array = Array::new(ident.var_type(), dims)?;
        self.arrays.insert(ident.clone(), array);
        Ok(())
    }

    pub fn fetch_array(&mut self, ident: &Ident, indices: Vec<Val>) -> Result<Val> {
        let indices = Var::indices(indices)?;
        self.array(ident, indices.len())?.get(&indices)
    }

    pub fn store_array(&mut self, ident: &Ident, indices: Vec<Val>, value: Val) -> Result<()> {
        let indices = Var::indices(indices)?;
        self.array(ident, indices.len())?.set(&indices, value)
    }

    fn array(&mut self, ident: &Ident, dimensions: usize) -> Result<&mut Array> {
        if !self.arrays.contains_key(ident) {
            let array = Array::new(ident.var_type(), vec![DEFAULT_BOUND; dimensions])?;
            self.arrays.insert(ident.clone(), array);
        }
        match self.arrays.get_mut(ident) {
            Some(array) => Ok(array),
            None => Err(error!(RuntimeError; "ARRAY NOT DIMENSIONED")),
        }
    }

    fn indices(vals: Vec<Val>) -> Result<Vec<i64>> {
        let mut indices = Vec::with_capacity(vals.len());
        for val in vals {
            let n = f32::try_from(val)?.floor();
            if !n.is_finite() {
                return Err(error!(OutOfArrayBounds));
            }
            indices.push(n as i64);
        }
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, VarType};

    fn ident(name: &str, var_type: VarType) -> Ident {
        Ident::new(name, var_type)
    }

    #[test]
    fn test_two_character_variables() {
        let mut var = Var::new();
        var.store(&ident("LINES", VarType::Float), Val::Single(4.0))
            .unwrap();
        assert_eq!(var.fetch(&ident("LIVES", VarType::Float)), Val::Single(4.0));
        assert_eq!(var.fetch(&ident("LI", VarType::Int)), Val::Integer(0));
    }

    #[test]
    fn test_store_coerces() {
        let mut var = Var::new();
        let i = ident("I", VarType::Int);
        var.store(&i, Val::Single(-0.5)).unwrap();
        assert_eq!(var.fetch(&i), Val::Integer(-1));
        let e = var
            .store(&ident("S", VarType::String), Val::Single(1.0))
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_implicit_dimension() {
        let mut var = Var::new();
        let a = ident("A", VarType::Float);
        var.store_array(&a, vec![Val::Single(10.0)], Val::Single(1.0))
            .unwrap();
        let e = var.fetch_array(&a, vec![Val::Single(11.0)]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::OutOfArrayBounds);
        let e = var.dimension_array(&a, vec![Val::Single(5.0)]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::RedimensionedArray);
    }

    #[test]
    fn test_dimension_array() {
        let mut var = Var::new();
        let a = ident("ARRAY", VarType::String);
        var.dimension_array(&a, vec![Val::Single(2.0), Val::Single(3.0)])
            .unwrap();
        let alias = ident("AR", VarType::String);
        var.store_array(&alias, vec![Val::Single(2.0), Val::Single(3.0)], Val::String("X".into()))
            .unwrap();
        assert_eq!(
            var.fetch_array(&a, vec![Val::Single(2.0), Val::Single(3.0)]),
            Ok(Val::String("X".into()))
        );
        let e = var
            .dimension_array(&ident("B", VarType::Float), vec![Val::Single(-1.0)])
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::NegativeArrayDim);
    }
}
