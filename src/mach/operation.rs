use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

const TRUE: f32 = -1.0;
const FALSE: f32 = 0.0;

/// ## Operators
///
/// Operands are promoted with `coerce_to_expression_type` first,
/// so only `Single` and `String` reach the arithmetic.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        match val.coerce_to_expression_type() {
            Val::Single(n) => Ok(Val::Single(-n)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Single(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Single(l * r))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Single(l / r))
    }

    /// Adds numbers or concatenates strings.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs.coerce_to_expression_type(), rhs.coerce_to_expression_type()) {
            (Single(l), Single(r)) => Ok(Single(l + r)),
            (String(l), String(r)) => Ok(String((l.to_string() + &r).into())),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Single(l - r))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::relation(lhs, rhs, |o| o == Ordering::Equal)
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        let ordering = lhs.compare(&rhs)?;
        Ok(Operation::truth(ordering != Some(Ordering::Equal)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::relation(lhs, rhs, |o| o == Ordering::Less)
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::relation(lhs, rhs, |o| o != Ordering::Greater)
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::relation(lhs, rhs, |o| o == Ordering::Greater)
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::relation(lhs, rhs, |o| o != Ordering::Less)
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::integers(lhs, rhs)?;
        Ok(Val::Single((l & r) as f32))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::integers(lhs, rhs)?;
        Ok(Val::Single((l | r) as f32))
    }

    pub fn not(val: Val) -> Result<Val> {
        let n = f32::try_from(val)? as i32;
        Ok(Val::Single(!n as f32))
    }

    fn relation(lhs: Val, rhs: Val, test: fn(Ordering) -> bool) -> Result<Val> {
        let ordering = lhs.compare(&rhs)?;
        Ok(Operation::truth(ordering.map_or(false, test)))
    }

    fn truth(b: bool) -> Val {
        Val::Single(if b { TRUE } else { FALSE })
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f32, f32)> {
        match (lhs.coerce_to_expression_type(), rhs.coerce_to_expression_type()) {
            (Val::Single(l), Val::Single(r)) => Ok((l, r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn integers(lhs: Val, rhs: Val) -> Result<(i32, i32)> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok((l as i32, r as i32))
    }
}
