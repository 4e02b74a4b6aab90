use super::val::{format_f32, parse_number_prefix};
use super::Val;
use crate::error;
use crate::lang::token::Builtin;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Argument kinds checked before a builtin runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Number,
    String,
}

pub struct Function {}

impl Function {
    pub fn arity(builtin: Builtin) -> std::ops::RangeInclusive<usize> {
        match builtin {
            Builtin::Rnd => 0..=1,
            Builtin::Left | Builtin::Right => 2..=2,
            Builtin::Mid => 2..=3,
            _ => 1..=1,
        }
    }

    pub fn kinds(builtin: Builtin) -> &'static [Kind] {
        match builtin {
            Builtin::Asc | Builtin::Len | Builtin::Val => &[Kind::String],
            Builtin::Left | Builtin::Right => &[Kind::String, Kind::Number],
            Builtin::Mid => &[Kind::String, Kind::Number, Kind::Number],
            _ => &[Kind::Number],
        }
    }

    /// Count then kind of every argument. `%` values count as numbers.
    pub fn check(builtin: Builtin, args: &[Val]) -> Result<()> {
        if !Function::arity(builtin).contains(&args.len()) {
            return Err(error!(WrongNumberOfArguments));
        }
        for (arg, kind) in args.iter().zip(Function::kinds(builtin)) {
            match (arg, kind) {
                (Val::String(_), Kind::String) => {}
                (Val::Single(_), Kind::Number) | (Val::Integer(_), Kind::Number) => {}
                (_, Kind::String) => return Err(error!(TypeMismatch; "EXPECTED STRING")),
                (_, Kind::Number) => return Err(error!(TypeMismatch; "EXPECTED NUMBER")),
            }
        }
        Ok(())
    }

    /// Every builtin except `RND` and `TAB`, which need machine state.
    pub fn call(builtin: Builtin, args: Vec<Val>) -> Result<Val> {
        Function::check(builtin, &args)?;
        let args = &mut args.into_iter();
        match builtin {
            Builtin::Abs => Ok(Val::Single(number(next(args))?.abs())),
            Builtin::Asc => Function::asc(next(args)),
            Builtin::Atn => Ok(Val::Single(number(next(args))?.atan())),
            Builtin::Chr => Function::chr(next(args)),
            Builtin::Cos => Ok(Val::Single(number(next(args))?.cos())),
            Builtin::Exp => Ok(Val::Single(number(next(args))?.exp())),
            Builtin::Int => Ok(Val::Single(number(next(args))?.floor())),
            Builtin::Left => Function::left(next(args), next(args)),
            Builtin::Len => Ok(Val::Single(string(next(args))?.chars().count() as f32)),
            Builtin::Log => Function::log(next(args)),
            Builtin::Mid => Function::mid(next(args), next(args), args.next()),
            Builtin::Right => Function::right(next(args), next(args)),
            Builtin::Sgn => Function::sgn(next(args)),
            Builtin::Sin => Ok(Val::Single(number(next(args))?.sin())),
            Builtin::Spc => Function::spc(next(args)),
            Builtin::Sqr => Function::sqr(next(args)),
            Builtin::Str => Ok(Val::String(Function::str(number(next(args))?).into())),
            Builtin::Tan => Ok(Val::Single(number(next(args))?.tan())),
            Builtin::Val => Ok(Val::Single(parse_number_prefix(string(next(args))?.trim()))),
            Builtin::Rnd | Builtin::Tab => {
                Err(error!(RuntimeError; "FUNCTION NEEDS MACHINE STATE"))
            }
        }
    }

    fn asc(val: Val) -> Result<Val> {
        match string(val)?.chars().next() {
            Some(ch) => Ok(Val::Single(ch as u32 as f32)),
            None => Err(error!(InvalidArgument)),
        }
    }

    fn chr(val: Val) -> Result<Val> {
        let n = number(val)?.trunc();
        if !(0.0..=255.0).contains(&n) {
            return Err(error!(InvalidArgument));
        }
        let ch = char::from(n as u8);
        Ok(Val::String(ch.to_string().into()))
    }

    fn left(s: Val, n: Val) -> Result<Val> {
        let s = string(s)?;
        let n = count(n)?;
        Ok(Val::String(s.chars().take(n).collect::<String>().into()))
    }

    fn right(s: Val, n: Val) -> Result<Val> {
        let s = string(s)?;
        let n = count(n)?;
        let len = s.chars().count();
        let skip = len.saturating_sub(n);
        Ok(Val::String(s.chars().skip(skip).collect::<String>().into()))
    }

    /// Start clamps to 1, length clamps to the rest of the string.
    fn mid(s: Val, start: Val, len: Option<Val>) -> Result<Val> {
        let s = string(s)?;
        let start = number(start)?.trunc().max(1.0) as usize;
        let tail = s.chars().count().saturating_sub(start - 1);
        let len = match len {
            None => tail,
            Some(val) => {
                let n = number(val)?.trunc().max(0.0) as usize;
                n.min(tail)
            }
        };
        Ok(Val::String(
            s.chars().skip(start - 1).take(len).collect::<String>().into(),
        ))
    }

    fn log(val: Val) -> Result<Val> {
        let n = number(val)?;
        if n <= 0.0 {
            return Err(error!(InvalidArgument));
        }
        Ok(Val::Single(n.ln()))
    }

    fn sgn(val: Val) -> Result<Val> {
        let n = number(val)?;
        let sign = if n > 0.0 {
            1.0
        } else if n < 0.0 {
            -1.0
        } else {
            0.0
        };
        Ok(Val::Single(sign))
    }

    fn sqr(val: Val) -> Result<Val> {
        let n = number(val)?;
        if n <= 0.0 {
            return Err(error!(InvalidArgument));
        }
        Ok(Val::Single(n.sqrt()))
    }

    fn spc(val: Val) -> Result<Val> {
        let n = clamp_column(number(val)?);
        Ok(Val::String(" ".repeat(n).into()))
    }

    /// Spaces up to `val` from the current output column, if ahead of it.
    pub fn tab(val: Val, column: usize) -> Result<Val> {
        let target = clamp_column(number(val)?);
        let pad = target.saturating_sub(column);
        Ok(Val::String(" ".repeat(pad).into()))
    }

    /// `STR$` text: a leading space for positive numbers, no trailing space.
    pub fn str(n: f32) -> String {
        let s = format_f32(n);
        if s.starts_with('-') {
            s
        } else {
            format!(" {}", s)
        }
    }
}

fn next(args: &mut std::vec::IntoIter<Val>) -> Val {
    args.next().unwrap_or_default()
}

fn number(val: Val) -> Result<f32> {
    f32::try_from(val)
}

fn string(val: Val) -> Result<Rc<str>> {
    Rc::<str>::try_from(val)
}

fn count(val: Val) -> Result<usize> {
    let n = number(val)?.trunc();
    if n < 0.0 {
        return Err(error!(InvalidArgument));
    }
    Ok(n as usize)
}

fn clamp_column(n: f32) -> usize {
    n.trunc().max(0.0).min(255.0) as usize
}
