use crate::error;
use crate::lang::{Error, VarType};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## BASIC values
///
/// `Integer` only appears as the storage type of `%` variables.
/// Arithmetic and comparison run on `Single` or `String`.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    String(Rc<str>),
    Integer(i32),
    Single(f32),
}

impl Default for Val {
    fn default() -> Val {
        Val::Single(0.0)
    }
}

impl Val {
    pub fn default_for(var_type: VarType) -> Val {
        match var_type {
            VarType::Float => Val::Single(0.0),
            VarType::Int => Val::Integer(0),
            VarType::String => Val::String("".into()),
        }
    }

    pub fn var_type(&self) -> VarType {
        match self {
            Val::String(_) => VarType::String,
            Val::Integer(_) => VarType::Int,
            Val::Single(_) => VarType::Float,
        }
    }

    /// Converts for storage. Narrowing to an integer floors like `INT`.
    pub fn coerce_to(self, var_type: VarType) -> Result<Val> {
        use Val::*;
        match (self, var_type) {
            (String(s), VarType::String) => Ok(String(s)),
            (Integer(n), VarType::Int) => Ok(Integer(n)),
            (Single(n), VarType::Float) => Ok(Single(n)),
            (Integer(n), VarType::Float) => Ok(Single(n as f32)),
            (Single(n), VarType::Int) => Ok(Integer(n.floor() as i32)),
            (String(_), _) => Err(error!(TypeMismatch; "EXPECTED NUMBER")),
            (_, VarType::String) => Err(error!(TypeMismatch; "EXPECTED STRING")),
        }
    }

    pub fn coerce_to_expression_type(self) -> Val {
        match self {
            Val::Integer(n) => Val::Single(n as f32),
            _ => self,
        }
    }

    /// `None` when either side is NaN.
    pub fn compare(&self, other: &Val) -> Result<Option<Ordering>> {
        use Val::*;
        match (self, other) {
            (String(l), String(r)) => Ok(Some(l.cmp(r))),
            (String(_), _) | (_, String(_)) => Err(error!(TypeMismatch)),
            _ => {
                let l = f32::try_from(self.clone())?;
                let r = f32::try_from(other.clone())?;
                Ok(l.partial_cmp(&r))
            }
        }
    }

    /// Text from READ or INPUT. Strings are taken verbatim, numbers
    /// are trimmed first. `None` if a number was expected and not found.
    pub fn try_parse(var_type: VarType, text: &str) -> Option<Val> {
        match var_type {
            VarType::String => Some(Val::String(text.into())),
            VarType::Float | VarType::Int => parse_number(text.trim()).map(Val::Single),
        }
    }

    pub fn is_true(&self) -> Result<bool> {
        Ok(f32::try_from(self.clone())? != 0.0)
    }

    /// The text PRINT writes for this value.
    pub fn to_print_string(&self) -> String {
        match self {
            Val::String(s) => s.to_string(),
            Val::Integer(n) => pad_number(n.to_string()),
            Val::Single(n) => pad_number(format_f32(*n)),
        }
    }
}

fn pad_number(s: String) -> String {
    if s.starts_with('-') {
        format!("{} ", s)
    } else {
        format!(" {} ", s)
    }
}

fn parse_number(s: &str) -> Option<f32> {
    if s.is_empty() {
        return None;
    }
    let mut normal = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '0'..='9' | '.' | '+' | '-' => normal.push(ch),
            'E' | 'e' | 'D' | 'd' => normal.push('E'),
            _ => return None,
        }
    }
    normal.parse::<f32>().ok()
}

/// Parses the longest numeric prefix of `s`, for `VAL`.
pub fn parse_number_prefix(s: &str) -> f32 {
    let candidate: String = s
        .chars()
        .take_while(|ch| matches!(ch, '0'..='9' | '.' | '+' | '-' | 'E' | 'e' | 'D' | 'd'))
        .collect();
    for end in (1..=candidate.len()).rev() {
        if let Some(n) = parse_number(&candidate[..end]) {
            return n;
        }
    }
    0.0
}

/// Formats a float without the PRINT padding.
pub fn format_f32(n: f32) -> String {
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !n.is_finite() {
        return n.to_string().to_ascii_uppercase();
    }
    let magnitude = n.abs();
    if (1e-4..1e7).contains(&magnitude) {
        let s = n.to_string();
        let fraction = s.find('.').map_or(0, |dot| s.len() - dot - 1);
        if fraction <= 7 {
            return s;
        }
        let s = format!("{:.7}", n);
        return s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    let s = format!("{:.6e}", n);
    let (mantissa, exponent) = match s.find('e') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (&s[..], "0"),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}E{}{:02}", mantissa, sign, exponent.abs())
}

impl TryFrom<Val> for f32 {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        match val {
            Val::Single(n) => Ok(n),
            Val::Integer(n) => Ok(n as f32),
            Val::String(_) => Err(error!(TypeMismatch; "EXPECTED NUMBER")),
        }
    }
}

impl TryFrom<Val> for Rc<str> {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        match val {
            Val::String(s) => Ok(s),
            _ => Err(error!(TypeMismatch; "EXPECTED STRING")),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::String(s) => write!(f, "{}", s),
            Val::Integer(n) => write!(f, "{}", n),
            Val::Single(n) => write!(f, "{}", format_f32(*n)),
        }
    }
}
