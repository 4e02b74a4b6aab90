// Used in both Token and Ast

use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Float,
    Int,
    String,
}

/// A variable name with its declared type. The `$` or `%` suffix
/// is not part of the stored name.
///
/// Only the type and the first two characters are significant:
/// `LINES` and `LIVES` name the same float variable.
#[derive(Debug, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
    Integer(Rc<str>),
}

impl Ident {
    pub fn new(name: &str, var_type: VarType) -> Ident {
        let name: Rc<str> = name.to_ascii_uppercase().into();
        match var_type {
            VarType::Float => Ident::Plain(name),
            VarType::String => Ident::String(name),
            VarType::Int => Ident::Integer(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Ident::Plain(s) | Ident::String(s) | Ident::Integer(s) => s,
        }
    }

    pub fn var_type(&self) -> VarType {
        match self {
            Ident::Plain(_) => VarType::Float,
            Ident::String(_) => VarType::String,
            Ident::Integer(_) => VarType::Int,
        }
    }

    fn significant(&self) -> impl Iterator<Item = char> + '_ {
        self.name().chars().take(2).map(|c| c.to_ascii_uppercase())
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Ident) -> bool {
        self.var_type() == other.var_type() && self.significant().eq(other.significant())
    }
}

impl Eq for Ident {}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.var_type().hash(state);
        for ch in self.significant() {
            ch.hash(state);
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Ident::*;
        match self {
            Plain(s) => write!(f, "{}", s),
            String(s) => write!(f, "{}$", s),
            Integer(s) => write!(f, "{}%", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_two_character_significance() {
        let lines = Ident::new("LINES", VarType::Float);
        let lives = Ident::new("lives", VarType::Float);
        assert_eq!(lines, lives);
        let mut map = HashMap::new();
        map.insert(lines, 1);
        assert_eq!(map.get(&lives), Some(&1));
    }

    #[test]
    fn test_type_is_significant() {
        assert_ne!(
            Ident::new("A", VarType::Float),
            Ident::new("A", VarType::String)
        );
        assert_ne!(
            Ident::new("AB", VarType::Int),
            Ident::new("AB", VarType::Float)
        );
        assert_ne!(
            Ident::new("A", VarType::Float),
            Ident::new("AB", VarType::Float)
        );
    }

    #[test]
    fn test_display_suffix() {
        assert_eq!(Ident::new("name", VarType::String).to_string(), "NAME$");
        assert_eq!(Ident::new("I", VarType::Int).to_string(), "I%");
    }
}
