/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language.

*/

pub type Column = std::ops::Range<usize>;
pub type LineNumber = u32;

#[macro_use]
mod error;
mod ident;
mod lex;
mod line;
mod parse;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::Ident;
pub use ident::VarType;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;

pub mod ast;

#[cfg(test)]
mod tests;
