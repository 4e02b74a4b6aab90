use super::ast::Statement;
use super::{lex, parse, Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// One labeled physical source line, parsed.
#[derive(Debug, PartialEq)]
pub struct Line {
    number: LineNumber,
    source_line: usize,
    statements: Vec<Statement>,
}

impl Line {
    /// Parses one physical line. Blank lines yield `None`.
    pub fn from_str(s: &str, source_line: usize) -> Result<Option<Line>> {
        let s = s.trim_end_matches(&['\r', '\n'][..]);
        let trimmed = s.trim_start_matches(&[' ', '\t'][..]);
        if trimmed.trim_end().is_empty() {
            return Ok(None);
        }
        let digits = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or_else(|| trimmed.len());
        if digits == 0 {
            return Err(error!(SyntaxError; "EXPECTED LINE NUMBER").in_source_line(source_line));
        }
        let number = match trimmed[..digits].parse::<LineNumber>() {
            Ok(n) => n,
            Err(_) => {
                return Err(error!(SyntaxError; "INVALID LINE NUMBER").in_source_line(source_line))
            }
        };
        let tokens = lex(&trimmed[digits..], source_line).map_err(|e| e.in_line_number(number))?;
        let statements = parse(number, &tokens).map_err(|e| e.in_source_line(source_line))?;
        Ok(Some(Line {
            number,
            source_line,
            statements,
        }))
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn source_line(&self) -> usize {
        self.source_line
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}
