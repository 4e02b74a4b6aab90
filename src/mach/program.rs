use crate::lang::ast::Statement;
use crate::lang::{Error, Line, LineNumber};
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// One jump table entry. `data` indexes into the program's DATA queue.
#[derive(Debug)]
pub struct Entry {
    label: LineNumber,
    statements: Vec<Statement>,
    data: Range<usize>,
}

impl Entry {
    pub fn label(&self) -> LineNumber {
        self.label
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// ## Jump table and DATA queue
///
/// Lines are stably sorted by label. Duplicate labels are kept and
/// lookups resolve to the first one.

#[derive(Debug, Default)]
pub struct Program {
    entries: Vec<Entry>,
    labels: HashMap<LineNumber, usize>,
    data: Vec<String>,
}

impl Program {
    /// Parses a whole source file. The first error aborts the load.
    pub fn load(source: &str) -> Result<Program> {
        let mut lines = vec![];
        for (index, text) in source.lines().enumerate() {
            if let Some(line) = Line::from_str(text, index + 1)? {
                lines.push(line);
            }
        }
        Ok(Program::new(lines))
    }

    pub fn new(mut lines: Vec<Line>) -> Program {
        lines.sort_by_key(|line| line.number());
        let mut program = Program::default();
        for line in lines {
            let label = line.number();
            let start = program.data.len();
            for statement in line.statements() {
                if let Statement::Data(_, payload) = statement {
                    program.data.append(&mut parse_data(payload));
                }
            }
            let index = program.entries.len();
            program.labels.entry(label).or_insert(index);
            program.entries.push(Entry {
                label,
                statements: line.into_statements(),
                data: start..program.data.len(),
            });
        }
        debug!(
            lines = program.entries.len(),
            data = program.data.len(),
            "program prepared"
        );
        program
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn index_of(&self, label: LineNumber) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Only the DATA found on the line with this label.
    pub fn data_for(&self, label: LineNumber) -> Option<&[String]> {
        let entry = self.entries.get(self.index_of(label)?)?;
        Some(&self.data[entry.data.clone()])
    }
}

/// Splits a DATA payload on commas. Quoted items keep their spaces
/// and use `""` for a quote; unquoted items are trimmed.
pub fn parse_data(payload: &str) -> Vec<String> {
    let mut items = vec![];
    if payload.trim().is_empty() {
        return items;
    }
    let mut chars = payload.chars().peekable();
    loop {
        while let Some(' ') | Some('\t') = chars.peek() {
            chars.next();
        }
        let mut item = String::new();
        if let Some('"') = chars.peek() {
            chars.next();
            while let Some(ch) = chars.next() {
                if ch == '"' {
                    if let Some('"') = chars.peek() {
                        chars.next();
                        item.push('"');
                        continue;
                    }
                    break;
                }
                item.push(ch);
            }
            let mut more = false;
            for ch in &mut chars {
                if ch == ',' {
                    more = true;
                    break;
                }
            }
            items.push(item);
            if !more {
                return items;
            }
            continue;
        }
        let mut ended = true;
        for ch in &mut chars {
            if ch == ',' {
                ended = false;
                break;
            }
            item.push(ch);
        }
        items.push(item.trim().to_string());
        if ended {
            return items;
        }
    }
}
