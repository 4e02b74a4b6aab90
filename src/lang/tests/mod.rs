use super::ast::*;
use super::*;

mod parse_test;

fn statements(s: &str) -> Vec<Statement> {
    match Line::from_str(s, 1) {
        Ok(Some(line)) => line.into_statements(),
        Ok(None) => panic!("blank line"),
        Err(e) => panic!("{}", e),
    }
}

fn float(name: &str) -> Ident {
    Ident::new(name, VarType::Float)
}
