use super::{token::*, Column, Error, VarType};

type Result<T> = std::result::Result<T, Error>;

/// Tokenize one label-stripped source line. `source_line` is the
/// 1-based position of the line in the source file, used for errors.
pub fn lex(s: &str, source_line: usize) -> Result<Vec<(Token, Column)>> {
    BasicLexer::lex(s).map_err(|e| e.in_source_line(source_line))
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct BasicLexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<(Token, Column)>,
}

impl BasicLexer {
    fn lex(s: &str) -> Result<Vec<(Token, Column)>> {
        let mut lexer = BasicLexer {
            chars: s.trim_end_matches(&['\r', '\n'][..]).chars().collect(),
            pos: 0,
            tokens: vec![],
        };
        if !lexer.remark_line() {
            while let Some(ch) = lexer.peek() {
                lexer.token(ch)?;
            }
        }
        let end = lexer.chars.len();
        lexer.tokens.push((Token::Eol, end..end));
        Ok(lexer.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn push(&mut self, token: Token, start: usize) {
        self.tokens.push((token, start..self.pos));
    }

    fn rest(&mut self) -> String {
        let s = self.chars[self.pos..].iter().collect();
        self.pos = self.chars.len();
        s
    }

    fn previous_is_value(&self) -> bool {
        match self.tokens.last() {
            Some((token, _)) => token.is_value(),
            None => false,
        }
    }

    /// A line that is entirely a comment is consumed before scanning.
    fn remark_line(&mut self) -> bool {
        let start = self
            .chars
            .iter()
            .position(|c| !is_basic_whitespace(*c))
            .unwrap_or_else(|| self.chars.len());
        let head: String = self.chars[start..].iter().take(3).collect();
        let skip = if head.eq_ignore_ascii_case("REM") {
            3
        } else if head.starts_with('\'') {
            1
        } else {
            return false;
        };
        self.pos = start + skip;
        let content = self.rest();
        self.push(Token::Remark(content), start);
        true
    }

    fn token(&mut self, ch: char) -> Result<()> {
        let start = self.pos;
        if is_basic_whitespace(ch) {
            self.whitespace();
            return Ok(());
        }
        if ch == '"' {
            self.string();
            return Ok(());
        }
        if is_basic_digit(ch) || (ch == '.' && self.digit_at(1)) {
            return self.number();
        }
        if (ch == '+' || ch == '-')
            && !self.previous_is_value()
            && (self.digit_at(1) || (self.peek_at(1) == Some('.') && self.digit_at(2)))
        {
            return self.number();
        }
        if is_basic_alphabetic(ch) {
            self.alphabetic();
            return Ok(());
        }
        if ch == '\'' {
            self.pos += 1;
            let content = self.rest();
            self.push(Token::Remark(content), start);
            return Ok(());
        }
        if let Some(op) = self.operator() {
            self.push(Token::Operator(op), start);
            return Ok(());
        }
        self.minutia(ch)
    }

    fn digit_at(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some(c) => is_basic_digit(c),
            None => false,
        }
    }

    fn whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_basic_whitespace(ch) {
                break;
            }
            self.pos += 1;
        }
    }

    fn exponent_follows(&self) -> bool {
        match self.peek_at(1) {
            Some('+') | Some('-') => self.digit_at(2),
            Some(c) => is_basic_digit(c),
            None => false,
        }
    }

    fn number(&mut self) -> Result<()> {
        let start = self.pos;
        let mut s = String::new();
        if let Some(sign) = self.peek() {
            if sign == '+' || sign == '-' {
                s.push(sign);
                self.pos += 1;
            }
        }
        let mut exp = false;
        while let Some(ch) = self.peek() {
            if is_basic_digit(ch) || ch == '.' {
                s.push(ch);
                self.pos += 1;
                continue;
            }
            if !exp && matches!(ch, 'E' | 'e' | 'D' | 'd') && self.exponent_follows() {
                exp = true;
                s.push('E');
                self.pos += 1;
                if let Some(sign) = self.peek() {
                    if sign == '+' || sign == '-' {
                        s.push(sign);
                        self.pos += 1;
                    }
                }
                continue;
            }
            break;
        }
        match s.parse::<f32>() {
            Ok(n) => {
                self.push(Token::Literal(Literal::Number(n)), start);
                Ok(())
            }
            Err(_) => Err(error!(SyntaxError, ..&(start..self.pos); "INVALID NUMBER")),
        }
    }

    fn string(&mut self) {
        let start = self.pos;
        let mut s = String::new();
        self.pos += 1;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch != '"' {
                s.push(ch);
                continue;
            }
            if self.peek() == Some('"') {
                s.push('"');
                self.pos += 1;
                continue;
            }
            break;
        }
        self.push(Token::Literal(Literal::String(s)), start);
    }

    fn alphabetic(&mut self) {
        let start = self.pos;
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            s.push(ch.to_ascii_uppercase());
            self.pos += 1;
            if let Some(token) = Token::from_string(&s) {
                return self.word(token, start);
            }
            match self.peek() {
                Some(pk) if pk.is_ascii_alphanumeric() => continue,
                Some(pk) if pk == '$' || pk == '%' => {
                    s.push(pk);
                    self.pos += 1;
                    if let Some(token) = Token::from_string(&s) {
                        return self.word(token, start);
                    }
                    s.pop();
                    let var_type = if pk == '$' {
                        VarType::String
                    } else {
                        VarType::Int
                    };
                    return self.push(Token::Ident(Ident::new(&s, var_type)), start);
                }
                _ => break,
            }
        }
        self.push(Token::Ident(Ident::new(&s, VarType::Float)), start);
    }

    fn word(&mut self, token: Token, start: usize) {
        match token {
            Token::Word(Word::Rem) => {
                let content = self.rest();
                self.push(Token::Remark(content), start);
            }
            Token::Word(Word::Data) => {
                let content = self.rest();
                self.push(Token::Data(content), start);
            }
            _ => self.push(token, start),
        }
    }

    fn operator(&mut self) -> Option<Operator> {
        for op in Operator::SYMBOLS.iter() {
            let text: Vec<char> = op.to_string().chars().collect();
            if self.chars[self.pos..].starts_with(&text) {
                self.pos += text.len();
                return Some(op.clone());
            }
        }
        None
    }

    fn minutia(&mut self, ch: char) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            '?' => Token::Word(Word::Print),
            _ if ch.is_ascii_graphic() => Token::Unknown(ch.to_string()),
            _ => return Err(error!(SyntaxError, ..&(start..self.pos); "ILLEGAL CHARACTER")),
        };
        self.push(token, start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token> {
        lex(s, 1).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_unary_sign_after_operator() {
        assert_eq!(
            tokens("A=-5"),
            vec![
                Token::Ident(Ident::new("A", VarType::Float)),
                Token::Operator(Operator::Equal),
                Token::Literal(Literal::Number(-5.0)),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_binary_minus_after_value() {
        assert_eq!(
            tokens("A-5"),
            vec![
                Token::Ident(Ident::new("A", VarType::Float)),
                Token::Operator(Operator::Minus),
                Token::Literal(Literal::Number(5.0)),
                Token::Eol,
            ]
        );
        assert_eq!(
            tokens(")+1")[1..],
            [
                Token::Operator(Operator::Plus),
                Token::Literal(Literal::Number(1.0)),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_keywords_without_spaces() {
        let i = || Token::Ident(Ident::new("I", VarType::Float));
        let x = || Token::Ident(Ident::new("X", VarType::Float));
        let n = |n: f32| Token::Literal(Literal::Number(n));
        assert_eq!(
            tokens("FORI=1TO3"),
            vec![
                Token::Word(Word::For),
                i(),
                Token::Operator(Operator::Equal),
                n(1.0),
                Token::Word(Word::To),
                n(3.0),
                Token::Eol,
            ]
        );
        assert_eq!(tokens("PRINTX"), vec![Token::Word(Word::Print), x(), Token::Eol]);
        assert_eq!(tokens("NEXTI"), vec![Token::Word(Word::Next), i(), Token::Eol]);
        assert_eq!(
            tokens("IFX=0THEN20"),
            vec![
                Token::Word(Word::If),
                x(),
                Token::Operator(Operator::Equal),
                n(0.0),
                Token::Word(Word::Then),
                n(20.0),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_keyword_cuts_identifier_short() {
        assert_eq!(
            tokens("TOTAL"),
            vec![
                Token::Word(Word::To),
                Token::Ident(Ident::new("TAL", VarType::Float)),
                Token::Eol,
            ]
        );
        assert_eq!(
            tokens("SINX"),
            vec![
                Token::Builtin(Builtin::Sin),
                Token::Ident(Ident::new("X", VarType::Float)),
                Token::Eol,
            ]
        );
        assert_eq!(
            tokens("ABC$"),
            vec![Token::Ident(Ident::new("ABC", VarType::String)), Token::Eol]
        );
    }

    #[test]
    fn test_columns() {
        let v = lex("PRINT AB", 1).unwrap();
        assert_eq!(v[0].1, 0..5);
        assert_eq!(v[1].1, 6..8);
        assert_eq!(v[2], (Token::Eol, 8..8));
    }

    #[test]
    fn test_illegal_character() {
        let e = lex("PRINT \u{1}", 4).unwrap_err();
        assert_eq!(e.to_string(), "SYNTAX ERROR (6..7); ILLEGAL CHARACTER AT SOURCE LINE 4");
    }
}
