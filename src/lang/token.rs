pub use super::ident::Ident;
use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<std::string::String, Token> = Word::ALL
        .iter()
        .map(|w| Token::Word(w.clone()))
        .chain(Operator::WORDS.iter().map(|o| Token::Operator(o.clone())))
        .chain(Builtin::ALL.iter().map(|b| Token::Builtin(b.clone())))
        .map(|t| (t.to_string(), t))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Builtin(Builtin),
    Ident(Ident),
    Remark(String),
    Data(String),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Eol,
}

impl Token {
    /// Keywords, word operators, and builtin function names.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }

    /// Tokens after which a `+` or `-` is a binary operator.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::Literal(Literal::Number(_)) | Token::Ident(_) | Token::RParen
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Builtin(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Remark(s) => write!(f, "REM{}", s),
            Data(s) => write!(f, "DATA{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Eol => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(f32),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(n) => write!(f, "{}", n),
            String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    Data,
    Def,
    Dim,
    End,
    Fn,
    For,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    Next,
    On,
    Print,
    Randomize,
    Read,
    Rem,
    Restore,
    Return,
    Step,
    Stop,
    Then,
    To,
}

impl Word {
    pub const ALL: [Word; 23] = [
        Word::Data,
        Word::Def,
        Word::Dim,
        Word::End,
        Word::Fn,
        Word::For,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Let,
        Word::Next,
        Word::On,
        Word::Print,
        Word::Randomize,
        Word::Read,
        Word::Rem,
        Word::Restore,
        Word::Return,
        Word::Step,
        Word::Stop,
        Word::Then,
        Word::To,
    ];
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Data => write!(f, "DATA"),
            Def => write!(f, "DEF"),
            Dim => write!(f, "DIM"),
            End => write!(f, "END"),
            Fn => write!(f, "FN"),
            For => write!(f, "FOR"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            Next => write!(f, "NEXT"),
            On => write!(f, "ON"),
            Print => write!(f, "PRINT"),
            Randomize => write!(f, "RANDOMIZE"),
            Read => write!(f, "READ"),
            Rem => write!(f, "REM"),
            Restore => write!(f, "RESTORE"),
            Return => write!(f, "RETURN"),
            Step => write!(f, "STEP"),
            Stop => write!(f, "STOP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    /// Operators spelled as reserved words.
    pub const WORDS: [Operator; 3] = [Operator::Not, Operator::And, Operator::Or];

    /// Symbolic operators, longest first.
    pub const SYMBOLS: [Operator; 11] = [
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::NotEqual,
        Operator::Less,
        Operator::Greater,
        Operator::Equal,
        Operator::Plus,
        Operator::Minus,
        Operator::Multiply,
        Operator::Divide,
        Operator::Caret,
    ];
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Builtin {
    Abs,
    Asc,
    Atn,
    Chr,
    Cos,
    Exp,
    Int,
    Left,
    Len,
    Log,
    Mid,
    Right,
    Rnd,
    Sgn,
    Sin,
    Spc,
    Sqr,
    Str,
    Tab,
    Tan,
    Val,
}

impl Builtin {
    pub const ALL: [Builtin; 21] = [
        Builtin::Abs,
        Builtin::Asc,
        Builtin::Atn,
        Builtin::Chr,
        Builtin::Cos,
        Builtin::Exp,
        Builtin::Int,
        Builtin::Left,
        Builtin::Len,
        Builtin::Log,
        Builtin::Mid,
        Builtin::Right,
        Builtin::Rnd,
        Builtin::Sgn,
        Builtin::Sin,
        Builtin::Spc,
        Builtin::Sqr,
        Builtin::Str,
        Builtin::Tab,
        Builtin::Tan,
        Builtin::Val,
    ];
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Builtin::*;
        match self {
            Abs => write!(f, "ABS"),
            Asc => write!(f, "ASC"),
            Atn => write!(f, "ATN"),
            Chr => write!(f, "CHR$"),
            Cos => write!(f, "COS"),
            Exp => write!(f, "EXP"),
            Int => write!(f, "INT"),
            Left => write!(f, "LEFT$"),
            Len => write!(f, "LEN"),
            Log => write!(f, "LOG"),
            Mid => write!(f, "MID$"),
            Right => write!(f, "RIGHT$"),
            Rnd => write!(f, "RND"),
            Sgn => write!(f, "SGN"),
            Sin => write!(f, "SIN"),
            Spc => write!(f, "SPC"),
            Sqr => write!(f, "SQR"),
            Str => write!(f, "STR$"),
            Tab => write!(f, "TAB"),
            Tan => write!(f, "TAN"),
            Val => write!(f, "VAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let t = Token::from_string("REM");
        assert_eq!(t, Some(Token::Word(Word::Rem)));
        let t = Token::from_string("LEFT$");
        assert_eq!(t, Some(Token::Builtin(Builtin::Left)));
        let t = Token::from_string("AND");
        assert_eq!(t, Some(Token::Operator(Operator::And)));
        let t = Token::from_string("PICKLES");
        assert_eq!(t, None);
    }
}
