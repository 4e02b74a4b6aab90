use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    source_line: Option<usize>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            source_line: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn source_line(&self) -> Option<usize> {
        self.source_line
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// The first line number attached wins. Errors raised deep inside
    /// an expression get stamped by the execution loop on the way out.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn in_source_line(self, source_line: usize) -> Error {
        if self.source_line.is_some() {
            return self;
        }
        Error {
            source_line: Some(source_line),
            ..self
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        if self.column != (0..0) {
            return self;
        }
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        match error.kind() {
            std::io::ErrorKind::Interrupted => error!(RuntimeError; "BREAK"),
            _ => error!(RuntimeError; &error.to_string().to_ascii_uppercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RuntimeError = 1,
    SyntaxError = 2,
    OutOfData = 4,
    InvalidArgument = 5,
    BadGotoTarget = 8,
    OutOfArrayBounds = 9,
    RedimensionedArray = 10,
    DivisionByZero = 11,
    TypeMismatch = 13,
    UndefinedFunction = 18,
    BadGosubTarget = 24,
    BadRestoreTarget = 25,
    WrongNumberOfArguments = 31,
    NegativeArrayDim = 32,
    MismatchedArrayDimensions = 33,
    EndOfInput = 62,
}

impl ErrorCode {
    pub fn is_runtime(self) -> bool {
        self != ErrorCode::SyntaxError
    }

    fn text(self) -> &'static str {
        use ErrorCode::*;
        match self {
            RuntimeError => "RUNTIME ERROR",
            SyntaxError => "SYNTAX ERROR",
            OutOfData => "OUT OF DATA",
            InvalidArgument => "INVALID ARGUMENT",
            BadGotoTarget => "BAD GOTO TARGET",
            OutOfArrayBounds => "OUT OF ARRAY BOUNDS",
            RedimensionedArray => "REDIMENSIONED ARRAY",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            UndefinedFunction => "UNDEFINED USER FUNCTION",
            BadGosubTarget => "BAD GOSUB TARGET",
            BadRestoreTarget => "BAD RESTORE TARGET",
            WrongNumberOfArguments => "WRONG NUMBER OF ARGUMENTS",
            NegativeArrayDim => "NEGATIVE ARRAY DIMENSION",
            MismatchedArrayDimensions => "MISMATCHED ARRAY DIMENSIONS",
            EndOfInput => "END OF INPUT",
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if let Some(source_line) = self.source_line {
            suffix.push_str(&format!(" AT SOURCE LINE {}", source_line));
        }
        write!(f, "{}{}", self.code.text(), suffix)
    }
}
