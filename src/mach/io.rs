use crate::error;
use crate::lang::Error;
use std::collections::VecDeque;
use std::io::BufRead;

type Result<T> = std::result::Result<T, Error>;

/// Line oriented input source.
pub trait Input {
    /// `None` at end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;
    fn is_at_end(&mut self) -> bool;
}

/// Output sink. Every call should be visible immediately.
pub trait Output {
    fn write(&mut self, s: &str) -> std::io::Result<()>;
}

impl<W: std::io::Write> Output for W {
    fn write(&mut self, s: &str) -> std::io::Result<()> {
        std::io::Write::write_all(self, s.as_bytes())?;
        std::io::Write::flush(self)
    }
}

/// Reads lines from any `BufRead` with the line ending removed.
pub struct LineInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> LineInput<R> {
        LineInput { reader }
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut s = String::new();
        if self.reader.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        if s.ends_with('\n') {
            s.pop();
            if s.ends_with('\r') {
                s.pop();
            }
        }
        Ok(Some(s))
    }

    fn is_at_end(&mut self) -> bool {
        match self.reader.fill_buf() {
            Ok(buf) => buf.is_empty(),
            Err(_) => true,
        }
    }
}

impl Input for VecDeque<String> {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.pop_front())
    }

    fn is_at_end(&mut self) -> bool {
        self.is_empty()
    }
}

/// ## Console state and the DATA queue
///
/// Tracks the output column for zones and `TAB`.

pub struct Io<'a> {
    input: &'a mut dyn Input,
    output: &'a mut dyn Output,
    column: usize,
    all_data: &'a [String],
    data: &'a [String],
    data_pos: usize,
}

impl<'a> Io<'a> {
    pub fn new(input: &'a mut dyn Input, output: &'a mut dyn Output) -> Io<'a> {
        Io {
            input,
            output,
            column: 0,
            all_data: &[],
            data: &[],
            data_pos: 0,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn print(&mut self, s: &str) -> Result<()> {
        self.output.write(s)?;
        for ch in s.chars() {
            if ch == '\n' {
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        Ok(())
    }

    pub fn read_line(&mut self) -> Result<String> {
        if self.input.is_at_end() {
            return Err(error!(EndOfInput));
        }
        match self.input.read_line()? {
            Some(s) => {
                self.column = 0;
                Ok(s)
            }
            None => Err(error!(EndOfInput)),
        }
    }

    pub fn set_data_strings(&mut self, data: &'a [String]) {
        self.all_data = data;
        self.data = data;
        self.data_pos = 0;
    }

    pub fn read_data(&mut self) -> Result<&'a str> {
        match self.data.get(self.data_pos) {
            Some(s) => {
                self.data_pos += 1;
                Ok(s)
            }
            None => Err(error!(OutOfData)),
        }
    }

    /// Rewinds to the whole queue, or to only the given slice.
    pub fn restore_data(&mut self, data: Option<&'a [String]>) {
        self.data = data.unwrap_or(self.all_data);
        self.data_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn data() -> Vec<String> {
        vec!["1".to_string(), "2".to_string(), "3".to_string()]
    }

    #[test]
    fn test_column_tracking() {
        let mut input: VecDeque<String> = VecDeque::new();
        let mut output: Vec<u8> = vec![];
        let mut io = Io::new(&mut input, &mut output);
        io.print("ABC").unwrap();
        assert_eq!(io.column(), 3);
        io.print("D\nEF").unwrap();
        assert_eq!(io.column(), 2);
        drop(io);
        assert_eq!(String::from_utf8(output).unwrap(), "ABCD\nEF");
    }

    #[test]
    fn test_read_line() {
        let mut input: VecDeque<String> = vec!["A".to_string()].into();
        let mut output: Vec<u8> = vec![];
        let mut io = Io::new(&mut input, &mut output);
        io.print("? ").unwrap();
        assert_eq!(io.read_line().unwrap(), "A");
        assert_eq!(io.column(), 0);
        assert_eq!(io.read_line().unwrap_err().code(), ErrorCode::EndOfInput);
    }

    #[test]
    fn test_line_input() {
        let mut input = LineInput::new("one\r\ntwo\nthree".as_bytes());
        assert!(!input.is_at_end());
        assert_eq!(input.read_line().unwrap(), Some("one".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("two".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("three".to_string()));
        assert!(input.is_at_end());
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_data_queue() {
        let data = data();
        let mut input: VecDeque<String> = VecDeque::new();
        let mut output: Vec<u8> = vec![];
        let mut io = Io::new(&mut input, &mut output);
        io.set_data_strings(&data);
        assert_eq!(io.read_data().unwrap(), "1");
        assert_eq!(io.read_data().unwrap(), "2");
        io.restore_data(Some(&data[2..]));
        assert_eq!(io.read_data().unwrap(), "3");
        assert_eq!(io.read_data().unwrap_err().code(), ErrorCode::OutOfData);
        io.restore_data(None);
        assert_eq!(io.read_data().unwrap(), "1");
    }
}
