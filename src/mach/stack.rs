use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    limit: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str, limit: usize) -> Stack<T> {
        Stack {
            overflow_message,
            limit,
            vec: vec![],
        }
    }
    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.limit {
            Err(error!(RuntimeError; self.overflow_message))
        } else {
            Ok(())
        }
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.vec.last_mut()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        self.overflow_check()
    }
    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_limit() {
        let mut stack: Stack<usize> = Stack::new("STACK OVERFLOW", 2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        let e = stack.push(3).unwrap_err();
        assert_eq!(e.code(), ErrorCode::RuntimeError);
        assert_eq!(e.text(), "STACK OVERFLOW");
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_pop() {
        let mut stack: Stack<&str> = Stack::new("STACK OVERFLOW", 10);
        assert!(stack.is_empty());
        stack.push("A").unwrap();
        stack.push("B").unwrap();
        if let Some(top) = stack.last_mut() {
            *top = "C";
        }
        assert_eq!(stack.iter().count(), 2);
        assert_eq!(stack.pop(), Some("C"));
        assert_eq!(stack.last(), Some(&"A"));
        assert_eq!(stack.pop(), Some("A"));
        assert_eq!(stack.pop(), None);
    }
}
