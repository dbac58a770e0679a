use std::{
    cell::RefCell,
    io::{self, Read, Write},
    rc::Rc,
};

/// Source of the READ instruction's input tokens.
pub trait InputDevice {
    /// The next whitespace-delimited token, or `None` when input is
    /// exhausted or unreadable.
    fn read_token(&mut self) -> Option<String>;
}

/// Sink for the WRITE instruction.
pub trait OutputDevice {
    fn write_value(&mut self, value: i32);
}

/// Interactive input: prompts on stdout, then consumes one token.
pub struct StdinInput;

impl InputDevice for StdinInput {
    fn read_token(&mut self) -> Option<String> {
        print!("? ");
        io::stdout().flush().ok()?;

        let mut token = String::new();
        for byte in io::stdin().lock().bytes() {
            let c = byte.ok()? as char;
            if c.is_whitespace() {
                if token.is_empty() {
                    continue;
                }
                break;
            }
            token.push(c);
        }

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// Canned input for tests.
pub struct SliceInput {
    tokens: Vec<String>,
    pointer: usize,
}

impl SliceInput {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| (*t).to_owned()).collect(),
            pointer: 0,
        }
    }
}

impl InputDevice for SliceInput {
    fn read_token(&mut self) -> Option<String> {
        let token = self.tokens.get(self.pointer)?.clone();
        self.pointer += 1;
        Some(token)
    }
}

/// One line per written value.
pub struct StdoutOutput;

impl OutputDevice for StdoutOutput {
    fn write_value(&mut self, value: i32) {
        println!("{}", value);
    }
}

/// Collects written values so tests can assert on them.
pub struct BufferOutput {
    buffer: Rc<RefCell<Vec<i32>>>,
}

impl BufferOutput {
    pub fn new() -> (Rc<RefCell<Vec<i32>>>, Self) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let device = Self {
            buffer: Rc::clone(&buffer),
        };
        (buffer, device)
    }
}

impl OutputDevice for BufferOutput {
    fn write_value(&mut self, value: i32) {
        self.buffer.borrow_mut().push(value);
    }
}
