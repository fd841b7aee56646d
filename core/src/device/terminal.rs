use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::device::port::Terminal;

#[derive(Default)]
struct Buffers {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

/// In-memory terminal. Clones share the same buffers, so the host keeps one
/// handle to feed keystrokes and collect output while the machine owns the
/// other.
#[derive(Clone, Default)]
pub struct BufferedTerminal {
    inner: Rc<RefCell<Buffers>>,
}

impl BufferedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the CPU to read.
    pub fn push_input(&self, bytes: &[u8]) {
        self.inner.borrow_mut().input.extend(bytes.iter().copied());
    }

    pub fn pending_input(&self) -> usize {
        self.inner.borrow().input.len()
    }

    /// Drain everything the CPU has written so far.
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.inner.borrow_mut().output)
    }

    /// Output so far as text, bit 7 stripped. Does not drain.
    pub fn output_string(&self) -> String {
        self.inner
            .borrow()
            .output
            .iter()
            .map(|&b| (b & 0x7F) as char)
            .collect()
    }
}

impl Terminal for BufferedTerminal {
    fn byte_in(&mut self) -> u8 {
        self.inner.borrow_mut().input.pop_front().unwrap_or(0)
    }

    fn byte_out(&mut self, value: u8) {
        self.inner.borrow_mut().output.push(value);
    }

    fn input_ready(&mut self) -> bool {
        !self.inner.borrow().input.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_buffers() {
        let host = BufferedTerminal::new();
        let mut cpu_side = host.clone();

        host.push_input(b"A");
        assert!(cpu_side.input_ready());
        assert_eq!(cpu_side.byte_in(), b'A');
        assert!(!cpu_side.input_ready());
        assert_eq!(cpu_side.byte_in(), 0);

        cpu_side.byte_out(b'O' | 0x80);
        cpu_side.byte_out(b'K');
        assert_eq!(host.output_string(), "OK");
        assert_eq!(host.take_output(), vec![b'O' | 0x80, b'K']);
        assert!(host.take_output().is_empty());
    }
}
