//! Host console for the machine's serial terminal.
//!
//! A reader thread forwards stdin bytes over a channel; the CPU side polls
//! it without blocking, so an idle keyboard reads as "nothing pending".

use std::io::{self, Read, Stdout, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use altair_core::device::Terminal;
use tracing::debug;

/// Terminal fed from a byte channel and printing to a writer.
pub struct StreamTerminal<W: Write> {
    input: Receiver<u8>,
    pending: Option<u8>,
    output: W,
}

pub type StdioTerminal = StreamTerminal<Stdout>;

impl StdioTerminal {
    /// Start the stdin reader thread and wire stdout as the output.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin".to_string())
            .spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    if tx.send(host_to_terminal(byte)).is_err() {
                        break;
                    }
                }
                debug!("console input closed");
            })?;
        Ok(StreamTerminal::new(rx, io::stdout()))
    }
}

impl<W: Write> StreamTerminal<W> {
    pub fn new(input: Receiver<u8>, output: W) -> Self {
        Self {
            input,
            pending: None,
            output,
        }
    }

    fn poll(&mut self) {
        if self.pending.is_none() {
            self.pending = self.input.try_recv().ok();
        }
    }
}

/// Period software expects CR for Enter.
fn host_to_terminal(byte: u8) -> u8 {
    if byte == b'\n' { b'\r' } else { byte }
}

impl<W: Write> Terminal for StreamTerminal<W> {
    fn byte_in(&mut self) -> u8 {
        self.poll();
        self.pending.take().unwrap_or(0)
    }

    /// Bit 7 is stripped: software of the era uses it as mark parity.
    fn byte_out(&mut self, value: u8) {
        let result = self
            .output
            .write_all(&[value & 0x7F])
            .and_then(|()| self.output.flush());
        if let Err(e) = result {
            debug!("console write failed: {e}");
        }
    }

    fn input_ready(&mut self) -> bool {
        self.poll();
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_polled_without_blocking() {
        let (tx, rx) = mpsc::channel();
        let mut term = StreamTerminal::new(rx, Vec::new());
        assert!(!term.input_ready());
        assert_eq!(term.byte_in(), 0);

        tx.send(b'A').unwrap();
        tx.send(b'B').unwrap();
        assert!(term.input_ready());
        assert!(term.input_ready(), "status poll must not consume");
        assert_eq!(term.byte_in(), b'A');
        assert_eq!(term.byte_in(), b'B');
        assert_eq!(term.byte_in(), 0);

        drop(tx);
        assert!(!term.input_ready());
    }

    #[test]
    fn output_strips_bit_7() {
        let (_tx, rx) = mpsc::channel();
        let mut term = StreamTerminal::new(rx, Vec::new());
        term.byte_out(b'O' | 0x80);
        term.byte_out(b'K');
        assert_eq!(term.output, b"OK".to_vec());
    }

    #[test]
    fn newline_becomes_carriage_return() {
        assert_eq!(host_to_terminal(b'\n'), b'\r');
        assert_eq!(host_to_terminal(b'x'), b'x');
    }
}
