//! Line-oriented console used by the menu engine and procedures.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

pub trait Console {
    /// Write one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Show `prompt` and read one line. `Ok(None)` means input is closed.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Cosmetic pause between steps.
    fn pause(&mut self, delay: Duration);
}

/// [`Console`] over any reader/writer pair: stdin/stdout in the binary,
/// in-memory buffers in tests.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            let _ = self.output.flush();
            thread::sleep(delay);
        }
    }
}
