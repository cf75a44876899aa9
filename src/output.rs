//! Output sink
//!
//! Append-only stream of lines consumed by whatever renders the terminal.
//! The shell only ever writes to it.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// One unit of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// Prompt plus the submitted input.
    Echo(String),
    Text(String),
    Error(String),
    /// Markup for a rendering layer that understands it.
    Markup(String),
    /// Request to wipe the screen.
    Clear,
}

impl OutputLine {
    /// Plain text view, `None` for `Clear`.
    pub fn text(&self) -> Option<&str> {
        match self {
            OutputLine::Echo(s) | OutputLine::Text(s) | OutputLine::Error(s) | OutputLine::Markup(s) => Some(s),
            OutputLine::Clear => None,
        }
    }
}

/// Destination for output lines.
pub trait OutputSink: Send {
    fn emit(&mut self, line: OutputLine);
}

/// Sink that keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<OutputLine>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn lines(&self) -> Vec<OutputLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Remove and return everything written so far.
    pub fn take(&self) -> Vec<OutputLine> {
        self.lines.lock().map(|mut l| std::mem::take(&mut *l)).unwrap_or_default()
    }

    /// Text of every line except echoes and clears.
    pub fn texts(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| !matches!(l, OutputLine::Echo(_)))
            .filter_map(|l| l.text().map(str::to_string))
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, line: OutputLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

/// Sink writing to stdout/stderr.
pub struct ConsoleSink {
    /// Skip echo lines when the terminal already shows what the user typed.
    show_echo: bool,
}

impl ConsoleSink {
    pub fn new(show_echo: bool) -> Self {
        Self { show_echo }
    }
}

impl OutputSink for ConsoleSink {
    fn emit(&mut self, line: OutputLine) {
        let mut stdout = std::io::stdout();
        match line {
            OutputLine::Echo(s) => {
                if self.show_echo {
                    let _ = writeln!(stdout, "{}", s);
                }
            }
            OutputLine::Text(s) | OutputLine::Markup(s) => {
                let _ = writeln!(stdout, "{}", s);
            }
            OutputLine::Error(s) => eprintln!("{}", s),
            // ANSI escape sequence to clear screen and move cursor to top-left
            OutputLine::Clear => {
                let _ = write!(stdout, "\x1B[2J\x1B[H");
            }
        }
        let _ = stdout.flush();
    }
}

/// Handle the shell writes through.
pub struct Output {
    sink: Box<dyn OutputSink>,
}

impl Output {
    pub fn new(sink: Box<dyn OutputSink>) -> Self {
        Self { sink }
    }

    pub fn emit(&mut self, line: OutputLine) {
        self.sink.emit(line);
    }

    pub fn echo(&mut self, s: impl Into<String>) {
        self.emit(OutputLine::Echo(s.into()));
    }

    /// Write text; embedded newlines become separate lines.
    pub fn text(&mut self, s: impl AsRef<str>) {
        for line in split_lines(s.as_ref()) {
            self.emit(OutputLine::Text(line.to_string()));
        }
    }

    pub fn error(&mut self, s: impl AsRef<str>) {
        for line in split_lines(s.as_ref()) {
            self.emit(OutputLine::Error(line.to_string()));
        }
    }

    pub fn markup(&mut self, s: impl Into<String>) {
        self.emit(OutputLine::Markup(s.into()));
    }

    pub fn clear(&mut self) {
        self.emit(OutputLine::Clear);
    }
}

/// Lines of `s`, ignoring one trailing newline.
fn split_lines(s: &str) -> impl Iterator<Item = &str> {
    s.strip_suffix('\n').unwrap_or(s).split('\n')
}

// ============================================================================
// Tests
// ============================================================================
