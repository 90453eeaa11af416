//! Indentation-tracking writer for brace-delimited source text.
//!
//! Indent guards share the level through `Rc<Cell<usize>>`, so a guard can
//! be held while the writer is borrowed mutably for output.

use std::{cell::Cell, fmt, rc::Rc};

///
/// CodeWriter
///

pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W, indent_string: String) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string,
            at_line_start: true,
        }
    }

    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    /// Write text without a newline, indenting first when at line start.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }

        if self.at_line_start && !text.trim().is_empty() {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.at_line_start = false;
        }

        self.writer.write_str(text)
    }

    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start = true;

        Ok(())
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;

        Ok(())
    }

    /// Indentation increases while the returned guard is alive.
    #[must_use]
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);

        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// `// text`
    pub fn comment(&mut self, text: &str) -> fmt::Result {
        self.write("// ")?;
        self.writeln(text)
    }

    /// `header {`, the indented body, then `}` followed by `trailer`.
    pub fn block_with<F>(&mut self, header: &str, trailer: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.write(header)?;
        self.writeln(" {")?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.write("}")?;
        self.writeln(trailer)
    }

    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with(header, "", body)
    }

    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indent_level.get()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Target of `write!`; prefer [`cw_writeln!`] for whole lines.
    #[doc(hidden)]
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        match args.as_str() {
            Some(text) => self.write(text),
            None => self.write(&args.to_string()),
        }
    }

    #[doc(hidden)]
    pub fn writeln_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.write_fmt(args)?;
        self.writeln("")
    }
}

///
/// IndentGuard
///

pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        self.indent_level
            .set(self.indent_level.get().saturating_sub(1));
    }
}

/// Formatted line on a [`CodeWriter`], like `std::writeln!`.
macro_rules! cw_writeln {
    ($writer:expr, $($arg:tt)*) => {
        $writer.writeln_fmt(format_args!($($arg)*))
    };
}

pub(crate) use cw_writeln;
