//! Colored terminal output for the generation run.
//!
//! Thin wrapper over `termcolor` so the rest of the CLI never touches
//! color handling. Output failures are swallowed; a broken pipe should not
//! take down a batch that already wrote its files.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output.
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    fn prefixed(&self, glyph: &str, color: Color, bold: bool, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(&mut buffer, "{glyph}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        let _ = self.bufwtr.print(&buffer);
    }

    /// Prints an info message.
    pub fn info(&self, message: &str) {
        self.prefixed("ℹ", Color::Cyan, false, message);
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        self.prefixed("✓", Color::Green, true, message);
    }

    /// Prints a warning message.
    pub fn warn(&self, message: &str) {
        self.prefixed("⚠", Color::Yellow, true, message);
    }

    /// Prints an error message to stderr (always shown, even when quiet).
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(&mut buffer, "✗");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        let _ = bufwtr.print(&buffer);
    }

    /// Prints a per-entry detail line (only in verbose mode).
    pub fn verbose(&self, message: &str) {
        if !self.verbose {
            return;
        }
        self.prefixed("→", Color::Blue, false, message);
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {title} ═══");
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Prints indented text (for sub-items).
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {message}");
        let _ = self.bufwtr.print(&buffer);
    }

    /// Prints a plain message (respects quiet mode).
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.bufwtr.print(&buffer);
    }
}
