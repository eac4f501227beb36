//! Star Document Markup builder
//!
//! Provides a fluent API for building Star Document Markup text.
//!
//! Markup documents are line oriented: a directive such as `[align: center]`
//! occupies its own line and changes state for the text lines that follow,
//! while a few directives (`[space: count N]`, `[column: ...]`) can sit
//! inline with text. `[plain]` resets every style back to the default.

use std::fmt;

/// Printer font selection for `[font: ...]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Standard font (12x24 dot)
    A,
    /// Condensed font (9x24 dot)
    B,
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Font::A => write!(f, "a"),
            Font::B => write!(f, "b"),
        }
    }
}

/// Left indent for `[column: ...]` directives
///
/// `Zero` serializes as `indent 0`, `Percent(n)` as `indent n%` - both forms
/// are understood by the printer but they are distinct markup tokens, so the
/// builder keeps them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Zero,
    Percent(u8),
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Zero => write!(f, "0"),
            Indent::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Star Document Markup builder
///
/// Accumulates a UTF-8 markup String ready for an encoder (or a printer that
/// consumes `text/vnd.star.markup` directly).
pub struct MarkupBuilder {
    buf: String,
    width: usize,
}

impl MarkupBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write an empty line
    pub fn blank_line(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Alignment ===

    /// Align following text to the left (default)
    pub fn align_left(&mut self) -> &mut Self {
        self.line("[align: left]")
    }

    /// Align following text to the center
    pub fn align_center(&mut self) -> &mut Self {
        self.line("[align: center]")
    }

    /// Align following text to the right
    pub fn align_right(&mut self) -> &mut Self {
        self.line("[align: right]")
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold_on(&mut self) -> &mut Self {
        self.line("[bold: on]")
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.line("[bold: off]")
    }

    /// Set character magnification (1 = normal)
    pub fn magnify(&mut self, width: u8, height: u8) -> &mut Self {
        let directive = format!("[magnify: width {}; height {}]", width, height);
        self.line(&directive)
    }

    /// Enable white-on-black (inverted) printing
    pub fn negative_on(&mut self) -> &mut Self {
        self.line("[negative: on]")
    }

    /// Enable underline
    pub fn underline_on(&mut self) -> &mut Self {
        self.line("[underline: on]")
    }

    /// Enable upperline (line above the characters)
    pub fn upperline_on(&mut self) -> &mut Self {
        self.line("[upperline: on]")
    }

    /// Select the printer font
    pub fn font(&mut self, font: Font) -> &mut Self {
        let directive = format!("[font: {}]", font);
        self.line(&directive)
    }

    /// Reset all styles to the default
    pub fn plain(&mut self) -> &mut Self {
        self.line("[plain]")
    }

    // === Layout ===

    /// Write text wrapped in `[space: count N]` padding on both sides
    ///
    /// Combined with `negative_on` this prints a highlighted badge, e.g.
    /// an order number on an inverted background with breathing room.
    pub fn padded_line(&mut self, s: &str, count: usize) -> &mut Self {
        let padded = format!("[space: count {0}]{1}[space: count {0}]", count, s);
        self.line(&padded)
    }

    /// Write a line of `count` blank columns
    ///
    /// With `underline_on` or `upperline_on` active this prints a horizontal
    /// rule across the paper.
    pub fn space_line(&mut self, count: usize) -> &mut Self {
        let directive = format!("[space: count {}]", count);
        self.line(&directive)
    }

    /// Write a full-width rule of `-` characters
    pub fn dash_rule(&mut self) -> &mut Self {
        let rule = "-".repeat(self.width);
        self.line(&rule)
    }

    /// Write a two-sided column line: left text, right text, given indent
    pub fn column(&mut self, left: &str, right: &str, indent: Indent) -> &mut Self {
        let directive = format!("[column: left {}; right {}; indent {}]", left, right, indent);
        self.line(&directive)
    }

    /// Write a left-only column line at the given indent
    pub fn column_left(&mut self, left: &str, indent: Indent) -> &mut Self {
        let directive = format!("[column: left {}; indent {}]", left, indent);
        self.line(&directive)
    }

    /// Write a bold left-only column line, restoring bold off afterwards
    pub fn bold_column(&mut self, left: &str, indent: Indent) -> &mut Self {
        let directive = format!("[bold: on][column: left {}; indent {}][bold: off]", left, indent);
        self.line(&directive)
    }

    /// Write a double-size condensed-font column line
    ///
    /// Emits font b + 2x2 magnification, the column, and a `[plain]` reset on
    /// a single line. Used for item headlines and grand totals.
    pub fn magnified_column(&mut self, left: &str, right: &str) -> &mut Self {
        let directive = format!(
            "[font: b][magnify: width 2; height 2][column: left {}; right {}; indent 0][plain]",
            left, right
        );
        self.line(&directive)
    }

    // === Paper Control ===

    /// Feed to the cutter position and perform a partial cut
    pub fn cut(&mut self) -> &mut Self {
        self.line("[cut: feed; partial]")
    }

    // === Build ===

    /// Finalize and return the accumulated markup
    pub fn finalize(self) -> String {
        self.buf
    }

    /// Get the current buffer as a string reference
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// True when nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for MarkupBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
