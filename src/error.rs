use std::cmp::max;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "unicode")]
use unicode_width::UnicodeWidthStr;

use crate::types::span::Span;

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A block was opened but never closed.
    UnterminatedBlock,
    /// An alternation was found outside of any block.
    AlternationOutsideBlock,
    /// An alias guard was found somewhere other than the start of a block.
    MisplacedAliasGuard,
    /// Blocks were nested deeper than the supported limit.
    NestingTooDeep,
}

/// An error that can occur while compiling a formula.
///
/// Errors never affect the state of the engine that produced them.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    reason: String,
    source: String,
    span: Span,
}

impl Error {
    pub(crate) fn syntax(
        kind: ErrorKind,
        reason: impl Into<String>,
        source: &str,
        span: impl Into<Span>,
    ) -> Self {
        Self {
            kind,
            reason: reason.into(),
            source: source.to_owned(),
            span: span.into(),
        }
    }

    /// Returns the kind of error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns a human readable description of the error.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the byte range in the formula where the error occurred.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.into()
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pretty(&self.reason, &self.source, self.span, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            fmt_pretty(&self.reason, &self.source, self.span, f)
        } else {
            write!(
                f,
                "{} between bytes {} and {}",
                self.reason, self.span.m, self.span.n
            )
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (line, col) = to_line_col(source, span.m);
    let code = source.split('\n').nth(line).unwrap_or("");
    // Only underline up to the end of the first line of the span.
    let end = span.n.min(line_end(source, span.m));
    let width = max(1, width(&source[span.m..end]));

    let num = (line + 1).to_string();
    let pad = num.len();
    let pipe = "|";
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

/// Returns the zero-based line and display column of a byte offset.
fn to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, width(&source[start..offset]))
}

/// Returns the byte offset of the end of the line containing `offset`.
fn line_end(source: &str, offset: usize) -> usize {
    source[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(source.len())
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    s.width()
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::syntax(
            ErrorKind::UnterminatedBlock,
            "unterminated block",
            "lorem $[ipsum",
            6..8,
        );
        assert_eq!(err.to_string(), "unterminated block between bytes 6 and 8");
    }

    #[test]
    fn error_display_pretty() {
        let err = Error::syntax(
            ErrorKind::UnterminatedBlock,
            "unterminated block",
            "lorem $[ipsum",
            6..8,
        );
        assert_eq!(
            format!("{err:#}"),
            "
   |
 1 | lorem $[ipsum
   |       ^^ unterminated block
"
        );
    }

    #[test]
    fn error_display_pretty_second_line() {
        let err = Error::syntax(
            ErrorKind::AlternationOutsideBlock,
            "alternation outside of a block",
            "lorem\nipsum ## dolor",
            12..14,
        );
        assert_eq!(
            format!("{err:#}"),
            "
   |
 2 | ipsum ## dolor
   |       ^^ alternation outside of a block
"
        );
    }

    #[test]
    fn error_display_pretty_eof() {
        let err = Error::syntax(
            ErrorKind::UnterminatedBlock,
            "unterminated block",
            "lorem ",
            6..6,
        );
        assert_eq!(
            format!("{err:#}"),
            "\n   |\n 1 | lorem \n   |       ^ unterminated block\n"
        );
    }
}
