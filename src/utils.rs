use crate::error::TextPosition;
use std::io::{self, BufRead, Read};

/// Checks the XML Names `NCName` production: a `Name` without any colon.
pub fn is_nc_name(name: &str) -> bool {
    is_name(name) && !name.contains(':')
}

pub fn is_name(name: &str) -> bool {
    // NameStartChar (NameChar)*
    let mut c = name.chars();
    if !c.next().is_some_and(is_name_start_char) {
        return false;
    }
    c.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(c,  '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

pub fn is_utf8(encoding: &[u8]) -> bool {
    matches!(
        encoding.to_ascii_lowercase().as_slice(),
        b"unicode-1-1-utf-8"
            | b"unicode11utf8"
            | b"unicode20utf8"
            | b"utf-8"
            | b"utf8"
            | b"x-unicode20utf8"
    )
}

/// A [`BufRead`] layer that keeps track of how far into the input the consumer has read.
///
/// The XML reader pulls its input through `fill_buf`/`consume`, so the counters
/// always point just past the last consumed byte, i.e. the end of the event
/// currently being processed.
pub struct PositionedReader<R> {
    inner: R,
    line: u64,
    column: u64,
    offset: u64,
}

impl<R> PositionedReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    pub fn position(&self) -> TextPosition {
        TextPosition {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }
}

impl<R: BufRead> Read for PositionedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let amt = available.len().min(buf.len());
        buf[..amt].copy_from_slice(&available[..amt]);
        self.consume(amt);
        Ok(amt)
    }
}

impl<R: BufRead> BufRead for PositionedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        // fill_buf is idempotent until consume, so this sees the bytes again
        if let Ok(buffer) = self.inner.fill_buf() {
            for &byte in &buffer[..amt.min(buffer.len())] {
                if byte == b'\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
        }
        self.offset += amt as u64;
        self.inner.consume(amt);
    }
}
