//! Decomposition of a free-form version string into its four fields.
//!
//! The layout is, in order and with every part optional:
//!
//! ```text
//! <release name> [-_] <alpha annotation> [-_] <digit group> [-_] <build specifier>
//! ```
//!
//! Alphabetic runs and the digit group are greedy. The build specifier takes whatever remains,
//! so decomposition itself never fails.
use crate::snapshot::DIGIT_SEPARATOR;

/// Borrowed views of the four fields of a version string. Absent fields are empty slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Components<'vs> {
    pub(crate) release_name: &'vs str,
    pub(crate) alpha_annotation: &'vs str,
    pub(crate) digits: &'vs str,
    pub(crate) build_specifier: &'vs str,
}

/// Left-to-right scanner over the bytes of a version string.
struct Cursor<'vs> {
    text: &'vs str,
    pos: usize,
}

impl<'vs> Cursor<'vs> {
    fn new(text: &'vs str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consumes the longest run of bytes satisfying `pred` and returns it.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'vs str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        // only ASCII bytes are ever consumed, so both ends sit on char boundaries
        &self.text[start..self.pos]
    }

    /// Consumes a single `-` or `_`, if present.
    fn skip_separator(&mut self) {
        if matches!(self.peek(), Some(b'-' | b'_')) {
            self.pos += 1;
        }
    }

    /// Consumes `(digits '.')* digits*`, greedily.
    fn take_digit_group(&mut self) -> &'vs str {
        let start = self.pos;
        loop {
            let run_start = self.pos;
            self.take_while(|b| b.is_ascii_digit());
            let had_digits = self.pos > run_start;
            if had_digits && self.peek() == Some(b'.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.text[start..self.pos]
    }

    fn rest(self) -> &'vs str {
        &self.text[self.pos..]
    }
}

/// Splits a version string into its [Components].
pub(crate) fn decompose(version_str: &str) -> Components<'_> {
    let mut cursor = Cursor::new(version_str);

    let release_name = cursor.take_while(|b| b.is_ascii_alphabetic());
    cursor.skip_separator();
    let alpha_annotation = cursor.take_while(|b| b.is_ascii_alphabetic());
    cursor.skip_separator();
    let digits = cursor.take_digit_group();
    cursor.skip_separator();
    let build_specifier = cursor.rest();

    Components {
        release_name,
        alpha_annotation,
        digits,
        build_specifier,
    }
}

/// Splits a digit group on `.`, dropping empty tokens. Returns `None` if no segment remains.
pub(crate) fn split_digits(digit_group: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = digit_group
        .split(DIGIT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect();

    (!segments.is_empty()).then_some(segments)
}
