/*!
 * Byte-offset text primitives.
 *
 * Ranges, extraction and replacement all operate on byte offsets into the
 * source buffer. The rangers only report positions at format delimiters
 * (quotes, angle brackets), so ranges handed through the pipeline always fall
 * on UTF-8 character boundaries; the primitives still verify this instead of
 * panicking on a bad slice.
 */

use std::fmt;

use crate::errors::RangeError;

pub mod preserve;

/// A half-open interval `[start, end)` of byte offsets into a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Range {
    /// Create a new range
    pub fn new(start: usize, end: usize) -> Self {
        Range { start, end }
    }

    /// Byte length of the range
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no bytes
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A range together with the text to substitute for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// The range being replaced
    pub range: Range,
    /// The replacement text; may differ in length from the range
    pub text: String,
}

/// Extract the text at range `r` from `input`.
///
/// # Examples
///
/// ```
/// use textweave::text::{extract, Range};
///
/// let text = extract("This is a sentence.", Range::new(5, 9)).unwrap();
/// assert_eq!(text, "is a");
/// ```
pub fn extract(input: &str, r: Range) -> Result<&str, RangeError> {
    if r.end < r.start {
        return Err(RangeError::NegativeLength { range: r });
    }
    if r.start > input.len() {
        return Err(RangeError::StartOutOfBounds {
            range: r,
            len: input.len(),
        });
    }
    if r.end > input.len() {
        return Err(RangeError::EndOutOfBounds {
            range: r,
            len: input.len(),
        });
    }
    input
        .get(r.start..r.end)
        .ok_or(RangeError::NotCharBoundary { range: r })
}

/// Replace the text at range `r` with `repl`.
///
/// # Examples
///
/// ```
/// use textweave::text::{replace, Range};
///
/// let replaced = replace("This is a sentence.", "was", Range::new(5, 7)).unwrap();
/// assert_eq!(replaced, "This was a sentence.");
/// ```
pub fn replace(input: &str, repl: &str, r: Range) -> Result<String, RangeError> {
    extract(input, r)?;
    let mut out = String::with_capacity(input.len() + repl.len());
    out.push_str(&input[..r.start]);
    out.push_str(repl);
    out.push_str(&input[r.end..]);
    Ok(out)
}

/// Apply all `replacements` to `input`.
///
/// Replacements are sorted by range start (stable, so equal starts keep their
/// given order) and applied with a running offset, so every range is
/// expressed against the *original* input regardless of how earlier rewrites
/// changed the length. Overlapping ranges are rejected.
///
/// # Examples
///
/// ```
/// use textweave::text::{replace_many, Range, Replacement};
///
/// let out = replace_many(
///     "This is a sentence.",
///     vec![
///         Replacement { range: Range::new(0, 4), text: "That".into() },
///         Replacement { range: Range::new(5, 7), text: "was".into() },
///     ],
/// )
/// .unwrap();
/// assert_eq!(out, "That was a sentence.");
/// ```
pub fn replace_many(input: &str, mut replacements: Vec<Replacement>) -> Result<String, RangeError> {
    replacements.sort_by_key(|repl| repl.range.start);

    let mut output = input.to_string();
    let mut offset: isize = 0;
    let mut prev_end: usize = 0;

    for repl in &replacements {
        // Bounds and boundary checks run against the original input; the
        // offset below maps the range into the partially rewritten output.
        extract(input, repl.range)?;
        if repl.range.start < prev_end {
            return Err(RangeError::Overlap {
                range: repl.range,
                prev_end,
            });
        }

        let start = (repl.range.start as isize + offset) as usize;
        let end = (repl.range.end as isize + offset) as usize;
        output.replace_range(start..end, &repl.text);

        offset += repl.text.len() as isize - repl.range.len() as isize;
        prev_end = repl.range.end;
    }

    Ok(output)
}
