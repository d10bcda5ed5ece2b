/*!
 * Error types for the textweave library.
 *
 * This module contains custom error types for the different stages of the
 * translation pipeline, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

use crate::text::Range;

/// Errors raised by the byte-offset text primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The range ends before it starts
    #[error("negative length range [{}, {})", .range.start, .range.end)]
    NegativeLength {
        /// The offending range
        range: Range,
    },

    /// The range starts past the end of the input
    #[error("range start (pos {}) after input end (len {len})", .range.start)]
    StartOutOfBounds {
        /// The offending range
        range: Range,
        /// Byte length of the input
        len: usize,
    },

    /// The range ends past the end of the input
    #[error("range end (pos {}) after input end (len {len})", .range.end)]
    EndOutOfBounds {
        /// The offending range
        range: Range,
        /// Byte length of the input
        len: usize,
    },

    /// The range does not fall on UTF-8 character boundaries
    #[error("range [{}, {}) splits a UTF-8 character", .range.start, .range.end)]
    NotCharBoundary {
        /// The offending range
        range: Range,
    },

    /// Two replacements cover overlapping ranges
    #[error("range [{}, {}) overlaps the previous replacement ending at {prev_end}", .range.start, .range.end)]
    Overlap {
        /// The offending range
        range: Range,
        /// End offset of the preceding replacement after sorting
        prev_end: usize,
    },
}

/// A format-specific lexer or tokenizer failure, carrying the byte offset at
/// which the scan gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at byte {pos}")]
pub struct RangerError {
    /// Byte offset into the scanned input
    pub pos: usize,
    /// The original lexer/tokenizer message
    pub message: String,
}

/// Errors that can occur when calling a translation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Error when making an API request fails
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("failed to parse backend response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("backend responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("authentication error: {0}")]
    AuthenticationError(String),

    /// Any other backend failure
    #[error("{0}")]
    Other(String),
}

/// Main error type returned by [`Translator::translate`](crate::Translator::translate),
/// wrapping the failure of whichever pipeline stage gave up first.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Reading the input stream failed
    #[error("read input: {0}")]
    ReadInput(#[source] std::io::Error),

    /// The input is not valid UTF-8 text
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The ranger failed while scanning the input
    #[error("scan input: {0}")]
    Ranger(#[from] RangerError),

    /// Extracting a range from the source buffer failed
    #[error("extract range: {0}")]
    Range(#[from] RangeError),

    /// A backend call failed while translating the given range
    #[error("translate range [{}, {}): {source}", .range.start, .range.end)]
    Backend {
        /// The range whose translation failed
        range: Range,
        /// The originating backend failure
        #[source]
        source: BackendError,
    },

    /// Applying the collected replacements failed
    #[error("apply replacements: {0}")]
    Replace(#[source] RangeError),

    /// The translation deadline elapsed before all ranges were translated
    #[error("translation cancelled")]
    Cancelled,
}
