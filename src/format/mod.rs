/*!
 * Format-aware rangers.
 *
 * A ranger scans an input document and reports the byte ranges whose
 * contents are natural language and may be handed to a translation backend.
 * Everything outside those ranges is structural (keys, tags, punctuation,
 * whitespace) and survives translation byte-for-byte.
 */

use tokio::sync::mpsc;

use crate::errors::RangerError;
use crate::text::Range;

pub mod html;
pub mod json;

/// Capacity of the channels produced by the bundled rangers. Small on
/// purpose: a slow consumer applies backpressure to the scan instead of
/// buffering the whole document's ranges.
pub(crate) const RANGE_CHANNEL_CAPACITY: usize = 32;

/// Locates translatable byte ranges in an input document.
pub trait Ranger: Send + Sync {
    /// Spawn a scan of `input`, returning a channel of translatable ranges
    /// and a channel of scan errors.
    ///
    /// Ranges are produced in document order, pairwise non-overlapping and
    /// aligned to UTF-8 character boundaries. The ranger closes the range
    /// channel when the scan completes; dropping the receivers stops the
    /// scan. Must be called from within a tokio runtime.
    fn ranges(&self, input: String) -> (mpsc::Receiver<Range>, mpsc::Receiver<RangerError>);
}
