/*!
 * Translation backends.
 *
 * A backend turns one text fragment into its translation; everything else
 * (what gets sent, what is preserved, how results are stitched back in) is
 * the translator's job. This module contains the backend contract and the
 * bundled implementations:
 * - `deepl`: DeepL REST API adapter
 * - `mock`: configurable in-memory backends for tests and examples
 */

use async_trait::async_trait;

use crate::errors::BackendError;

pub mod deepl;
pub mod mock;

/// An external translation service invoked once per text fragment.
///
/// Implementations are called concurrently up to the translator's configured
/// parallelism and should tolerate having an in-flight call dropped when the
/// translation is cancelled. Retry policies are the backend's responsibility;
/// the translator aborts on the first error it sees.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang`
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, BackendError>;
}
