/*!
 * # textweave - structure-preserving document translation
 *
 * A Rust library for translating structured text documents (JSON, HTML)
 * between natural languages while keeping the document's syntactic skeleton
 * byte-for-byte intact.
 *
 * ## Features
 *
 * - Translate JSON string values without touching keys, literals or layout
 * - Translate HTML text nodes and selected tag attributes
 * - Preserve placeholders and brand names via regex patterns
 * - Bounded parallel translation through any [`Backend`] implementation
 * - Byte-identical output outside the translated ranges
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `text`: byte-offset primitives (ranges, extraction, replacement) and the
 *   preserve splitter
 * - `format`: format-aware rangers that locate translatable byte ranges
 *   (`format::json`, `format::html`)
 * - `translation`: the orchestrator combining ranger, worker pool and
 *   replacement engine
 * - `backends`: the backend contract plus the DeepL adapter and test mocks
 * - `jsonmap`: structural JSON diff/extract/merge helpers
 *
 * ## Example
 *
 * ```
 * use std::sync::Arc;
 * use textweave::backends::mock::MockBackend;
 * use textweave::{json_ranger, TranslateOptions, Translator};
 *
 * # #[tokio::main(flavor = "current_thread")]
 * # async fn main() {
 * let backend = Arc::new(MockBackend::dictionary(&[("Hello, world!", "Hallo, Welt!")]));
 * let translator = Translator::new(backend);
 *
 * let input = br#"{"greeting": "Hello, world!"}"#;
 * let output = translator
 *     .translate(&input[..], "en", "de", &json_ranger(), TranslateOptions::new())
 *     .await
 *     .unwrap();
 *
 * assert_eq!(output, br#"{"greeting": "Hallo, Welt!"}"#);
 * # }
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Public modules
pub mod backends;
pub mod errors;
pub mod format;
pub mod jsonmap;
pub mod text;
pub mod translation;

// Re-export main types for easier usage
pub use backends::Backend;
pub use errors::{BackendError, RangeError, RangerError, TranslateError};
pub use format::html::HtmlRanger;
pub use format::json::JsonRanger;
pub use format::Ranger;
pub use text::{Range, Replacement};
pub use translation::{TranslateOptions, Translator};

/// A ranger over JSON string values
pub fn json_ranger() -> JsonRanger {
    JsonRanger::new()
}

/// A ranger over HTML text nodes; attribute selection is configured on the
/// returned value.
pub fn html_ranger() -> HtmlRanger {
    HtmlRanger::new()
}
