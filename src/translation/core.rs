/*!
 * Core translator implementation.
 *
 * The pipeline buffers the input, runs the ranger concurrently with a pool
 * of worker tasks, and applies the collected replacements in one pass:
 *
 * ```text
 * input -> buffer -> ranger -> workers (split / translate / join) -> replace
 * ```
 *
 * Workers complete out of order; the final output is deterministic because
 * replacements are applied by sorted start offset.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::backends::Backend;
use crate::errors::TranslateError;
use crate::format::Ranger;
use crate::text::{self, preserve, Range, Replacement};

/// Capacity of the worker result channel
const TRANSLATION_CHANNEL_CAPACITY: usize = 32;

/// Fragments consisting solely of ASCII punctuation are not worth a backend
/// round trip and are kept verbatim.
static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:punct:]]+$").expect("punctuation pattern"));

/// Options for customizing a translation run
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    preserve: Vec<Regex>,
    parallel: Option<i32>,
    escape_double_quotes: bool,
    timeout: Option<Duration>,
}

impl TranslateOptions {
    /// Create the default options: one worker, no preserve patterns
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent translation of substrings matching `expr`; matches are cut
    /// out before the backend sees the fragment and reinserted verbatim.
    /// May be called repeatedly to add further patterns.
    pub fn preserve(mut self, expr: Regex) -> Self {
        self.preserve.push(expr);
        self
    }

    /// Set the maximum number of parallel backend requests. Defaults to 1.
    ///
    /// With `n <= 0` no translation work is performed at all and the output
    /// equals the input.
    pub fn parallel(mut self, n: i32) -> Self {
        self.parallel = Some(n);
        self
    }

    /// Un-escape `\"` sequences before translation and re-escape afterwards,
    /// so JSON string contents containing literal quotes round-trip cleanly
    /// through backends that would otherwise mangle the backslashes.
    pub fn escape_double_quotes(mut self, enabled: bool) -> Self {
        self.escape_double_quotes = enabled;
        self
    }

    /// Abort the translation with [`TranslateError::Cancelled`] if it has
    /// not completed within `duration`. In-flight backend calls are
    /// cancelled.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    fn workers(&self) -> usize {
        self.parallel.unwrap_or(1).max(0) as usize
    }
}

/// A structured-text translator.
///
/// The translator owns a [`Backend`] and, per [`translate`](Self::translate)
/// call, combines it with a format [`Ranger`] to produce a translated
/// document whose bytes outside the translated ranges are identical to the
/// input.
pub struct Translator {
    backend: Arc<dyn Backend>,
}

impl Translator {
    /// Create a new translator using the given backend
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Translate the contents of `input` from `source_lang` to `target_lang`.
    ///
    /// The input is read fully into memory; `ranger` decides which byte
    /// ranges are translatable. Returns the translated document, which is
    /// byte-identical to the input outside the replaced ranges.
    pub async fn translate<I>(
        &self,
        mut input: I,
        source_lang: &str,
        target_lang: &str,
        ranger: &dyn Ranger,
        options: TranslateOptions,
    ) -> Result<Vec<u8>, TranslateError>
    where
        I: AsyncRead + Unpin + Send,
    {
        let mut raw = Vec::new();
        input
            .read_to_end(&mut raw)
            .await
            .map_err(TranslateError::ReadInput)?;
        let buffer = Arc::new(String::from_utf8(raw)?);

        // The ranger scans its own copy of the input while the workers
        // extract fragments from the shared buffer.
        let (range_rx, mut ranger_err_rx) = ranger.ranges(buffer.as_ref().clone());
        let shared_ranges = Arc::new(Mutex::new(range_rx));

        let (translated_tx, mut translated_rx) =
            mpsc::channel::<(Range, String)>(TRANSLATION_CHANNEL_CAPACITY);
        let (worker_err_tx, mut worker_err_rx) = mpsc::channel::<TranslateError>(1);

        let workers = options.workers();
        let preserve = Arc::new(options.preserve.clone());
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(workers);
        debug!("translator: starting {workers} worker(s)");

        for id in 0..workers {
            let worker = WorkerContext {
                id,
                buffer: buffer.clone(),
                ranges: shared_ranges.clone(),
                backend: self.backend.clone(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
                preserve: preserve.clone(),
                escape_double_quotes: options.escape_double_quotes,
                translated_tx: translated_tx.clone(),
                error_tx: worker_err_tx.clone(),
            };
            handles.push(tokio::spawn(worker.run()));
        }
        // Only the workers hold senders from here on; the result channel
        // closes when the last worker finishes.
        drop(translated_tx);
        drop(worker_err_tx);

        let collect = async {
            let mut translations: Vec<(Range, String)> = Vec::new();
            loop {
                tokio::select! {
                    // Error channels are polled first so a failure that
                    // races with normal completion still fails the call.
                    biased;
                    Some(err) = ranger_err_rx.recv() => {
                        error!("translator: ranger failed: {err}");
                        return Err(TranslateError::Ranger(err));
                    }
                    Some(err) = worker_err_rx.recv() => {
                        error!("translator: worker failed: {err}");
                        return Err(err);
                    }
                    translated = translated_rx.recv() => match translated {
                        Some(entry) => translations.push(entry),
                        None => return Ok(translations),
                    }
                }
            }
        };

        let collected = match options.timeout {
            Some(duration) => tokio::time::timeout(duration, collect)
                .await
                .unwrap_or(Err(TranslateError::Cancelled)),
            None => collect.await,
        };

        let translations = match collected {
            Ok(translations) => translations,
            Err(err) => {
                for handle in &handles {
                    handle.abort();
                }
                // Wait for the workers to wind down so no backend call
                // outlives this translate call.
                let _ = futures::future::join_all(handles).await;
                return Err(err);
            }
        };

        let replacements: Vec<Replacement> = translations
            .into_iter()
            .map(|(range, text)| Replacement { range, text })
            .collect();
        debug!("translator: applying {} replacement(s)", replacements.len());

        let output =
            text::replace_many(&buffer, replacements).map_err(TranslateError::Replace)?;
        Ok(output.into_bytes())
    }
}

/// Everything one worker task needs to process ranges
struct WorkerContext {
    id: usize,
    buffer: Arc<String>,
    ranges: Arc<Mutex<mpsc::Receiver<Range>>>,
    backend: Arc<dyn Backend>,
    source_lang: String,
    target_lang: String,
    preserve: Arc<Vec<Regex>>,
    escape_double_quotes: bool,
    translated_tx: mpsc::Sender<(Range, String)>,
    error_tx: mpsc::Sender<TranslateError>,
}

impl WorkerContext {
    async fn run(self) {
        loop {
            // Workers share one receiver; the lock is only held while
            // waiting for the next range, not while translating it.
            let range = {
                let mut ranges = self.ranges.lock().await;
                ranges.recv().await
            };
            let Some(range) = range else {
                break;
            };

            debug!("worker {}: translating range {range}", self.id);
            match self.translate_range(range).await {
                Ok(translated) => {
                    if self.translated_tx.send((range, translated)).await.is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = self.error_tx.send(err).await;
                    return;
                }
            }
        }
    }

    /// Translate one extracted fragment: cut out preserved substrings,
    /// translate each remaining part with its surrounding whitespace
    /// stripped, and stitch everything back together.
    async fn translate_range(&self, range: Range) -> Result<String, TranslateError> {
        let fragment = text::extract(&self.buffer, range)?;

        let (mut parts, items) = if self.preserve.is_empty() {
            (vec![fragment.to_string()], Vec::new())
        } else {
            preserve::split_all(&self.preserve, fragment)
        };

        for part in parts.iter_mut() {
            let (leading, core, trailing) = split_edge_whitespace(part);
            if core.is_empty() || PUNCT_RE.is_match(core) {
                continue;
            }
            let leading = leading.to_string();
            let trailing = trailing.to_string();
            let request_text = if self.escape_double_quotes {
                core.replace("\\\"", "\"")
            } else {
                core.to_string()
            };

            let translated = self
                .backend
                .translate(&request_text, &self.source_lang, &self.target_lang)
                .await
                .map_err(|source| TranslateError::Backend { range, source })?;
            let translated = if self.escape_double_quotes {
                translated.replace('"', "\\\"")
            } else {
                translated
            };

            *part = format!("{leading}{translated}{trailing}");
        }

        Ok(preserve::join(&parts, &items))
    }
}

/// Split a part into its leading whitespace, core text and trailing
/// whitespace. Backends frequently strip surrounding whitespace, so it is
/// withheld from the request and reinstated verbatim afterwards.
fn split_edge_whitespace(s: &str) -> (&str, &str, &str) {
    let after_leading = s.trim_start();
    let leading = &s[..s.len() - after_leading.len()];
    let core = after_leading.trim_end();
    let trailing = &after_leading[core.len()..];
    (leading, core, trailing)
}
