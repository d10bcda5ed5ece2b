/*!
 * Translation ranges for HTML documents.
 *
 * The ranger drives an HTML-tolerant markup tokenizer over the input and
 * reports text nodes plus the values of explicitly selected tag attributes.
 * Tags, comments, doctypes and unselected attributes advance the byte
 * position without producing ranges.
 */

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tokio::sync::mpsc;

use crate::errors::RangerError;
use crate::text::Range;

use super::{Ranger, RANGE_CHANNEL_CAPACITY};

/// Matches `name="value"` pairs inside the raw bytes of a tag. Attribute
/// values containing escaped quotes are not supported; the match simply stops
/// at the first closing quote.
static ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?P<name>[[:word:]]+)="(?P<value>[^"]+)""#).expect("attr pattern"));

/// A start tag or self-closing tag as seen by the attribute selectors
#[derive(Debug)]
pub struct TagToken<'a> {
    /// Lower-cased tag name
    pub name: &'a str,
    /// The raw tag bytes, angle brackets included
    pub raw: &'a str,
}

type AttributeSelector = Arc<dyn Fn(&TagToken<'_>) -> Vec<String> + Send + Sync>;

/// A [`Ranger`] that reports HTML text nodes and selected attribute values
#[derive(Clone, Default)]
pub struct HtmlRanger {
    selectors: Vec<AttributeSelector>,
}

impl HtmlRanger {
    /// Create a ranger that reports text nodes only
    pub fn new() -> Self {
        HtmlRanger::default()
    }

    /// Add a custom attribute selector.
    ///
    /// The function is called for every start tag and self-closing tag; the
    /// attribute names it returns are translated for that tag. Selections
    /// from multiple selectors are merged.
    pub fn with_attribute_fn<F>(mut self, selector: F) -> Self
    where
        F: Fn(&TagToken<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.selectors.push(Arc::new(selector));
        self
    }

    /// Translate the attribute `name` on the given tags, or on all tags if
    /// `tags` is empty.
    pub fn with_attribute(self, name: &str, tags: &[&str]) -> Self {
        let name = name.to_string();
        let tags: Vec<String> = tags.iter().map(|tag| tag.to_ascii_lowercase()).collect();
        self.with_attribute_fn(move |token| {
            if tags.is_empty() || tags.iter().any(|tag| tag == token.name) {
                vec![name.clone()]
            } else {
                Vec::new()
            }
        })
    }

    /// Translate the attribute described by a `"tag.attr"` path.
    pub fn with_attribute_path(self, path: &str) -> anyhow::Result<Self> {
        let (tag, attr) = path
            .split_once('.')
            .filter(|(tag, attr)| !tag.is_empty() && !attr.is_empty() && !attr.contains('.'))
            .ok_or_else(|| anyhow::anyhow!("invalid attribute path: {path:?}"))?;
        Ok(self.with_attribute(attr, &[tag]))
    }

    fn selected_attributes(&self, token: &TagToken<'_>) -> Vec<String> {
        self.selectors
            .iter()
            .flat_map(|selector| selector(token))
            .collect()
    }
}

/// Byte ranges of the selected attribute values inside the raw tag bytes,
/// relative to the start of the tag.
fn attribute_value_ranges(raw_tag: &str, selected: &[String]) -> Vec<Range> {
    let mut ranges = Vec::new();
    for captures in ATTR_RE.captures_iter(raw_tag) {
        let name = &captures["name"];
        if !selected.iter().any(|wanted| wanted == name) {
            continue;
        }
        let value = captures.name("value").expect("value group");
        ranges.push(Range::new(value.start(), value.end()));
    }
    ranges
}

impl Ranger for HtmlRanger {
    fn ranges(&self, input: String) -> (mpsc::Receiver<Range>, mpsc::Receiver<RangerError>) {
        let (range_tx, range_rx) = mpsc::channel(RANGE_CHANNEL_CAPACITY);
        let (err_tx, err_rx) = mpsc::channel(1);
        let ranger = self.clone();

        tokio::spawn(async move {
            let mut reader = Reader::from_reader(input.as_bytes());
            let config = reader.config_mut();
            config.trim_text(false);
            config.check_end_names = false;
            config.allow_unmatched_ends = true;

            let mut buf = Vec::new();
            let mut pos = 0usize;

            loop {
                buf.clear();
                let event = match reader.read_event_into(&mut buf) {
                    Ok(event) => event,
                    Err(err) => {
                        let _ = err_tx
                            .send(RangerError {
                                pos: reader.buffer_position() as usize,
                                message: format!("tokenizer: {err}"),
                            })
                            .await;
                        return;
                    }
                };
                let end = reader.buffer_position() as usize;

                match event {
                    Event::Eof => {
                        debug!("html ranger: scan complete at byte {pos}");
                        return;
                    }
                    Event::Text(_) => {
                        let raw = &input[pos..end];
                        if !raw.trim().is_empty()
                            && range_tx.send(Range::new(pos, end)).await.is_err()
                        {
                            return;
                        }
                    }
                    Event::Start(ref tag) | Event::Empty(ref tag) => {
                        let name =
                            String::from_utf8_lossy(tag.name().as_ref()).to_ascii_lowercase();
                        let token = TagToken {
                            name: &name,
                            raw: &input[pos..end],
                        };
                        let selected = ranger.selected_attributes(&token);
                        if !selected.is_empty() {
                            for value in attribute_value_ranges(token.raw, &selected) {
                                let r = Range::new(pos + value.start, pos + value.end);
                                if range_tx.send(r).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    // End tags, comments, doctypes, processing instructions
                    // and CDATA only advance the position.
                    _ => {}
                }

                pos = end;
            }
        });

        (range_rx, err_rx)
    }
}
