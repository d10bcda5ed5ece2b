/*!
 * Cutting non-translatable substrings out of a text with the ability to
 * reinsert them at their original positions later.
 *
 * A typical use case are placeholder variables: splitting
 * `"Hello, {firstName}!"` by the pattern `{.+?}` yields the parts
 * `["Hello, ", "!"]` and the preserved item `{firstName}` carrying the index
 * at which it has to be stitched back in.
 */

use regex::Regex;

/// A cutout substring plus the part index at which it has to be reinserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The preserved text
    pub text: String,
    /// Index of the part in front of which the text has to be reinserted
    pub index: usize,
}

/// Slice `text` into the substrings separated by matches of `expr`.
///
/// The returned parts contain the text between matches, with empty strings
/// skipped. Each match becomes an [`Item`] whose index is the number of parts
/// collected at the time the match was found, so a run of leading matches
/// yields items with index `0` and a trailing match yields an item whose
/// index equals the final part count.
///
/// [`join`] reconstructs the original text from the two lists.
pub fn split(expr: &Regex, text: &str) -> (Vec<String>, Vec<Item>) {
    let mut parts: Vec<String> = Vec::new();
    let mut items: Vec<Item> = Vec::new();
    let mut text_start = 0;

    for found in expr.find_iter(text) {
        let between = &text[text_start..found.start()];
        if !between.is_empty() {
            parts.push(between.to_string());
        }
        text_start = found.end();
        items.push(Item {
            text: found.as_str().to_string(),
            index: parts.len(),
        });
    }

    if text_start < text.len() {
        parts.push(text[text_start..].to_string());
    }

    (parts, items)
}

/// Apply several patterns iteratively: split by the first, then split each
/// resulting part by the next, remapping the indices of items from earlier
/// rounds into the refined part numbering.
pub fn split_all(exprs: &[Regex], text: &str) -> (Vec<String>, Vec<Item>) {
    let mut parts = vec![text.to_string()];
    let mut items: Vec<Item> = Vec::new();

    for expr in exprs {
        let mut new_parts: Vec<String> = Vec::new();
        let mut new_items: Vec<Item> = Vec::new();
        let mut carried = items.into_iter().peekable();

        for (i, part) in parts.iter().enumerate() {
            // Items sitting in front of this part keep their position.
            while let Some(mut item) = carried.next_if(|item| item.index == i) {
                item.index = new_parts.len();
                new_items.push(item);
            }

            let (sub_parts, sub_items) = split(expr, part);
            let base = new_parts.len();
            new_items.extend(sub_items.into_iter().map(|mut item| {
                item.index += base;
                item
            }));
            new_parts.extend(sub_parts);
        }

        // Items past the final part stay at the tail.
        for mut item in carried {
            item.index = new_parts.len();
            new_items.push(item);
        }

        parts = new_parts;
        items = new_items;
    }

    (parts, items)
}

/// Join `parts` back into a single string, reinserting every item in front of
/// the part its index points at. Items whose index lies past the last part
/// are appended at the end.
pub fn join(parts: &[String], items: &[Item]) -> String {
    let mut result = String::new();
    let mut pending = items.iter().peekable();

    for (i, part) in parts.iter().enumerate() {
        while let Some(item) = pending.next_if(|item| item.index == i) {
            result.push_str(&item.text);
        }
        result.push_str(part);
    }
    for item in pending {
        result.push_str(&item.text);
    }

    result
}
