/*!
 * Translation ranges for JSON documents.
 *
 * The ranger wraps the string-value lexer in [`lex`]: for every string value
 * it reports the quote-enclosed inner text, so keys, literals and all
 * structural punctuation stay untouched.
 */

use log::debug;
use tokio::sync::mpsc;

use crate::errors::RangerError;
use crate::text::Range;

use super::{Ranger, RANGE_CHANNEL_CAPACITY};

pub mod lex;

use lex::{Lexer, Token};

/// A [`Ranger`] that reports the contents of JSON string values
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRanger;

impl JsonRanger {
    /// Create a new JSON ranger
    pub fn new() -> Self {
        JsonRanger
    }
}

impl Ranger for JsonRanger {
    fn ranges(&self, input: String) -> (mpsc::Receiver<Range>, mpsc::Receiver<RangerError>) {
        let (range_tx, range_rx) = mpsc::channel(RANGE_CHANNEL_CAPACITY);
        let (err_tx, err_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            for token in Lexer::new(input.as_bytes()) {
                match token {
                    Token::Str { pos, raw } => {
                        // Strip the surrounding quotes from the reported range.
                        let r = Range::new(pos + 1, pos + raw.len() - 1);
                        if range_tx.send(r).await.is_err() {
                            // Consumer is gone; stop scanning.
                            return;
                        }
                    }
                    Token::Eof { pos } => {
                        debug!("json ranger: scan complete at byte {pos}");
                        return;
                    }
                    Token::Error { pos, message } => {
                        let _ = err_tx
                            .send(RangerError {
                                pos,
                                message: format!("lex: {message}"),
                            })
                            .await;
                        return;
                    }
                }
            }
        });

        (range_rx, err_rx)
    }
}
