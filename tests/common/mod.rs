/*!
 * Common test utilities for the textweave test suite
 */

use tokio::sync::mpsc;

use textweave::errors::RangerError;
use textweave::text::Range;
use textweave::Ranger;

/// A ranger that emits a fixed list of ranges, for exercising the
/// orchestrator without a real format scanner.
pub struct StaticRanger {
    ranges: Vec<Range>,
}

impl StaticRanger {
    pub fn new(ranges: Vec<Range>) -> Self {
        Self { ranges }
    }
}

impl Ranger for StaticRanger {
    fn ranges(&self, _input: String) -> (mpsc::Receiver<Range>, mpsc::Receiver<RangerError>) {
        let (range_tx, range_rx) = mpsc::channel(32);
        let (_err_tx, err_rx) = mpsc::channel(1);
        let ranges = self.ranges.clone();
        tokio::spawn(async move {
            for r in ranges {
                if range_tx.send(r).await.is_err() {
                    return;
                }
            }
        });
        (range_rx, err_rx)
    }
}

/// A ranger that reports a scan failure after emitting no ranges.
pub struct FailingRanger {
    pub message: String,
}

impl Ranger for FailingRanger {
    fn ranges(&self, _input: String) -> (mpsc::Receiver<Range>, mpsc::Receiver<RangerError>) {
        let (_range_tx, range_rx) = mpsc::channel(1);
        let (err_tx, err_rx) = mpsc::channel(1);
        let message = self.message.clone();
        tokio::spawn(async move {
            let _ = err_tx.send(RangerError { pos: 0, message }).await;
        });
        (range_rx, err_rx)
    }
}

/// Drain a ranger over `input`, returning all ranges and the first error.
pub async fn drain_ranger(
    ranger: &dyn Ranger,
    input: &str,
) -> (Vec<Range>, Option<RangerError>) {
    let (mut range_rx, mut err_rx) = ranger.ranges(input.to_string());
    let mut ranges = Vec::new();
    while let Some(r) = range_rx.recv().await {
        ranges.push(r);
    }
    (ranges, err_rx.recv().await)
}

/// Shorthand for building a range
pub fn range(start: usize, end: usize) -> Range {
    Range::new(start, end)
}
