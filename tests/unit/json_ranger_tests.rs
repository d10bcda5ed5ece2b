/*!
 * Tests for the JSON ranger adapter
 */

use crate::common::{drain_ranger, range};
use textweave::json_ranger;

#[tokio::test]
async fn test_json_ranger_should_report_quote_enclosed_inner_text() {
    let input = r#"{"title": "This is a title.", "description": "This is a description."}"#;
    let (ranges, err) = drain_ranger(&json_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(11, 27), range(46, 68)]);
    assert_eq!(&input[11..27], "This is a title.");
    assert_eq!(&input[46..68], "This is a description.");
}

#[tokio::test]
async fn test_json_ranger_should_not_cover_keys() {
    let input = r#"{"title": "This is a title.", "description": "This is a description."}"#;
    let (ranges, _) = drain_ranger(&json_ranger(), input).await;

    // No emitted range may overlap a region between a key's opening quote
    // and the following colon.
    for key_start in [1usize, 30] {
        let colon = input[key_start..].find(':').unwrap() + key_start;
        for r in &ranges {
            assert!(
                r.end <= key_start || r.start > colon,
                "range {r} overlaps key region [{key_start}, {colon}]"
            );
        }
    }
}

#[tokio::test]
async fn test_json_ranger_should_report_array_elements_individually() {
    let input = r#"["Hello", "Bye", "How are you?"]"#;
    let (ranges, err) = drain_ranger(&json_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(2, 7), range(11, 14), range(18, 30)]);
}

#[tokio::test]
async fn test_json_ranger_should_report_nothing_for_literal_only_documents() {
    let (ranges, err) = drain_ranger(&json_ranger(), r#"{"count": 42, "done": true}"#).await;

    assert!(err.is_none());
    assert!(ranges.is_empty());
}

#[tokio::test]
async fn test_json_ranger_should_emit_ranges_in_document_order_without_overlap() {
    let input = r#"{"a": "one", "b": {"c": ["two", "three"], "d": "four"}}"#;
    let (ranges, err) = drain_ranger(&json_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges.len(), 4);
    for pair in ranges.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{} overlaps {}", pair[0], pair[1]);
    }
}
