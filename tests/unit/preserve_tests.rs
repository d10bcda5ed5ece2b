/*!
 * Tests for the preserve splitter and joiner
 */

use regex::Regex;
use textweave::text::preserve::{join, split, split_all, Item};

fn expr(pattern: &str) -> Regex {
    Regex::new(pattern).expect("test pattern")
}

#[test]
fn test_join_should_insert_items_at_their_indices() {
    let parts: Vec<String> = vec!["Hello ".into(), ", how are you ".into(), "?".into()];
    let items = vec![
        Item {
            text: "Bob".into(),
            index: 1,
        },
        Item {
            text: "today".into(),
            index: 2,
        },
    ];

    assert_eq!(join(&parts, &items), "Hello Bob, how are you today?");
}

#[test]
fn test_join_should_handle_empty_item_list() {
    let parts: Vec<String> = vec!["a".into(), "b".into()];
    assert_eq!(join(&parts, &[]), "ab");
}

#[test]
fn test_split_should_handle_adjacent_matches() {
    let (parts, items) = split(&expr(r"\{.+?\}"), "Hello, {firstName}{lastName}!");

    assert_eq!(parts, vec!["Hello, ", "!"]);
    assert_eq!(
        items,
        vec![
            Item {
                text: "{firstName}".into(),
                index: 1
            },
            Item {
                text: "{lastName}".into(),
                index: 1
            },
        ]
    );
    assert_eq!(join(&parts, &items), "Hello, {firstName}{lastName}!");
}

#[test]
fn test_split_should_handle_match_only_input() {
    let (parts, items) = split(&expr(r"\{.+?\}"), "{everything}");

    assert!(parts.is_empty());
    assert_eq!(
        items,
        vec![Item {
            text: "{everything}".into(),
            index: 0
        }]
    );
    assert_eq!(join(&parts, &items), "{everything}");
}

#[test]
fn test_round_trip_should_hold_for_arbitrary_inputs() {
    let patterns = [
        expr(r"\{.+?\}"),
        expr(r"\d+"),
        expr("PreservedWord"),
        expr(r"\s+"),
    ];
    let texts = [
        "Hello, {firstName}. Today is {day}.",
        "order 66 was executed 2 times",
        "PreservedWord at the start, PreservedWord at the end PreservedWord",
        "   leading and trailing   ",
        "no matches here",
        "",
        "überraschung: {umlautÄÖÜ} bleibt",
    ];

    for pattern in &patterns {
        for text in &texts {
            let (parts, items) = split(pattern, text);
            assert_eq!(
                &join(&parts, &items),
                text,
                "round trip for pattern {pattern:?} over {text:?}"
            );
        }
    }
}

#[test]
fn test_split_all_round_trip_should_hold_for_stacked_patterns() {
    let patterns = [expr(r"\{.+?\}"), expr("PreservedWord"), expr(r"\d+")];
    let texts = [
        "Hello, {firstName}. Today is {day}. PreservedWord is here.",
        "{a}PreservedWord{b}12{c}",
        "PreservedWord",
        "plain text",
    ];

    for text in &texts {
        let (parts, items) = split_all(&patterns, text);
        assert_eq!(&join(&parts, &items), text, "round trip for {text:?}");
    }
}

#[test]
fn test_split_all_with_single_pattern_should_match_plain_split() {
    let pattern = expr(r"\{.+?\}");
    let text = "Hello, {firstName}. Today is {day}.";

    let (parts_a, items_a) = split(&pattern, text);
    let (parts_b, items_b) = split_all(std::slice::from_ref(&pattern), text);

    assert_eq!(parts_a, parts_b);
    assert_eq!(items_a, items_b);
}
