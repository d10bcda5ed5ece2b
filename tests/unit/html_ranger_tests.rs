/*!
 * Tests for the HTML ranger.
 *
 * Expected ranges are byte offsets into the input, computed from the raw
 * token lengths the tokenizer reports.
 */

use crate::common::{drain_ranger, range};
use textweave::html_ranger;
use textweave::text::Range;

const ATTR_INPUT: &str = r#"<p alt="An alternate description.">A paragraph with an <img alt="An alternate description." src="/path/to/image.png">, goodbye.</p>"#;

#[tokio::test]
async fn test_html_ranger_should_report_tag_free_text_as_one_range() {
    let input = "This is a paragraph without tags.\n\tThis is another paragraph without tags.";
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(0, 74)]);
}

#[tokio::test]
async fn test_html_ranger_should_use_byte_offsets_for_multibyte_text() {
    let input = "Ein Absatz mit Umlauten äöü.\n\tNoch ein Absatz mit Umläuten.";
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(0, input.len())]);
    assert_eq!(input.len(), 63);
}

#[tokio::test]
async fn test_html_ranger_should_report_paragraph_text_nodes() {
    let input = "<p>This is a paragraph.</p>\n<p>This is another paragraph.</p>";
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(3, 23), range(31, 57)]);
    assert_eq!(&input[3..23], "This is a paragraph.");
    assert_eq!(&input[31..57], "This is another paragraph.");
}

#[tokio::test]
async fn test_html_ranger_should_report_span_text_nodes() {
    let input = "<span>This is a span.</span>\n<span>This is another span.</span>";
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(6, 21), range(35, 56)]);
}

#[tokio::test]
async fn test_html_ranger_should_ignore_attributes_without_selectors() {
    let input = r#"<p attr1="I'm an attribute." attr2="Me too!">I am a paragraph.</p>"#;
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(45, 62)]);
    assert_eq!(&input[45..62], "I am a paragraph.");
}

#[tokio::test]
async fn test_html_ranger_should_skip_comments_and_doctype() {
    let input = "<!DOCTYPE html><!-- a comment --><p>Text.</p>";
    let (ranges, err) = drain_ranger(&html_ranger(), input).await;

    assert!(err.is_none());
    assert_eq!(ranges.len(), 1);
    let r = ranges[0];
    assert_eq!(&input[r.start..r.end], "Text.");
}

#[tokio::test]
async fn test_with_attribute_should_scope_selection_to_the_given_tags() {
    let ranger = html_ranger().with_attribute("alt", &["img"]);
    let (ranges, err) = drain_ranger(&ranger, ATTR_INPUT).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(35, 55), range(65, 90), range(117, 127)]);
    assert_eq!(&ATTR_INPUT[65..90], "An alternate description.");
}

#[tokio::test]
async fn test_with_attribute_should_apply_to_all_tags_when_unscoped() {
    let ranger = html_ranger().with_attribute("alt", &[]).with_attribute("src", &[]);
    let (ranges, err) = drain_ranger(&ranger, ATTR_INPUT).await;

    assert!(err.is_none());
    assert_eq!(
        ranges,
        vec![
            range(8, 33),
            range(35, 55),
            range(65, 90),
            range(97, 115),
            range(117, 127),
        ]
    );
    assert_eq!(&ATTR_INPUT[97..115], "/path/to/image.png");
}

#[tokio::test]
async fn test_with_attribute_should_merge_multiple_selections() {
    let ranger = html_ranger()
        .with_attribute("alt", &["img", "p"])
        .with_attribute("src", &["img"]);
    let (ranges, err) = drain_ranger(&ranger, ATTR_INPUT).await;

    assert!(err.is_none());
    assert_eq!(
        ranges,
        vec![
            range(8, 33),
            range(35, 55),
            range(65, 90),
            range(97, 115),
            range(117, 127),
        ]
    );
}

#[tokio::test]
async fn test_with_attribute_fn_should_see_the_tag_name() {
    let ranger = html_ranger().with_attribute_fn(|token| {
        if token.name == "img" {
            vec!["alt".to_string()]
        } else {
            Vec::new()
        }
    });
    let (ranges, err) = drain_ranger(&ranger, ATTR_INPUT).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(35, 55), range(65, 90), range(117, 127)]);
}

#[tokio::test]
async fn test_with_attribute_path_should_behave_like_a_scoped_selector() {
    let ranger = html_ranger().with_attribute_path("img.alt").unwrap();
    let (ranges, err) = drain_ranger(&ranger, ATTR_INPUT).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(35, 55), range(65, 90), range(117, 127)]);
}

#[tokio::test]
async fn test_html_ranger_should_handle_self_closing_tags() {
    let input = r#"<p>Before <img alt="A picture." src="/p.png"/> after.</p>"#;
    let ranger = html_ranger().with_attribute("alt", &["img"]);
    let (ranges, err) = drain_ranger(&ranger, input).await;

    assert!(err.is_none());
    let texts: Vec<&str> = ranges
        .iter()
        .map(|r: &Range| &input[r.start..r.end])
        .collect();
    assert_eq!(texts, vec!["Before ", "A picture.", " after."]);
}

#[tokio::test]
async fn test_scenario_title_attribute_and_text() {
    let input = r#"<p title="A title tag.">Hello.</p>"#;
    let ranger = html_ranger().with_attribute_path("p.title").unwrap();
    let (ranges, err) = drain_ranger(&ranger, input).await;

    assert!(err.is_none());
    assert_eq!(ranges, vec![range(10, 22), range(24, 30)]);
    assert_eq!(&input[10..22], "A title tag.");
    assert_eq!(&input[24..30], "Hello.");
}
