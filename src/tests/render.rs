use super::{heading_level, Block, Document};
use crate::config::Config;
use crate::error::Error;
use crate::fixtures::{row, sample_rows, sample_settings};
use crate::settings::Settings;

fn sample_document() -> Document {
    Document::build(&sample_rows(), &sample_settings(), &Config::default()).unwrap()
}

#[test]
fn test_sample_blocks() {
    let document = sample_document();
    let headings = document
        .blocks
        .iter()
        .filter(|block| matches!(block, Block::Heading { .. }))
        .count();
    let images = document
        .blocks
        .iter()
        .filter(|block| matches!(block, Block::Image { .. }))
        .count();
    assert_eq!(headings, 6);
    assert_eq!(images, 1);
    assert_eq!(document.blocks.len(), 13);
    assert_eq!(
        document.blocks[1],
        Block::Heading {
            id: Some(1),
            level: 1,
            number: "1.".to_string(),
            text: "H1".to_string(),
        }
    );
}

#[test]
fn test_markdown_links_references_to_anchors() {
    let markdown = sample_document().to_markdown();
    assert!(markdown.contains("<a id=\"h7\"></a>\n## 1.1 H2\n"), "{markdown}");
    assert!(markdown.contains("<a id=\"h9\"></a>\n#### 1.1.1.1 H4\n"));
    assert!(markdown.contains(
        "section [1.1](#h7), [H2](#h7) (1.1, H2) and to section [1.1.1.1](#h9),[H4](#h9) (1.1.1.1, H4)"
    ));
    assert!(markdown.starts_with("text in front of first heading...\n\n"));
    assert!(markdown.ends_with("## 2.1 you may be encountering the relative path bug\n"));
}

#[test]
fn test_markdown_images() {
    let markdown = sample_document().to_markdown();
    assert!(markdown.contains("\n\n![](test/images/480px-Smiley.svg.png)\n\n"));
    assert!(markdown.contains(
        "Here is an image, ![](test/images/240px-Smiley.svg.png), which I am attempting"
    ));
}

#[test]
fn test_anchor_prefix_from_config() {
    let config = Config {
        anchor_prefix: "sec-".to_string(),
        ..Config::default()
    };
    let document = Document::build(&sample_rows(), &sample_settings(), &config).unwrap();
    let markdown = document.to_markdown();
    assert!(markdown.contains("<a id=\"sec-7\"></a>"));
    assert!(markdown.contains("[1.1](#sec-7)"));
}

#[test]
fn test_plain_text_substitutes_values() {
    let text = sample_document().to_plain_text();
    assert!(text.contains(
        "Text after second heading reference to section 1.1, H2 (1.1, H2) and to section 1.1.1.1,H4 (1.1.1.1, H4)"
    ));
    assert!(text.contains("\n\n1.1 H2\n\n"));
    assert!(text.contains("{test/images/240px-Smiley.svg.png}"));
}

#[test]
fn test_json_output() {
    let json = sample_document().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let blocks = value["blocks"].as_array().unwrap();
    assert_eq!(blocks[0]["type"], "paragraph");
    assert_eq!(blocks[1]["type"], "heading");
    assert_eq!(blocks[1]["number"], "1.");
    assert!(value.get("config").is_none());
}

#[test]
fn test_unknown_reference_aborts_build() {
    let settings = Settings::default();
    let rows = vec![
        row(&["1", "", "1", "1.", "Intro", ""]),
        row(&["2", "", "", "", "", "see {#3}"]),
    ];
    let result = Document::build(&rows, &settings, &Config::default());
    assert!(matches!(result, Err(Error::CrossRef { id: 3, .. })));
}

#[test]
fn test_heading_row_with_body_and_blank_rows() {
    let settings = Settings::default();
    let rows = vec![
        row(&["1", "", "2", "1.", "Intro", "Read {H1} first."]),
        row(&["", "", "", "", "", "   "]),
        row(&["x"]),
    ];
    let document = Document::build(&rows, &settings, &Config::default()).unwrap();
    assert_eq!(document.blocks.len(), 2);
    assert_eq!(
        document.to_markdown(),
        "<a id=\"h1\"></a>\n## 1. Intro\n\nRead [Intro](#h1) first.\n"
    );
}

#[test]
fn test_heading_without_id_has_no_anchor() {
    let settings = Settings::default();
    let rows = vec![row(&["", "", "1", "", "Preface", ""])];
    let document = Document::build(&rows, &settings, &Config::default()).unwrap();
    assert_eq!(document.to_markdown(), "# Preface\n");
}

#[test]
fn test_image_detection_needs_whole_body() {
    let settings = Settings::default();
    let rows = vec![
        row(&["1", "", "", "", "", " {figure.PNG} "]),
        row(&["2", "", "", "", "", "{figure.png} caption"]),
        row(&["3", "", "", "", "", "{notes.txt}"]),
    ];
    let document = Document::build(&rows, &settings, &Config::default()).unwrap();
    assert_eq!(
        document.blocks[0],
        Block::Image {
            path: "figure.PNG".to_string()
        }
    );
    assert!(matches!(document.blocks[1], Block::Paragraph { .. }));
    assert!(matches!(document.blocks[2], Block::Paragraph { .. }));
    assert_eq!(
        document.to_markdown(),
        "![](figure.PNG)\n\n![](figure.png) caption\n\n{notes.txt}\n"
    );
}

#[test]
fn test_empty_outline() {
    let document = Document::build(&[], &Settings::default(), &Config::default()).unwrap();
    assert!(document.blocks.is_empty());
    assert_eq!(document.to_markdown(), "");
}

#[test]
fn test_heading_levels_are_clamped() {
    assert_eq!(heading_level("3"), 3);
    assert_eq!(heading_level(" 2 "), 2);
    assert_eq!(heading_level(""), 1);
    assert_eq!(heading_level("0"), 1);
    assert_eq!(heading_level("9"), 6);
    assert_eq!(heading_level("deep"), 1);
}

#[test]
fn test_empty_reference_value_links_token_text() {
    let settings = Settings::default();
    let rows = vec![
        row(&["5", "", "1", "5."]),
        row(&["6", "", "", "", "", "see {H5} and {#5}"]),
    ];
    let document = Document::build(&rows, &settings, &Config::default()).unwrap();
    let markdown = document.to_markdown();
    assert!(markdown.contains("see [{H5}](#h5) and [5.](#h5)"), "{markdown}");
    assert!(document.to_plain_text().contains("see  and 5."));
}
