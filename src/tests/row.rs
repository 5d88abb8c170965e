use super::{clean_backslash_r, field, row_id};
use crate::error::Error;
use crate::fixtures::{row, sample_settings};
use crate::settings::{FieldIndex, Settings};

fn clean_row() -> Vec<String> {
    row(&[
        "6",
        "",
        "",
        "",
        "",
        "Text after second heading reference to section {#7}, {H7} (1.1, H2) and to section {#9},{H9} (1.1.1.1, H4)",
    ])
}

fn slashed_row() -> Vec<String> {
    row(&[
        "6",
        "",
        "",
        "",
        "",
        "Text after\r second heading reference\r to section {#7}, {H7} (1.1, H2) and\r to section {#9},{H9} (1.1.1.1, H4)",
    ])
}

fn with_indices(indices: Vec<FieldIndex>) -> Settings {
    Settings {
        indices_to_replace_backslash_r: Some(indices),
        ..sample_settings()
    }
}

#[test]
fn test_dont_change_if_no_indices() {
    let settings = with_indices(Vec::new());
    let cleaned = clean_backslash_r(&slashed_row(), &settings).unwrap();
    assert_eq!(cleaned, slashed_row());
}

#[test]
fn test_dont_change_if_no_index_setting() {
    let settings = Settings {
        indices_to_replace_backslash_r: None,
        ..sample_settings()
    };
    let cleaned = clean_backslash_r(&slashed_row(), &settings).unwrap();
    assert_eq!(cleaned, slashed_row());
}

#[test]
fn test_missing_replacement_without_indices_is_fine() {
    let settings = Settings::default();
    let cleaned = clean_backslash_r(&slashed_row(), &settings).unwrap();
    assert_eq!(cleaned, slashed_row());
}

#[test]
fn test_raises_if_index_but_no_paired_field() {
    let settings = Settings {
        replace_backslash_r_with: None,
        ..with_indices(vec![4.into(), 5.into()])
    };
    let result = clean_backslash_r(&slashed_row(), &settings);
    match result {
        Err(Error::Configuration { message }) => {
            assert!(message.contains("replace_backslash_r_with"), "{message}");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_raises_if_non_integer_index() {
    let settings = with_indices(vec![4.into(), FieldIndex::Invalid(serde_json::json!("a"))]);
    let result = clean_backslash_r(&slashed_row(), &settings);
    match result {
        Err(Error::Configuration { message }) => {
            assert!(message.contains("\"a\""), "{message}");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_raises_if_index_greater_than_length() {
    let settings = with_indices(vec![4.into(), 27.into()]);
    let result = clean_backslash_r(&slashed_row(), &settings);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_raises_if_index_equal_to_length() {
    let settings = with_indices(vec![6.into()]);
    let result = clean_backslash_r(&slashed_row(), &settings);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_raises_if_index_less_than_negative_length() {
    let settings = with_indices(vec![(-4).into(), (-27).into()]);
    let result = clean_backslash_r(&slashed_row(), &settings);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_error_lists_every_offending_index() {
    let settings = with_indices(vec![27.into(), 1.into(), (-27).into()]);
    let Err(Error::Configuration { message }) = clean_backslash_r(&slashed_row(), &settings)
    else {
        panic!("expected configuration error");
    };
    assert!(message.contains("27, -27"), "{message}");
}

#[test]
fn test_dont_change_clean_row() {
    let cleaned = clean_backslash_r(&clean_row(), &sample_settings()).unwrap();
    assert_eq!(cleaned, clean_row());
}

#[test]
fn test_clean_row_is_idempotent() {
    let settings = sample_settings();
    let once = clean_backslash_r(&clean_row(), &settings).unwrap();
    let twice = clean_backslash_r(&once, &settings).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_changes_backslash() {
    let cleaned = clean_backslash_r(&slashed_row(), &sample_settings()).unwrap();
    assert_ne!(cleaned, slashed_row());
    assert_eq!(
        cleaned[5],
        "Text after  second heading reference  to section {#7}, {H7} (1.1, H2) and  to section {#9},{H9} (1.1.1.1, H4)"
    );
    assert_eq!(cleaned[..5], slashed_row()[..5]);
}

#[test]
fn test_only_listed_fields_change() {
    let original = row(&["1\r", "a\rb", "c\rd"]);
    let settings = Settings {
        indices_to_replace_backslash_r: Some(vec![(-2).into()]),
        replace_backslash_r_with: Some("|".to_string()),
        ..Settings::default()
    };
    let cleaned = clean_backslash_r(&original, &settings).unwrap();
    assert_eq!(cleaned, row(&["1\r", "a|b", "c\rd"]));
}

#[test]
fn test_field_and_id_helpers() {
    let short = row(&[" 12 ", "x"]);
    assert_eq!(row_id(&short), Some(12));
    assert_eq!(field(&short, 1), "x");
    assert_eq!(field(&short, 9), "");
    assert_eq!(row_id(&row(&["", "x"])), None);
    assert_eq!(row_id(&row(&["abc"])), None);
    assert_eq!(row_id(&[]), None);
}
