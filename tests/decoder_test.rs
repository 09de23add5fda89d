use wernicke::{BuiltinScheme, CanonicalRule, DecoderError, TagDecoder};
use std::sync::Arc;
use std::thread;

fn setup_test_decoder() -> TagDecoder {
    TagDecoder::builder()
        .with_scheme(BuiltinScheme::ChartQueries)
        .unwrap()
        .add_rule(CanonicalRule::new("PLOT_TYPE", "scatter", "scatter"))
        .unwrap()
        .build()
        .expect("Failed to create decoder")
}

#[test]
fn test_end_to_end_decoding() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    let tokens = ["Show", "me", "a", "##scatter", "##plot", "of", "Price", "vs", "Time"];
    let tags = [0, 0, 0, 1, 2, 0, 3, 0, 5];

    let entities = decoder.decode(&tokens, &tags)?;

    assert_eq!(entities.len(), 3);
    assert_eq!(entities["PLOT_TYPE"], "scatter");
    assert_eq!(entities["X_AXIS_LABEL"], "Price");
    assert_eq!(entities["Y_AXIS_LABEL"], "Time");
    Ok(())
}

#[test]
fn test_outside_tokens_contribute_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    // Everything except "bar" is outside
    let entities = decoder.decode(&["please", "draw", "a", "bar", "now"], &[0, 0, 0, 1, 0])?;

    assert_eq!(entities.len(), 1);
    assert_eq!(entities["PLOT_TYPE"], "bar");
    Ok(())
}

#[test]
fn test_word_starts_fuse_without_separator() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = TagDecoder::builder()
        .with_scheme(BuiltinScheme::ChartQueries)
        .unwrap()
        .build()?;

    // Two word-start tokens of the same category become one fused string
    let entities = decoder.decode(&["Bar", "Chart"], &[3, 4])?;
    assert_eq!(entities["X_AXIS_LABEL"], "BarChart");

    // Two Begin tags of one category fuse the same way as Begin + Inside
    let entities = decoder.decode(&["Bar", "Chart"], &[3, 3])?;
    assert_eq!(entities["X_AXIS_LABEL"], "BarChart");
    Ok(())
}

#[test]
fn test_continuation_marker_stripped() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    // "scatter" + "##plot" accumulates to "scatterplot" before the rule fires
    let entities = decoder.decode(&["scatter", "##plot"], &[1, 2])?;

    assert_eq!(entities["PLOT_TYPE"], "scatter");
    Ok(())
}

#[test]
fn test_canonicalization_is_case_insensitive_substring() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    for token in ["Scatterplot", "SCATTER", "a_scatter_chart"] {
        let entities = decoder.decode(&[token], &[1])?;
        assert_eq!(entities["PLOT_TYPE"], "scatter");
    }

    // A non-matching value passes through unchanged
    let entities = decoder.decode(&["bar"], &[1])?;
    assert_eq!(entities["PLOT_TYPE"], "bar");
    Ok(())
}

#[test]
fn test_brackets_stripped_from_every_category() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    let tokens = ["bar", "Revenue", "(", "USD", ")", "<Time>"];
    let tags = [1, 3, 4, 4, 4, 5];

    let entities = decoder.decode(&tokens, &tags)?;

    assert_eq!(entities["PLOT_TYPE"], "bar");
    assert_eq!(entities["X_AXIS_LABEL"], "RevenueUSD");
    assert_eq!(entities["Y_AXIS_LABEL"], "Time");
    Ok(())
}

#[test]
fn test_trailing_bracket_stripped_after_merge() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    // "bar" + ")" accumulates to "bar)" and the bracket is removed last
    let entities = decoder.decode(&["bar", ")"], &[1, 2])?;

    assert_eq!(entities["PLOT_TYPE"], "bar");
    Ok(())
}

#[test]
fn test_absent_category_is_omitted() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    let entities = decoder.decode(&["bar", "Time"], &[1, 5])?;

    assert!(!entities.contains_key("X_AXIS_LABEL"));
    assert_eq!(entities.len(), 2);
    Ok(())
}

#[test]
fn test_missing_required_category_fails() {
    let decoder = setup_test_decoder();

    // No token is tagged PLOT_TYPE, which the scatter rule requires
    let result = decoder.decode(&["Price", "Time"], &[3, 5]);

    match result {
        Err(DecoderError::MissingRequiredCategory(category)) => {
            assert_eq!(category, "PLOT_TYPE");
        }
        other => panic!("Expected MissingRequiredCategory, got {:?}", other),
    }
}

#[test]
fn test_length_mismatch_fails() {
    let decoder = setup_test_decoder();

    let result = decoder.decode(&["bar", "chart"], &[1]);

    assert!(matches!(
        result,
        Err(DecoderError::MalformedInput { tokens: 2, tags: 1 })
    ));
}

#[test]
fn test_unknown_label_index_fails() {
    let decoder = setup_test_decoder();

    let result = decoder.decode(&["bar"], &[7]);

    assert!(matches!(
        result,
        Err(DecoderError::UnknownLabelIndex { index: 7, domain: 7 })
    ));
}

#[test]
fn test_custom_continuation_marker() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = TagDecoder::builder()
        .with_scheme(BuiltinScheme::ChartQueries)?
        .with_continuation_marker("@@")
        .build()?;

    let entities = decoder.decode(&["Temp", "@@erature", "##x"], &[3, 4, 4])?;

    // "##" is an ordinary token prefix under a "@@" marker
    assert_eq!(entities["X_AXIS_LABEL"], "Temperature##x");
    Ok(())
}

#[test]
fn test_custom_bracket_chars() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = TagDecoder::builder()
        .with_scheme(BuiltinScheme::ChartQueries)?
        .with_bracket_chars("|".chars())
        .build()?;

    let entities = decoder.decode(&["|Price|", "(Time)"], &[3, 5])?;

    assert_eq!(entities["X_AXIS_LABEL"], "Price");
    // Parentheses survive once they leave the configured set
    assert_eq!(entities["Y_AXIS_LABEL"], "(Time)");
    Ok(())
}

#[test]
fn test_owned_token_strings_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let decoder = setup_test_decoder();

    let tokens: Vec<String> = vec!["scatter".to_string(), "##plot".to_string()];
    let entities = decoder.decode(&tokens, &[1, 2])?;

    assert_eq!(entities["PLOT_TYPE"], "scatter");
    Ok(())
}

#[test]
fn test_thread_safety() {
    let decoder = Arc::new(setup_test_decoder());
    let mut handles = vec![];

    for _ in 0..3 {
        let decoder = Arc::clone(&decoder);
        let handle = thread::spawn(move || {
            let result = decoder.decode(&["scatter", "Price"], &[1, 3]);
            assert!(result.is_ok());
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
