use layerpost_core::{ArgValue, Line, ParseError};

#[test]
fn test_parse_simple_move() {
    let line = Line::parse("G1 X10 Y5.5 E2 ;perimeter").unwrap();
    assert_eq!(line.code(), "G1");
    assert_eq!(line.arg('X'), Some(ArgValue::Int(10)));
    assert_eq!(line.arg('Y'), Some(ArgValue::Float(5.5)));
    assert_eq!(line.arg('E'), Some(ArgValue::Int(2)));
    assert_eq!(line.comment(), Some("perimeter"));
    assert_eq!(line.unlabeled(), None);
}

#[test]
fn test_format_normalizes_whitespace() {
    let line = Line::parse("G1    X10  Y5").unwrap();
    assert_eq!(line.to_string(), "G1 X10 Y5");
}

#[test]
fn test_int_float_distinction_survives_format() {
    let line = Line::parse("G1 X5 Y5.0").unwrap();
    assert_eq!(line.to_string(), "G1 X5 Y5.0");

    let again = Line::parse(&line.to_string()).unwrap();
    assert_eq!(again.arg('X'), Some(ArgValue::Int(5)));
    assert_eq!(again.arg('Y'), Some(ArgValue::Float(5.0)));
}

#[test]
fn test_semantic_round_trip() {
    let sources = [
        "G1 X10 Y5.5 E2",
        "G0   F9000    Z.5",
        "G28 ;home all",
        "M104 S200",
        "G92 E0 ;reset extruder",
        "M117 Ready to print",
    ];
    for source in sources {
        let parsed = Line::parse(source).unwrap();
        let reparsed = Line::parse(&parsed.to_string()).unwrap();
        assert_eq!(parsed, reparsed, "round trip diverged for {:?}", source);
    }
}

#[test]
fn test_m117_payload_kept_verbatim() {
    let line = Line::parse("M117 Hello World").unwrap();
    assert_eq!(line.code(), "M117");
    assert_eq!(line.unlabeled(), Some("Hello World"));
    assert_eq!(line.args().count(), 0);

    // Internal spacing is part of the message.
    let line = Line::parse("M117 Hello   World").unwrap();
    assert_eq!(line.unlabeled(), Some("Hello   World"));
    assert_eq!(line.to_string(), "M117 Hello   World");
}

#[test]
fn test_m117_without_payload() {
    let line = Line::parse("M117").unwrap();
    assert_eq!(line.unlabeled(), None);
    assert_eq!(line.to_string(), "M117");
}

#[test]
fn test_bare_token_lands_in_unlabeled_slot() {
    let line = Line::parse("T0 1").unwrap();
    assert_eq!(line.code(), "T0");
    assert_eq!(line.unlabeled(), Some("1"));
    assert_eq!(line.to_string(), "T0 1");
}

#[test]
fn test_malformed_argument_is_fatal_and_carries_line() {
    let err = Line::parse("G1 X10 Yabc").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedArgument {
            token: "Yabc".to_string(),
            line: "G1 X10 Yabc".to_string(),
        }
    );

    // A bare letter has no numeric remainder at all.
    assert!(Line::parse("G1 X").is_err());
}

#[test]
fn test_missing_code() {
    assert_eq!(
        Line::parse("").unwrap_err(),
        ParseError::MissingCode {
            line: "".to_string()
        }
    );
    assert!(matches!(
        Line::parse("   ;only a comment").unwrap_err(),
        ParseError::MissingCode { .. }
    ));
}

#[test]
fn test_comment_split_at_first_semicolon() {
    let line = Line::parse("G1 X5 ;move; fast").unwrap();
    assert_eq!(line.comment(), Some("move; fast"));
    assert_eq!(line.to_string(), "G1 X5 ;move; fast");
}

#[test]
fn test_raw_text_is_preserved_for_diagnostics() {
    let line = Line::parse("G1    X10 ;odd spacing").unwrap();
    assert_eq!(line.raw(), "G1    X10 ;odd spacing");
}
