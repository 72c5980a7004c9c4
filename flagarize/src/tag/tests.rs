//! Tests for annotation parsing.

use rstest::rstest;

use super::{FieldMeta, Tag, parse_tag};
use crate::error::{ErrorCategory, FlagarizeError};

fn field(ident: &'static str, annotation: &'static str) -> FieldMeta {
    FieldMeta::new(ident, "bool", 0)
        .with_annotation(annotation)
        .exported()
}

fn tag(name: &str, help: &str) -> Tag {
    Tag {
        name: name.to_owned(),
        help: help.to_owned(),
        ..Tag::default()
    }
}

#[rstest]
fn absent_annotation_yields_no_tag() {
    let meta = FieldMeta::new("no_tag", "bool", 0).exported();
    assert!(matches!(parse_tag(&meta, Some("help"), "|"), Ok(None)));
}

#[rstest]
#[case::pipe("|")]
#[case::comma(",")]
fn parses_valid_annotations(#[case] sep: &str) {
    let cases: Vec<(&'static str, String, Option<&str>, Tag)> = vec![
        ("noName", "help=help".into(), None, tag("no_name", "help")),
        ("noName2", format!("name={sep}help=help"), None, tag("no_name2", "help")),
        (
            "simple",
            format!("name=case1{sep}help=help"),
            Some("this help should not be used, it was already specified."),
            tag("case1", "help"),
        ),
        (
            "complexHelp",
            "name=case2a".into(),
            Some("Some runtime evaluated help in flagarize."),
            tag("case2a", "Some runtime evaluated help in flagarize."),
        ),
        (
            "complexHelp1",
            format!("name=case2b{sep}help="),
            Some("Some runtime evaluated help2 in flagarize."),
            tag("case2b", "Some runtime evaluated help2 in flagarize."),
        ),
        (
            "hidden",
            format!("name=case3{sep}help=help{sep}hidden=true"),
            None,
            Tag { hidden: true, ..tag("case3", "help") },
        ),
        (
            "required",
            format!("name=case4{sep}help=help{sep}required=true"),
            None,
            Tag { required: true, ..tag("case4", "help") },
        ),
        (
            "defaultValue",
            format!("name=case5{sep}help=help{sep}default=some default value ms 2213"),
            None,
            Tag {
                default_value: Some("some default value ms 2213".into()),
                ..tag("case5", "help")
            },
        ),
        (
            "envVar",
            format!("name=case6{sep}help=help{sep}envvar=SOME_ENVVAR"),
            None,
            Tag { env_name: Some("SOME_ENVVAR".into()), ..tag("case6", "help") },
        ),
        (
            "short",
            format!("name=case7{sep}help=help{sep}short=l"),
            None,
            Tag { short: Some('l'), ..tag("case7", "help") },
        ),
        (
            "placeHolder",
            format!("name=case8{sep}help=help{sep}placeholder=<something>"),
            None,
            Tag { placeholder: Some("<something>".into()), ..tag("case8", "help") },
        ),
    ];

    for (ident, annotation, help_var, expected) in cases {
        let meta = FieldMeta::new(ident, "bool", 0)
            .with_annotation(Box::leak(annotation.into_boxed_str()))
            .exported();
        let parsed = parse_tag(&meta, help_var, sep);
        assert!(
            matches!(&parsed, Ok(Some(actual)) if *actual == expected),
            "{ident}: expected {expected:?}, got {parsed:?}"
        );
    }
}

#[rstest]
fn parses_every_key_at_once() {
    let meta = field(
        "all",
        "name=case9|help=help|hidden=true|required=true|default=some|envvar=LOL|short=z|placeholder=<something2>",
    );
    let expected = Tag {
        name: "case9".into(),
        help: "help".into(),
        hidden: true,
        required: true,
        default_value: Some("some".into()),
        env_name: Some("LOL".into()),
        short: Some('z'),
        placeholder: Some("<something2>".into()),
        elem_separator: None,
    };
    let parsed = parse_tag(&meta, None, "|");
    assert!(
        matches!(&parsed, Ok(Some(actual)) if *actual == expected),
        "got {parsed:?}"
    );
}

#[rstest]
#[case::empty("wrong_no_help1", "", "")]
#[case::bare_word("wrong_format1", "wrong", "wrong")]
#[case::only_separator("wrong_format2", "|", "")]
#[case::trailing_separator("wrong_format3", "help=|", "")]
#[case::bare_word_after_valid("wrong_format5", "name=...|help=help|wrongformat", "wrongformat")]
fn rejects_segments_without_values(
    #[case] ident: &'static str,
    #[case] annotation: &'static str,
    #[case] fragment: &str,
) {
    let err = parse_tag(&field(ident, annotation), None, "|");
    assert!(
        matches!(&err, Err(FlagarizeError::TagFormat { field, fragment: f }) if field == ident && f == fragment),
        "got {err:?}"
    );
    assert!(matches!(&err, Err(e) if e.category() == ErrorCategory::TagGrammar));
}

#[rstest]
fn rejects_unknown_keys() {
    let err = parse_tag(
        &field("wrong_format4", "name=...|help=help|nonexistingfield="),
        None,
        "|",
    );
    assert!(
        matches!(&err, Err(FlagarizeError::UnknownKey { key, separator, .. }) if key == "nonexistingfield" && separator == "|"),
        "got {err:?}"
    );
}

#[rstest]
#[case::empty_help("wrong_no_help3", "help=")]
#[case::hidden_required("wrong_no_help6", "name=...|hidden=true|required=true")]
fn requires_help_text(#[case] ident: &'static str, #[case] annotation: &'static str) {
    let err = parse_tag(&field(ident, annotation), None, "|");
    let expected_var = format!("{ident}_help");
    assert!(
        matches!(&err, Err(FlagarizeError::MissingHelp { field, help_var }) if field == ident && *help_var == expected_var),
        "got {err:?}"
    );
    let message = err.map(|_| ()).map_err(|e| e.to_string());
    assert_eq!(
        message,
        Err(format!(
            "no help=<help> in annotation for field \"{ident}\" and no help var; help=<help> or \"{ident}_help\" is required for help/usage of the flag"
        ))
    );
}

#[rstest]
fn empty_help_var_does_not_count() {
    let err = parse_tag(&field("quiet", "name=quiet"), Some(""), "|");
    assert!(matches!(err, Err(FlagarizeError::MissingHelp { .. })));
}

#[rstest]
fn rejects_lowercase_env_names() {
    let err = parse_tag(
        &field("env_var_wrong", "name=case6|help=help|envvar=lowerCASEnotallowed"),
        None,
        "|",
    );
    assert!(
        matches!(&err, Err(e) if e.to_string() == "environment variable name has to be upper case, but it's not \"lowerCASEnotallowed\" for field \"env_var_wrong\""),
        "got {err:?}"
    );
    assert!(matches!(&err, Err(e) if e.category() == ErrorCategory::TagSemantic));
}

#[rstest]
#[case::too_long("tooLong")]
#[case::empty("")]
fn rejects_invalid_shorts(#[case] value: &str) {
    let annotation = format!("name=...|help=help|short={value}");
    let meta = field("short_wrong", Box::leak(annotation.into_boxed_str()));
    let err = parse_tag(&meta, None, "|");
    assert!(
        matches!(&err, Err(FlagarizeError::InvalidShort { value: v, .. }) if v == value),
        "got {err:?}"
    );
}

#[rstest]
fn rejects_non_boolean_literals() {
    let err = parse_tag(&field("flag", "help=help|hidden=maybe"), None, "|");
    assert!(
        matches!(&err, Err(FlagarizeError::InvalidBool { key: "hidden", value, .. }) if value == "maybe"),
        "got {err:?}"
    );
}

#[rstest]
#[case("hidden=TRUE", true)]
#[case("hidden=1", true)]
#[case("hidden=F", false)]
#[case("hidden", true)]
fn accepts_boolean_spellings(#[case] segment: &str, #[case] expected: bool) {
    let annotation = format!("help=help|{segment}");
    let meta = field("flag", Box::leak(annotation.into_boxed_str()));
    let parsed = parse_tag(&meta, None, "|");
    assert!(
        matches!(&parsed, Ok(Some(t)) if t.hidden == expected),
        "got {parsed:?}"
    );
}

#[rstest]
fn bare_required_keyword_is_a_shortcut() {
    let parsed = parse_tag(&field("flag", "help=help|required"), None, "|");
    assert!(matches!(parsed, Ok(Some(t)) if t.required && !t.hidden));
}

#[rstest]
fn explicit_help_wins_over_help_var() {
    let parsed = parse_tag(&field("flag", "help=explicit"), Some("from help var"), "|");
    assert!(matches!(parsed, Ok(Some(t)) if t.help == "explicit"));
}

#[rstest]
fn last_repeated_key_wins() {
    let parsed = parse_tag(&field("flag", "name=first|help=help|name=second"), None, "|");
    assert!(matches!(parsed, Ok(Some(t)) if t.name == "second"));
}

#[rstest]
fn parsing_is_deterministic() {
    let meta = field("listenAddress", "help=help|short=l");
    let first = parse_tag(&meta, None, "|").ok().flatten();
    let second = parse_tag(&meta, None, "|").ok().flatten();
    assert_eq!(first, second);
    assert_eq!(first.map(|t| t.name), Some("listen_address".to_owned()));
}

#[rstest]
fn honours_multi_character_separators() {
    let parsed = parse_tag(&field("flag", "name=x;;help=a|b"), None, ";;");
    assert!(matches!(parsed, Ok(Some(t)) if t.name == "x" && t.help == "a|b"));
}

#[rstest]
fn field_meta_keeps_its_position() {
    const META: FieldMeta = FieldMeta::new("port", "u16", 3)
        .with_annotation("help=Port.")
        .exported();
    assert_eq!(META.index(), 3);
    assert_eq!(META.help_var_name(), "port_help");
}
