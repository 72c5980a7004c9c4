//! Tests for the clap-backed registrar.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::*;
use crate::error::{ErrorCategory, is_display_request};
use crate::registrar::Flag;

#[rstest]
fn rejects_duplicate_names() -> Result<()> {
    let (mut a, mut b) = (String::new(), String::new());
    let mut app = App::new("test");
    Flag::new(&mut app, "name", "First.").string_var(&mut a)?;
    let err = Flag::new(&mut app, "name", "Second.").string_var(&mut b);
    ensure!(
        matches!(&err, Err(FlagarizeError::DuplicateFlag { name }) if name == "name"),
        "unexpected result: {err:?}"
    );
    Ok(())
}

#[rstest]
#[case::taken('x')]
#[case::reserved('h')]
fn rejects_duplicate_shorts(#[case] short: char) -> Result<()> {
    let (mut a, mut b) = (String::new(), String::new());
    let mut app = App::new("test");
    Flag::new(&mut app, "first", "First.").short('x').string_var(&mut a)?;
    let err = Flag::new(&mut app, "second", "Second.")
        .short(short)
        .string_var(&mut b);
    ensure!(
        matches!(&err, Err(FlagarizeError::DuplicateShort { short: s, .. }) if *s == short),
        "unexpected result: {err:?}"
    );
    ensure!(err.is_err_and(|e| e.category() == ErrorCategory::Registration));
    Ok(())
}

#[rstest]
fn rejects_reserved_help_name() {
    let mut flag = false;
    let mut app = App::new("test");
    let err = Flag::new(&mut app, "help", "Nope.").bool_var(&mut flag);
    assert!(matches!(err, Err(FlagarizeError::DuplicateFlag { .. })));
}

#[rstest]
fn keeps_prepopulated_values_when_absent() -> Result<()> {
    let mut name = String::from("preset");
    let mut on = true;
    let mut app = App::new("test");
    Flag::new(&mut app, "name", "Name.").string_var(&mut name)?;
    Flag::new(&mut app, "on", "On.").bool_var(&mut on)?;
    app.parse_from(["test"])?;
    ensure!(name == "preset");
    ensure!(on);
    Ok(())
}

#[rstest]
fn applies_annotation_defaults() -> Result<()> {
    let mut port = 0_u16;
    let mut on = false;
    let mut app = App::new("test");
    Flag::new(&mut app, "port", "Port.")
        .default_value("8080")
        .parsed_var(&mut port)?;
    Flag::new(&mut app, "on", "On.")
        .default_value("true")
        .bool_var(&mut on)?;
    app.parse_from(["test"])?;
    ensure!(port == 8080);
    ensure!(on);
    Ok(())
}

#[rstest]
fn last_single_occurrence_wins() -> Result<()> {
    let mut level = 0_i32;
    let mut app = App::new("test");
    Flag::new(&mut app, "level", "Level.").parsed_var(&mut level)?;
    app.parse_from(["test", "--level", "1", "--level", "-3"])?;
    ensure!(level == -3);
    Ok(())
}

#[rstest]
fn reports_invalid_values_with_flag_name() {
    let mut port = 0_u16;
    let mut app = App::new("test");
    let registered = Flag::new(&mut app, "port", "Port.").parsed_var(&mut port);
    assert!(registered.is_ok());
    let err = app.parse_from(["test", "--port=http"]);
    assert!(
        matches!(&err, Err(FlagarizeError::InvalidValue { flag, value, .. }) if flag == "port" && value == "http"),
        "unexpected result: {err:?}"
    );
}

#[rstest]
fn missing_required_flag_is_a_parse_error() {
    let mut name = String::new();
    let mut app = App::new("test");
    let registered = Flag::new(&mut app, "name", "Name.")
        .required(true)
        .string_var(&mut name);
    assert!(registered.is_ok());
    let err = app.parse_from(["test"]);
    assert!(matches!(&err, Err(FlagarizeError::CliParsing(_))));
    assert!(err.is_err_and(|e| !is_display_request(&e)));
}

#[rstest]
fn help_request_is_recognised() {
    let app = App::new("test");
    let err = app.parse_from(["test", "--help"]);
    assert!(err.is_err_and(|e| is_display_request(&e)));
}

#[rstest]
fn help_lists_flags_with_placeholders() -> Result<()> {
    let (mut listen, mut secret) = (String::new(), String::new());
    let mut app = App::new("test");
    Flag::new(&mut app, "listen", "Address to listen on.")
        .short('l')
        .placeholder("<addr>")
        .string_var(&mut listen)?;
    Flag::new(&mut app, "secret", "Hidden value.")
        .hidden(true)
        .string_var(&mut secret)?;
    let help = app.render_help();
    ensure!(help.contains("-l, --listen <addr>"), "help was: {help}");
    ensure!(help.contains("Address to listen on."));
    ensure!(!help.contains("--secret"));
    let names: Vec<_> = app.flags().map(|f| f.name.as_str()).collect();
    ensure!(names == ["listen", "secret"]);
    Ok(())
}
