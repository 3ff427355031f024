//! Tests for binding builders and finalisation.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::*;
use crate::env::MapEnv;
use crate::error::BindError;
use crate::parsers::decoders;
use crate::policy::{ErrorPolicy, ExitRecorder};

fn binder(env: MapEnv) -> Binder {
    Binder::with_program("test")
        .with_env_source(env)
        .with_error_policy(ErrorPolicy::Ignore)
        .with_terminator(ExitRecorder::new())
}

#[rstest]
#[case(short_type_name::<u16>(), "u16")]
#[case(short_type_name::<String>(), "String")]
#[case(short_type_name::<Vec<Target<u8>>>(), "Vec<Target<u8>>")]
#[case(short_type_name::<Option<MapEnv>>(), "Option<MapEnv>")]
#[case(short_type_name::<(u8, String)>(), "(u8, String)")]
fn type_names_drop_module_paths(#[case] name: String, #[case] expected: &str) {
    assert_eq!(name, expected);
}

#[test]
fn target_value_is_the_implicit_default() -> Result<()> {
    let mut binder = binder(MapEnv::new());
    let port = Target::new(8080_u16);
    binder.var(&port).bind("PORT", "port")?;
    ensure!(port.get() == 8080);
    Ok(())
}

#[test]
fn explicit_default_overwrites_target() -> Result<()> {
    let mut binder = binder(MapEnv::new());
    let port = Target::new(1_u16);
    binder.var(&port).with_default(80).bind_env("PORT")?;
    ensure!(port.get() == 80);
    Ok(())
}

#[test]
fn empty_names_disable_sources() -> Result<()> {
    let mut binder = binder(MapEnv::new().with("PORT", "9"));
    let port = Target::new(1_u16);
    binder.var(&port).bind("", "")?;
    ensure!(port.get() == 1);
    ensure!(!binder.usage().contains("--port"));
    Ok(())
}

#[test]
fn per_binding_options_override_settings() -> Result<()> {
    let env = MapEnv::new()
        .with("KEYS", "0a0b|ff")
        .with("DAY", "2025-03-07");
    let mut binder = binder(env);
    let keys: Target<Vec<Vec<u8>>> = Target::default();
    let day: Target<Option<chrono::DateTime<chrono::Utc>>> = Target::default();
    binder
        .var(&keys)
        .with_slice_separator("|")
        .with_string_decoder(decoders::hex)
        .bind_env("KEYS")?;
    binder.var(&day).with_time_layout("%Y-%m-%d").bind_env("DAY")?;
    ensure!(keys.get() == vec![vec![0x0a, 0x0b], vec![0xff]]);
    ensure!(
        day.get().map(|d| d.to_rfc3339()).as_deref() == Some("2025-03-07T00:00:00+00:00")
    );
    Ok(())
}

#[test]
fn custom_bindings_replace_on_repeat() -> Result<()> {
    let mut binder = binder(MapEnv::new());
    let words: Target<Vec<String>> = Target::default();
    binder
        .var_func(&words, |raw: &str| {
            Ok(raw.split_whitespace().map(str::to_owned).collect())
        })
        .with_default(vec!["none".to_owned()])
        .with_flag_usage("words")
        .bind_flag("words")?;
    binder.try_parse_from(["test", "--words", "a b", "--words", "c"])?;
    ensure!(words.get() == ["c"]);
    Ok(())
}

#[test]
fn duplicate_env_names_are_rejected() -> Result<()> {
    let mut binder = binder(MapEnv::new());
    let a = Target::new(0_i32);
    let b = Target::new(0_i32);
    binder.var(&a).bind_env("SHARED")?;
    let err = binder.var(&b).bind("SHARED", "b");
    ensure!(matches!(err, Err(BindError::DuplicateEnv { .. })));
    ensure!(
        !binder.usage().contains("--b"),
        "failed binding registered a flag"
    );
    Ok(())
}

#[test]
fn duplicate_flag_leaves_target_untouched() -> Result<()> {
    let mut binder = binder(MapEnv::new().with("B", "7"));
    let a = Target::new(0_i32);
    let b = Target::new(0_i32);
    binder.var(&a).bind_flag("count")?;
    let err = binder.var(&b).with_default(5).bind("B", "count");
    ensure!(matches!(err, Err(BindError::DuplicateFlag { .. })));
    ensure!(b.get() == 0);
    Ok(())
}
