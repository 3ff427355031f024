//! Tests for flag registration and command-line ordering.

use std::sync::Arc;

use anyhow::{Result, ensure};
use parking_lot::Mutex;
use rstest::rstest;

use super::*;
use crate::dispatch::Bindable;

type Log = Arc<Mutex<Vec<String>>>;

fn recording(name: &str, kind: Option<ValueKind>, log: &Log) -> FlagSpec {
    let log = Arc::clone(log);
    let tag = name.to_owned();
    FlagSpec::new(
        name,
        "test flag",
        kind,
        Box::new(move |raw: &str| -> FlagResult {
            log.lock().push(format!("{tag}={raw}"));
            Ok(())
        }),
    )
}

#[rstest]
#[case("")]
#[case("-port")]
#[case("listen port")]
#[case("port=1")]
#[case("help")]
fn rejects_unusable_names(#[case] name: &str) {
    let flags = FlagSet::new("demo");
    assert!(matches!(
        flags.check(name),
        Err(BindError::InvalidFlagName { .. })
    ));
}

#[test]
fn rejects_duplicates_and_late_registration() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", None, &log))?;
    ensure!(matches!(
        flags.register(recording("port", None, &log)),
        Err(BindError::DuplicateFlag { .. })
    ));
    flags.parse_from(["demo"], |_| {})?;
    ensure!(matches!(
        flags.register(recording("host", None, &log)),
        Err(BindError::BoundAfterParse { .. })
    ));
    ensure!(matches!(
        flags.parse_from(["demo"], |_| {}),
        Err(BindError::AlreadyParsed)
    ));
    Ok(())
}

#[test]
fn callbacks_run_in_command_line_order() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("a", None, &log))?;
    flags.register(recording("b", None, &log))?;
    flags.parse_from(["demo", "--b", "1", "--a=2", "--b", "-3"], |_| {})?;
    ensure!(*log.lock() == ["b=1", "a=2", "b=-3"]);
    Ok(())
}

#[rstest]
#[case(&["demo", "--debug"], "debug=true")]
#[case(&["demo", "--debug=false"], "debug=false")]
fn bool_flags_are_switches(#[case] args: &[&str], #[case] expected: &str) -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("debug", Some(<bool as Bindable>::KIND), &log))?;
    flags.parse_from(args.iter().copied(), |_| {})?;
    ensure!(*log.lock() == [expected]);
    Ok(())
}

#[test]
fn unknown_arguments_are_cli_errors() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", None, &log))?;
    let err = flags.parse_from(["demo", "--colour", "red"], |_| {});
    ensure!(matches!(&err, Err(BindError::CliParsing(_))));
    ensure!(err.err().map(|e| e.exit_code()) == Some(2));
    ensure!(log.lock().is_empty());
    Ok(())
}

#[test]
fn set_reaches_registered_callbacks_only() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", None, &log))?;
    ensure!(flags.set("port", "8080")?.is_ok());
    ensure!(matches!(
        flags.set("host", "x"),
        Err(BindError::UnknownFlag { .. })
    ));
    ensure!(*log.lock() == ["port=8080"]);
    Ok(())
}

#[test]
fn usage_lists_flags_with_value_names() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", Some(<u16 as Bindable>::KIND), &log))?;
    let usage = flags.render_usage();
    ensure!(usage.contains("--port <UINT>"), "usage was {usage}");
    ensure!(usage.contains("test flag"));
    Ok(())
}

#[rstest]
#[case(&["demo", "--port", "443", "input.txt"], &["port=443"], &["input.txt"])]
#[case(&["demo", "in", "--port", "443"], &[], &["in", "--port", "443"])]
#[case(&["demo", "--port=1", "--", "--port"], &["port=1"], &["--port"])]
#[case(&["demo", "--port", "443"], &["port=443"], &[])]
fn operands_end_flag_parsing(
    #[case] args: &[&str],
    #[case] applied: &[&str],
    #[case] operands: &[&str],
) -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", None, &log))?;
    flags.parse_from(args.iter().copied(), |_| {})?;
    let seen = log.lock().clone();
    ensure!(seen == applied, "applied {seen:?}");
    ensure!(
        flags.operands() == operands,
        "operands {:?}",
        flags.operands()
    );
    Ok(())
}

#[test]
fn operands_stay_out_of_usage() -> Result<()> {
    let log = Log::default();
    let mut flags = FlagSet::new("demo");
    flags.register(recording("port", None, &log))?;
    let usage = flags.render_usage();
    ensure!(!usage.contains("operands"), "usage was {usage}");
    Ok(())
}
