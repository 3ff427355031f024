//! Tests for failure rendering and policy dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;
use test_helpers::output::SharedBuffer;

use super::*;
use crate::error::ParseError;
use crate::parsers::parse_int;

fn port_failure(origin: Source) -> ParseFailure {
    let error = parse_int::<u16>("http").err().map_or_else(
        || ParseError::custom("unexpected success"),
        |err| err,
    );
    ParseFailure::new(origin, "http", "u16", Some("PORT"), Some("port"), error)
}

fn reporter(policy: ErrorPolicy) -> (Reporter, SharedBuffer, ExitRecorder) {
    let output = SharedBuffer::new();
    let exits = ExitRecorder::new();
    let mut reporter = Reporter::new();
    reporter.set_policy(policy);
    reporter.set_output(Box::new(output.clone()));
    reporter.set_terminator(Box::new(exits.clone()));
    (reporter, output, exits)
}

#[rstest]
#[case(Source::Environment, "unable to parse env-variable \"PORT\" as type u16")]
#[case(Source::Flag, "unable to parse flag \"port\" as type u16")]
fn failure_names_the_source(#[case] origin: Source, #[case] expected: &str) {
    let failure = port_failure(origin);
    assert_eq!(failure.to_string(), expected);
    assert_eq!(failure.raw(), "http");
    assert!(std::error::Error::source(&failure).is_some());
}

#[test]
fn exit_policy_writes_then_exits_with_two() {
    let (mut reporter, output, exits) = reporter(ErrorPolicy::Exit);
    reporter.report(&port_failure(Source::Environment));
    assert_eq!(
        output.contents(),
        "unable to parse env-variable \"PORT\" as type u16\n"
    );
    assert_eq!(exits.codes(), vec![FAILURE_EXIT_CODE]);
}

#[test]
fn log_and_continue_writes_without_exiting() {
    let (mut reporter, output, exits) = reporter(ErrorPolicy::LogAndContinue);
    reporter.report(&port_failure(Source::Flag));
    assert_eq!(
        output.contents(),
        "unable to parse flag \"port\" as type u16\n"
    );
    assert!(exits.codes().is_empty());
}

#[test]
fn ignore_is_silent() {
    let (mut reporter, output, exits) = reporter(ErrorPolicy::Ignore);
    reporter.report(&port_failure(Source::Flag));
    assert!(output.contents().is_empty());
    assert!(exits.last().is_none());
}

#[test]
fn custom_handler_sees_every_failure() {
    let calls = std::sync::Arc::new(AtomicUsize::new(0));
    let seen = std::sync::Arc::clone(&calls);
    let (mut reporter, output, _) = reporter(ErrorPolicy::custom(move |failure| {
        assert_eq!(failure.env_name(), Some("PORT"));
        seen.fetch_add(1, Ordering::SeqCst);
    }));
    reporter.report(&port_failure(Source::Environment));
    reporter.report(&port_failure(Source::Flag));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(output.contents().is_empty());
}

#[test]
fn policies_debug_without_handlers() {
    assert_eq!(format!("{:?}", ErrorPolicy::default()), "Exit");
    assert_eq!(
        format!("{:?}", ErrorPolicy::custom(|_| {})),
        "Custom(<handler>)"
    );
}
