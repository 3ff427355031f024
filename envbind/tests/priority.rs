//! Precedence of flags over environment variables over defaults.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use anyhow::{Result, ensure};
use envbind::{Binder, Bindable, ErrorPolicy, ExitRecorder, MapEnv, Target};
use rstest::rstest;
use url::Url;

fn quiet_binder(env: MapEnv) -> Binder {
    Binder::with_program("svc")
        .with_env_source(env)
        .with_error_policy(ErrorPolicy::LogAndContinue)
        .with_output(std::io::sink())
        .with_terminator(ExitRecorder::new())
}

/// Bind `target` with `default`, optionally feeding `env` and `flag`.
fn resolve<T>(default: T, env: Option<&str>, flag: Option<&str>) -> Result<T>
where
    T: Bindable + Clone,
{
    let vars = env.map(|raw| ("VALUE", raw)).into_iter().collect::<MapEnv>();
    let mut binder = quiet_binder(vars);
    let target = Target::new(default.clone());
    binder.var(&target).with_default(default).bind("VALUE", "value")?;
    let mut args = vec!["svc".to_owned()];
    if let Some(raw) = flag {
        args.push(format!("--value={raw}"));
    }
    binder.try_parse_from(args)?;
    Ok(target.get())
}

#[rstest]
#[case(None, None, 80)]
#[case(Some("8080"), None, 8080)]
#[case(Some("8080"), Some("443"), 443)]
#[case(None, Some("443"), 443)]
fn integer_precedence(
    #[case] env: Option<&str>,
    #[case] flag: Option<&str>,
    #[case] expected: i64,
) -> Result<()> {
    ensure!(resolve(80_i64, env, flag)? == expected);
    Ok(())
}

#[rstest]
#[case(None, None, "5s")]
#[case(Some("1m"), None, "1m")]
#[case(Some("1m"), Some("1h30m"), "1h30m")]
fn duration_precedence(
    #[case] env: Option<&str>,
    #[case] flag: Option<&str>,
    #[case] expected: &str,
) -> Result<()> {
    let expected = envbind::parsers::parse_duration(expected)?;
    ensure!(resolve(Duration::from_secs(5), env, flag)? == expected);
    Ok(())
}

#[rstest]
#[case(None, None, "default")]
#[case(Some("from-env"), None, "from-env")]
#[case(Some("from-env"), Some("from-flag"), "from-flag")]
#[case(Some(""), None, "")]
fn string_precedence(
    #[case] env: Option<&str>,
    #[case] flag: Option<&str>,
    #[case] expected: &str,
) -> Result<()> {
    ensure!(resolve("default".to_owned(), env, flag)? == expected);
    Ok(())
}

#[test]
fn port_scenario_prefers_the_flag() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new().with("PORT", "8080"));
    let port = Target::new(0_u16);
    binder
        .var(&port)
        .with_default(80)
        .with_flag_usage("listen port")
        .bind("PORT", "port")?;
    ensure!(port.get() == 8080, "environment applies at bind time");
    binder.try_parse_from(["svc", "--port", "443"])?;
    ensure!(port.get() == 443);
    Ok(())
}

#[rstest]
#[case("0")]
#[case("-0")]
fn zero_is_a_real_value(#[case] raw: &str) -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new().with("WORKERS", raw));
    let workers = Target::new(0_i32);
    binder.var(&workers).with_default(8).bind_env("WORKERS")?;
    ensure!(workers.get() == 0);

    let mut binder = quiet_binder(MapEnv::new());
    let debug = Target::new(true);
    binder.var(&debug).bind_flag("debug")?;
    binder.try_parse_from(["svc", "--debug=false"])?;
    ensure!(!debug.get());
    Ok(())
}

#[test]
fn optional_targets_stay_absent() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let timeout: Target<Option<Duration>> = Target::default();
    let address: Target<Option<IpAddr>> = Target::default();
    binder.var(&timeout).bind("TIMEOUT", "timeout")?;
    binder.var(&address).bind("ADDRESS", "address")?;
    binder.try_parse_from(["svc", "--address", "10.56.2.138"])?;
    ensure!(timeout.get().is_none());
    ensure!(
        address.get() == Some(IpAddr::V4(Ipv4Addr::new(10, 56, 2, 138)))
    );
    Ok(())
}

#[test]
fn url_flags_expose_their_parts() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let home = Target::new(Url::parse("http://localhost/")?);
    binder.var(&home).bind_flag("home")?;
    binder.try_parse_from(["svc", "--home", "https://app.my-domain.com/home"])?;
    let home = home.get();
    ensure!(home.scheme() == "https");
    ensure!(home.host_str() == Some("app.my-domain.com"));
    ensure!(home.path() == "/home");
    Ok(())
}

#[test]
fn bind_var_keeps_the_current_value_as_default() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let retries = Target::new(3_u8);
    binder.bind_var(&retries, "RETRIES", "retries", "retry budget")?;
    ensure!(retries.get() == 3);
    ensure!(binder.usage().contains("retry budget"));
    binder.set_flag("retries", "7")?;
    ensure!(retries.get() == 7);
    Ok(())
}

#[test]
fn repeated_scalar_flags_keep_the_last_value() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let level = Target::new(0_u32);
    binder.var(&level).bind_flag("level")?;
    binder.try_parse_from(["svc", "--level", "1", "--level=2"])?;
    ensure!(level.get() == 2);
    Ok(())
}

#[test]
fn negative_numbers_are_flag_values() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let offset = Target::new(0_i64);
    binder.var(&offset).bind_flag("offset")?;
    binder.try_parse_from(["svc", "--offset", "-5"])?;
    ensure!(offset.get() == -5);
    Ok(())
}

#[test]
fn operands_follow_the_flags() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new().with("PORT", "8080"));
    let port = Target::new(0_u16);
    binder.var(&port).with_default(80).bind("PORT", "port")?;
    ensure!(binder.args().is_empty());
    binder.try_parse_from(["svc", "--port", "443", "input.txt"])?;
    ensure!(port.get() == 443);
    ensure!(binder.args() == ["input.txt"]);
    Ok(())
}

#[test]
fn flags_after_an_operand_are_operands() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new());
    let port = Target::new(80_u16);
    binder.var(&port).bind_flag("port")?;
    binder.try_parse_from(["svc", "input.txt", "--port", "443"])?;
    ensure!(port.get() == 80);
    ensure!(binder.args() == ["input.txt", "--port", "443"]);
    Ok(())
}

#[test]
fn relative_urls_are_rejected() -> Result<()> {
    let mut binder = quiet_binder(MapEnv::new().with("HOME_URL", "/home"));
    let home: Target<Option<Url>> = Target::default();
    binder.var(&home).bind_env("HOME_URL")?;
    ensure!(home.get().is_none());
    Ok(())
}
