//! Demo service resolving its settings from flags, environment and defaults.
//!
//! ```sh
//! SERVICE_PORT=8080 SERVICE_PEERS=10.0.0.1,10.0.0.2 \
//!     RUST_LOG=envbind=debug cargo run --example service -- --timeout 1m30s
//! ```

use std::io::{self, Write};
use std::net::IpAddr;
use std::time::Duration;

use envbind::{Binder, BindResult, Target};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Clone, Debug, Default, Deserialize)]
struct Limits {
    requests: u32,
    burst: u32,
}

fn main() -> BindResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let port = Target::new(80_u16);
    let timeout = Target::new(Duration::from_secs(5));
    let peers: Target<Vec<IpAddr>> = Target::default();
    let upstream: Target<Option<Url>> = Target::default();
    let verbose = Target::new(false);
    let limits = Target::new(Limits {
        requests: 100,
        burst: 10,
    });

    let mut binder = Binder::new();
    binder
        .var(&port)
        .with_flag_usage("port to listen on")
        .bind("SERVICE_PORT", "port")?;
    binder
        .var(&timeout)
        .with_default(Duration::from_secs(30))
        .with_flag_usage("request timeout, e.g. 30s or 1m30s")
        .bind("SERVICE_TIMEOUT", "timeout")?;
    binder
        .var(&peers)
        .with_flag_usage("peer addresses, comma separated or repeated")
        .bind("SERVICE_PEERS", "peer")?;
    binder
        .var(&upstream)
        .with_flag_usage("optional upstream URL")
        .bind("SERVICE_UPSTREAM", "upstream")?;
    binder.bind_var(&verbose, "SERVICE_VERBOSE", "verbose", "log every request")?;
    binder
        .var_json(&limits)
        .with_flag_usage("rate limits as JSON")
        .bind("SERVICE_LIMITS", "limits")?;
    binder.parse()?;

    let limits = limits.get();
    let summary = format!(
        "port={} timeout={:?} peers={:?} upstream={} verbose={} limits={}/{}\n",
        port.get(),
        timeout.get(),
        peers.get(),
        upstream.get().map_or_else(|| "-".to_owned(), String::from),
        verbose.get(),
        limits.requests,
        limits.burst,
    );
    if let Err(err) = io::stdout().lock().write_all(summary.as_bytes()) {
        tracing::error!(%err, "failed to write summary");
    }
    Ok(())
}
