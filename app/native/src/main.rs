//! Switchbar command-line entry point.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    init_tracing();

    if let Err(err) = switchbar_lib::cli::run() {
        eprintln!("switchbar: {err}");
        std::process::exit(1);
    }
}

/// Installs the log subscriber.
///
/// `SWITCHBAR_LOG` takes precedence over `RUST_LOG`; without either, only
/// `info` and above are shown.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SWITCHBAR_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
