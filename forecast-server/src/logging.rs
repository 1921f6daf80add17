//! Subscriber setup. Logs go to stderr so `forecast show` output stays clean.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `format` is `"text"` or `"json"`;
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}
