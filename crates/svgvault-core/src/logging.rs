use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber. Output goes to stderr so command
/// output on stdout stays machine-readable. `RUST_LOG` overrides the default
/// `info` level. Calling this more than once is harmless.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
