use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `filter`, which wins
/// over the verbosity default.
pub fn init_logger(verbose: bool, json: bool, filter: Option<&str>) {
    let fallback = match (filter, verbose) {
        (Some(directives), _) => directives.to_string(),
        (None, true) => "xrr=debug,xrr_cli=debug,info".to_string(),
        (None, false) => "xrr=info,xrr_cli=info,warn".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(filter);
    // stdout carries command output, so logs go to stderr
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
