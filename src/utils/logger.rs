use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "snuffles=info,tower_http=info,warn";
const VERBOSE_DIRECTIVES: &str = "snuffles=debug,tower_http=debug,info";

/// Filter directives used when `RUST_LOG` is not set.
pub fn directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbose)))
}

/// Compact or JSON formatting into `writer`. Each event is written straight
/// through, nothing is held back in a buffer.
pub fn subscriber<W>(
    filter: EnvFilter,
    json: bool,
    ansi: bool,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer.clone())
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .json() // one object per line for the platform log collector
    });
    let compact_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(compact_layer)
}

/// Human readable logs on stdout.
pub fn init_logger(verbose: bool) {
    subscriber(
        default_filter(verbose),
        false,
        std::io::stdout().is_terminal(),
        std::io::stdout,
    )
    .init();
}

pub fn init_json_logger(verbose: bool) {
    subscriber(default_filter(verbose), true, false, std::io::stdout).init();
}

/// Logs on stderr, for tools whose stdout carries their output.
pub fn init_stderr_logger(verbose: bool) {
    subscriber(
        default_filter(verbose),
        false,
        std::io::stderr().is_terminal(),
        std::io::stderr,
    )
    .init();
}

pub fn init(verbose: bool, json: bool) {
    if json {
        init_json_logger(verbose);
    } else {
        init_logger(verbose);
    }
}
