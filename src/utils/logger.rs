use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "COUNT_PROTEINS_LOG";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "count_proteins=debug,info"
    } else {
        "count_proteins=info"
    }
}

/// Picks the first parseable filter from `candidates`, else the default.
pub fn filter_directives<I>(verbose: bool, candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|directives| EnvFilter::try_new(directives).is_ok())
        .unwrap_or_else(|| default_directives(verbose).to_string())
}

pub fn init_cli_logger(verbose: bool) {
    let directives = filter_directives(
        verbose,
        [
            std::env::var(LOG_ENV_VAR).ok(),
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        ],
    );

    // stdout carries the report lines; Skyline shows captured stderr as plain text
    let stderr_is_terminal = std::io::stderr().is_terminal();
    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(stderr_is_terminal)
                .with_target(false)
                .compact(),
        )
        .init();
}
