//! Log output for the `longevity` CLI. Everything goes to stderr so that
//! command output on stdout stays pipeable.
//!
//! `LONGEVITY_LOG` wins over `RUST_LOG`; both take `EnvFilter` directives,
//! e.g. `LONGEVITY_LOG=longevity_client::core::http=debug`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "LONGEVITY_LOG";

// Library and binary targets; dependencies (reqwest, hyper) stay at warn.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,longevity_client=debug,longevity=debug"
    } else {
        "warn,longevity_client=info,longevity=info"
    }
}

pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// One JSON object per event with the request fields (`method`, `url`,
/// `status`, `bytes`) at the top level, for log collectors.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_library_and_binary() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(EnvFilter::try_new(directives).is_ok());
            assert!(directives.starts_with("warn,"));
            assert!(directives.contains("longevity_client="));
            assert!(directives.contains("longevity="));
        }
        assert!(default_directives(true).contains("longevity_client=debug"));
        assert!(default_directives(false).contains("longevity_client=info"));
    }
}
