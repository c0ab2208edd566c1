//! Subscriber setup shared by both binaries.
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity. Verbose enables
/// `debug` for the library and both binaries.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "aaxsplit=debug,remux2mp4=debug,info"
    } else {
        "info"
    }
}

/// Install the fmt subscriber on stderr. `RUST_LOG` overrides the
/// verbosity-derived default. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        assert!(default_directive(true).contains("aaxsplit=debug"));
        assert!(default_directive(true).contains("remux2mp4=debug"));
        assert_eq!(default_directive(false), "info");
        init_tracing(false);
        init_tracing(true);
    }
}
