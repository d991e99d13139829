/// Logging setup
///
/// Everything logs through `tracing`; the binary installs a stderr
/// subscriber once at startup.

use tracing_subscriber::EnvFilter;

/// Filter directives for the given verbosity
fn filter_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,clipboard_manager={level},clipboard_manager_lib={level}")
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::new(filter_directives(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert!(filter_directives(false).contains("clipboard_manager_lib=info"));
        assert!(filter_directives(true).contains("clipboard_manager_lib=debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
