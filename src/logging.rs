use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber for the command-line tools.
///
/// Logs go to standard error so that they never mix with program output.
/// `RUST_LOG` takes precedence; otherwise the filter follows the number of
/// `-v` flags.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                  EnvFilter::new(directive_for_verbosity(verbosity))
                                              }))
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .init();
}

/// Maps a `-v` count to a log filter directive for this crate.
#[must_use]
pub const fn directive_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "core_interp=warn",
        1 => "core_interp=debug",
        _ => "core_interp=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "core_interp=warn");
        assert_eq!(directive_for_verbosity(1), "core_interp=debug");
        assert_eq!(directive_for_verbosity(2), "core_interp=trace");
        assert_eq!(directive_for_verbosity(9), "core_interp=trace");
    }

    #[test]
    fn directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(directive_for_verbosity(verbosity)).is_ok());
        }
    }
}
