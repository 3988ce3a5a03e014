use crate::interpreter::tree::DEFAULT_CAPACITY;

/// Settings for one interpreter run.
///
/// Built by the command-line driver from its arguments; library users can
/// start from [`Config::default`] and override single fields.
///
/// # Example
/// ```
/// use core_interp::config::Config;
///
/// let config = Config { max_nodes: 50,
///                       ..Config::default() };
/// assert!(config.print);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nodes in the syntax tree.
    pub max_nodes: usize,
    /// Whether to write the pretty-printed program and a blank line before
    /// executing it.
    pub print:     bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_nodes: DEFAULT_CAPACITY,
               print:     true, }
    }
}
