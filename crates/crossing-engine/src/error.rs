//! Error types for the crossing engine binary.

/// Top-level error for the engine binary.
///
/// Wraps every failure that can happen during startup or the run so
/// `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crossing_core::config::ConfigError,
    },

    /// The frame loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: crossing_core::runner::RunnerError,
    },
}
