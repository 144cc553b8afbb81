//! Kernel constants. Scales are counted in decimal places.

/// Smallest scale a decimal may be demoted to.
pub const MIN_SCALE: u32 = 1;

/// Number of places dropped after every decimal `+`, `-` and `*`.
pub const ARITHMETIC_TRIM: u32 = 1;

/// Default cap on power-iteration steps per refinement call.
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000;

/// Extra decimal places added on top of the summed entry accuracies when a
/// nonnegative-image certificate must be decided.
pub const CERTIFICATE_SLACK: u32 = 2;

/// Environment variables read by [`crate::config::RefinementConfig::from_env`].
pub const ENV_LOG_HEIGHT: &str = "PERRON_LOG_HEIGHT";
pub const ENV_MAX_ITERATIONS: &str = "PERRON_MAX_ITERATIONS";
pub const ENV_MAX_TIME_MS: &str = "PERRON_MAX_TIME_MS";
pub const ENV_VERIFY_PRIMITIVE: &str = "PERRON_VERIFY_PRIMITIVE";
