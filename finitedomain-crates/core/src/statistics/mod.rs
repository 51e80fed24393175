//! Writing of search statistics as `{prefix} {name}={value}` lines.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called; the configuration
//! is global and can only be set once per process.
mod statistic_logging;

pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;
