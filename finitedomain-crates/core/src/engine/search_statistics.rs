use crate::statistics::log_statistic;

/// Statistics gathered while exploring the search tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatistics {
    /// The number of spaces which have been propagated (including the root)
    pub num_spaces: u64,
    /// The number of spaces which turned out to be inconsistent
    pub num_rejected: u64,
    /// The number of times a propagator has been run
    pub num_propagations: u64,
    /// The number of solutions which have been reported
    pub num_solutions: u64,
    /// The largest number of spaces on the search stack at the same time
    pub peak_depth: u64,
}

impl SearchStatistics {
    /// Logs the statistics through [`log_statistic`]; nothing is written unless statistic
    /// logging has been configured.
    pub fn log(&self) {
        log_statistic("spaces", self.num_spaces);
        log_statistic("rejectedSpaces", self.num_rejected);
        log_statistic("propagations", self.num_propagations);
        log_statistic("solutions", self.num_solutions);
        log_statistic("peakDepth", self.peak_depth);
    }
}
