pub(crate) mod hooks;
mod propagation;
mod search;
mod search_statistics;
mod space;
#[cfg(test)]
pub(crate) mod test_helper;

pub use hooks::PropagationHook;
pub use hooks::SearchHooks;
pub(crate) use propagation::*;
pub(crate) use search::*;
pub use search_statistics::SearchStatistics;
pub use space::Space;
