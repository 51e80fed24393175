mod model_error;
mod propagation_status;
mod random;
mod solution;

pub use model_error::*;
pub(crate) use propagation_status::*;
pub use random::*;
pub use solution::*;

#[cfg(test)]
pub(crate) mod tests {
    pub(crate) use super::random::tests::TestRandom;
}
