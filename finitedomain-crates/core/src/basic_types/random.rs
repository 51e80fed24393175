use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

use crate::fd_assert_moderate;

/// Abstraction for randomness, in order to swap out different source of randomness.
///
/// The solver never reaches for a global generator; the source is passed in through
/// [`SolverOptions`](crate::options::SolverOptions) and handed to the value selection strategies
/// which need it (currently the Markov strategy).
///
/// # Testing
/// The test implementation of this trait returns scripted choices, which allows deterministic test
/// cases for code which makes use of an implementation of the [`Random`] trait.
pub trait Random: Debug {
    /// Generate a random float in the range 0..1.
    fn generate_f64(&mut self) -> f64;

    /// Given a slice of weights, select the index with `weight` weighted probability compared to
    /// the other weights.
    ///
    /// Returns [`None`] if there are no weights or if all of them are zero.
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use finitedomain_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// // The middle element can never be selected
    /// let selected = rng.get_weighted_choice(&[1.0, 0.0, 3.0]);
    /// assert!(matches!(selected, Some(0) | Some(2)));
    /// ```
    fn get_weighted_choice(&mut self, weights: &[f64]) -> Option<usize>;
}

// We provide a blanket implementation of the trait for any type which implements `SeedableRng`,
// `Rng` and `Debug` to ensure that we can use any "regular" random generator where we expect an
// implementation of Random.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn get_weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        fd_assert_moderate!(
            weights.iter().all(|weight| weight.is_finite() && *weight >= 0.0),
            "Weights should be finite and non-negative: {weights:?}"
        );

        let sum = weights.iter().sum::<f64>();
        if weights.is_empty() || sum <= 0.0 {
            return None;
        }

        let spin = self.generate_f64() * sum;

        let mut accumulated_weight = 0.0;
        let mut last_positive = None;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            accumulated_weight += weight;
            last_positive = Some(index);
            if spin < accumulated_weight {
                return Some(index);
            }
        }

        // Rounding can leave the spin just above the accumulated weights
        last_positive
    }
}
