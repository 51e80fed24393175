use crate::basic_types::PropagationStatus;
use crate::domain::Domain;
use crate::engine::PropagationContext;
use crate::model::VariableId;

/// A binary comparison between two variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Relation {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Relation {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Relation::Eq => "eq",
            Relation::Neq => "neq",
            Relation::Lt => "lt",
            Relation::Lte => "lte",
            Relation::Gt => "gt",
            Relation::Gte => "gte",
        }
    }

    /// The relation which holds exactly when `self` does not.
    pub(crate) fn negate(self) -> Relation {
        match self {
            Relation::Eq => Relation::Neq,
            Relation::Neq => Relation::Eq,
            Relation::Lt => Relation::Gte,
            Relation::Gte => Relation::Lt,
            Relation::Lte => Relation::Gt,
            Relation::Gt => Relation::Lte,
        }
    }

    /// Whether no pair of values of `a` and `b` can satisfy the relation.
    pub(crate) fn is_rejected(self, a: &Domain, b: &Domain) -> bool {
        if a.is_empty() || b.is_empty() {
            return true;
        }
        match self {
            Relation::Eq => !a.intersects(b),
            Relation::Neq => match (a.solved_value(), b.solved_value()) {
                (Some(value_a), Some(value_b)) => value_a == value_b,
                _ => false,
            },
            Relation::Lt => a.min() >= b.max(),
            Relation::Lte => a.min() > b.max(),
            Relation::Gt => Relation::Lt.is_rejected(b, a),
            Relation::Gte => Relation::Lte.is_rejected(b, a),
        }
    }

    /// Narrows `a` and `b` such that every remaining value has a support in the other domain
    /// (for `neq` only once one of the two is fixed).
    pub(crate) fn propagate(
        self,
        a: VariableId,
        b: VariableId,
        context: &mut PropagationContext,
    ) -> PropagationStatus {
        match self {
            Relation::Eq => {
                let intersection = context.domain(a).intersection(context.domain(b));
                context.set_domain(a, intersection.clone())?;
                context.set_domain(b, intersection)
            }
            Relation::Neq => {
                if let Some(value) = context.domain(a).solved_value() {
                    let narrowed = context.domain(b).remove_value(value);
                    context.set_domain(b, narrowed)?;
                }
                if let Some(value) = context.domain(b).solved_value() {
                    let narrowed = context.domain(a).remove_value(value);
                    context.set_domain(a, narrowed)?;
                }
                Ok(())
            }
            Relation::Lt => {
                let upper_bound_b = context.domain(b).max();
                let narrowed_a = context.domain(a).remove_above(upper_bound_b - 1);
                context.set_domain(a, narrowed_a)?;

                let lower_bound_a = context.domain(a).min();
                let narrowed_b = context.domain(b).remove_below(lower_bound_a + 1);
                context.set_domain(b, narrowed_b)
            }
            Relation::Lte => {
                let upper_bound_b = context.domain(b).max();
                let narrowed_a = context.domain(a).remove_above(upper_bound_b);
                context.set_domain(a, narrowed_a)?;

                let lower_bound_a = context.domain(a).min();
                let narrowed_b = context.domain(b).remove_below(lower_bound_a);
                context.set_domain(b, narrowed_b)
            }
            Relation::Gt => Relation::Lt.propagate(b, a, context),
            Relation::Gte => Relation::Lte.propagate(b, a, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestContext;

    #[test]
    fn eq_intersects_both_sides() {
        let mut test = TestContext::new([Domain::range(0, 5), Domain::range(3, 9)]);

        let status = test.run(|context, [a, b]| Relation::Eq.propagate(a, b, context));

        assert!(status.is_ok());
        assert_eq!(test.domain(0), &Domain::range(3, 5));
        assert_eq!(test.domain(1), &Domain::range(3, 5));
        assert_eq!(test.changed(), vec![0, 1]);
    }

    #[test]
    fn neq_waits_until_a_side_is_fixed() {
        let mut test = TestContext::new([Domain::range(0, 5), Domain::range(3, 9)]);

        let status = test.run(|context, [a, b]| Relation::Neq.propagate(a, b, context));

        assert!(status.is_ok());
        assert!(test.changed().is_empty());
    }

    #[test]
    fn neq_removes_the_fixed_value() {
        let mut test = TestContext::new([Domain::range(0, 5), Domain::value(3)]);

        let status = test.run(|context, [a, b]| Relation::Neq.propagate(a, b, context));

        assert!(status.is_ok());
        assert_eq!(test.domain(0), &Domain::from_values([0, 1, 2, 4, 5]));
    }

    #[test]
    fn neq_with_equal_fixed_values_is_inconsistent() {
        let mut test = TestContext::new([Domain::value(3), Domain::value(3)]);

        let status = test.run(|context, [a, b]| Relation::Neq.propagate(a, b, context));

        assert!(status.is_err());
    }

    #[test]
    fn lt_tightens_bounds() {
        let mut test = TestContext::new([Domain::range(1, 99), Domain::range(0, 50)]);

        let status = test.run(|context, [a, b]| Relation::Lt.propagate(a, b, context));

        assert!(status.is_ok());
        assert_eq!(test.domain(0), &Domain::range(1, 49));
        assert_eq!(test.domain(1), &Domain::range(2, 50));
    }

    #[test]
    fn gt_against_zero_removes_zero() {
        let mut test = TestContext::new([Domain::range(0, 99), Domain::value(0)]);

        let status = test.run(|context, [a, b]| Relation::Gt.propagate(a, b, context));

        assert!(status.is_ok());
        assert_eq!(test.domain(0), &Domain::range(1, 99));
    }

    #[test]
    fn lt_with_zero_upper_bound_is_inconsistent() {
        let mut test = TestContext::new([Domain::range(0, 5), Domain::value(0)]);

        let status = test.run(|context, [a, b]| Relation::Lt.propagate(a, b, context));

        assert!(status.is_err());
    }

    #[test]
    fn lte_keeps_equal_values() {
        let mut test = TestContext::new([Domain::range(4, 9), Domain::range(0, 4)]);

        let status = test.run(|context, [a, b]| Relation::Lte.propagate(a, b, context));

        assert!(status.is_ok());
        assert_eq!(test.domain(0), &Domain::value(4));
        assert_eq!(test.domain(1), &Domain::value(4));
    }

    #[test]
    fn negation_pairs() {
        for relation in [
            Relation::Eq,
            Relation::Neq,
            Relation::Lt,
            Relation::Lte,
            Relation::Gt,
            Relation::Gte,
        ] {
            assert_eq!(relation.negate().negate(), relation);
        }
        assert_eq!(Relation::Lt.negate(), Relation::Gte);
    }

    #[test]
    fn rejection_predicates() {
        let low = Domain::range(0, 3);
        let high = Domain::range(3, 6);

        assert!(!Relation::Eq.is_rejected(&low, &high));
        assert!(Relation::Eq.is_rejected(&Domain::range(0, 2), &high));
        assert!(!Relation::Lt.is_rejected(&low, &high));
        assert!(Relation::Lt.is_rejected(&Domain::value(3), &Domain::value(3)));
        assert!(!Relation::Lte.is_rejected(&Domain::value(3), &Domain::value(3)));
        assert!(Relation::Gt.is_rejected(&low, &Domain::range(3, 4)));
        assert!(Relation::Neq.is_rejected(&Domain::value(2), &Domain::value(2)));
        assert!(!Relation::Neq.is_rejected(&Domain::range(2, 3), &Domain::value(2)));
    }
}
