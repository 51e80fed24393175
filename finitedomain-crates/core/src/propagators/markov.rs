use crate::basic_types::PropagationStatus;
use crate::branching::value_selection::MarkovOptions;
use crate::domain::Domain;
use crate::engine::PropagationContext;
use crate::model::VariableId;

/// Rejects a fixed Markov variable whose value has no positive weight in the active row.
pub(crate) fn propagate_markov(
    variable: VariableId,
    options: &MarkovOptions,
    context: &mut PropagationContext,
) -> PropagationStatus {
    let Some(value) = context.domain(variable).solved_value() else {
        return Ok(());
    };

    let weight = options.weight_of(value, context.domain(variable), |guard| {
        context.domain(guard).is_value(1)
    });
    if weight > 0.0 {
        Ok(())
    } else {
        context.set_domain(variable, Domain::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::MarkovRow;
    use crate::engine::test_helper::TestContext;

    #[test]
    fn unfixed_variables_are_left_alone() {
        let options = MarkovOptions::new([1, 2], [MarkovRow::new([0.0, 1.0])]);
        let mut test = TestContext::new([Domain::range(1, 2)]);

        let status = test.run(|context, [x]| propagate_markov(x, &options, context));

        assert!(status.is_ok());
        assert!(test.changed().is_empty());
    }

    #[test]
    fn zero_weight_value_is_rejected() {
        let options = MarkovOptions::new([1, 2], [MarkovRow::new([0.0, 1.0])]);
        let mut test = TestContext::new([Domain::value(1)]);

        let status = test.run(|context, [x]| propagate_markov(x, &options, context));

        assert!(status.is_err());
    }

    #[test]
    fn positive_weight_value_is_accepted() {
        let options = MarkovOptions::new([1, 2], [MarkovRow::new([0.0, 1.0])]);
        let mut test = TestContext::new([Domain::value(2)]);

        let status = test.run(|context, [x]| propagate_markov(x, &options, context));

        assert!(status.is_ok());
    }

    #[test]
    fn padded_values_use_the_expansion_weight() {
        let options =
            MarkovOptions::new([1], [MarkovRow::new([1.0])]).expand_vectors_with(0.0);
        let mut test = TestContext::new([Domain::value(5)]);

        let status = test.run(|context, [x]| propagate_markov(x, &options, context));

        assert!(status.is_err());
    }
}
