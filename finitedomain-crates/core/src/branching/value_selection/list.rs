use super::select_value;
use super::ValueStrategy;
use crate::basic_types::Random;
use crate::domain::Domain;
use crate::engine::Space;
use crate::model::VariableId;

/// Tries the first value of `values` which is in the domain, delegating both choices to
/// `fallback` if the domain contains none of them.
pub(super) fn select_from_list(
    values: &[i32],
    fallback: &ValueStrategy,
    variable: VariableId,
    space: &mut Space,
    choice: u8,
    random: &mut dyn Random,
) -> Option<Domain> {
    // The domain of a space does not change between its choices, so the list applies to choice 1
    // exactly when it applied to choice 0.
    let Some(value) = space.domain(variable).first_intersecting_value(values) else {
        return select_value(fallback, variable, space, choice, random);
    };

    match choice {
        0 => {
            space.last_chosen_value = Some(value);
            Some(Domain::value(value))
        }
        1 => {
            let value = space.last_chosen_value?;
            Some(space.domain(variable).remove_value(value))
        }
        _ => None,
    }
}
