use crate::domain::Domain;
use crate::engine::Space;
use crate::model::VariableId;

pub(super) fn select_lower_half_first(
    variable: VariableId,
    space: &mut Space,
    choice: u8,
) -> Option<Domain> {
    match choice {
        0 => {
            let middle = cache_middle(variable, space);
            Some(space.domain(variable).remove_above(middle))
        }
        1 => {
            let middle = space.last_chosen_value?;
            Some(space.domain(variable).remove_below(middle + 1))
        }
        _ => None,
    }
}

pub(super) fn select_upper_half_first(
    variable: VariableId,
    space: &mut Space,
    choice: u8,
) -> Option<Domain> {
    match choice {
        0 => {
            let middle = cache_middle(variable, space);
            Some(space.domain(variable).remove_below(middle + 1))
        }
        1 => {
            let middle = space.last_chosen_value?;
            Some(space.domain(variable).remove_above(middle))
        }
        _ => None,
    }
}

/// The middle of the range of the domain, rounded down; the lower half ends at this value.
fn cache_middle(variable: VariableId, space: &mut Space) -> i32 {
    let domain = space.domain(variable);
    let middle = domain.min() + (domain.max() - domain.min()) / 2;
    space.last_chosen_value = Some(middle);
    middle
}
