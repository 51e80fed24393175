use crate::domain::Domain;
use crate::engine::Space;
use crate::model::VariableId;

pub(super) fn select_min(variable: VariableId, space: &mut Space, choice: u8) -> Option<Domain> {
    select_value_then_remove(variable, space, choice, Domain::min)
}

pub(super) fn select_max(variable: VariableId, space: &mut Space, choice: u8) -> Option<Domain> {
    select_value_then_remove(variable, space, choice, Domain::max)
}

pub(super) fn select_mid(variable: VariableId, space: &mut Space, choice: u8) -> Option<Domain> {
    select_value_then_remove(variable, space, choice, Domain::middle_element)
}

/// Fixes the variable to the picked value on choice 0 and removes that value on choice 1.
fn select_value_then_remove(
    variable: VariableId,
    space: &mut Space,
    choice: u8,
    pick: impl Fn(&Domain) -> i32,
) -> Option<Domain> {
    match choice {
        0 => {
            let value = pick(space.domain(variable));
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
