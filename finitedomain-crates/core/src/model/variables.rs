use crate::basic_types::ModelError;
use crate::containers::StorageKey;

/// The identity of a variable of a [`Config`](crate::model::Config); it is the index of the
/// variable in declaration order.
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct VariableId {
    pub id: u32,
}

impl VariableId {
    pub fn new(id: u32) -> Self {
        VariableId { id }
    }
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId { id: index as u32 }
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

/// Checks the shape of a user supplied variable name; uniqueness is checked by the
/// [`Config`](crate::model::Config) itself.
///
/// Purely numeric names are rejected since operands which look like numbers are interpreted as
/// literals.
pub(crate) fn check_variable_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::EmptyName);
    }
    if is_numeric(name) {
        return Err(ModelError::NumericName(name.to_owned()));
    }
    Ok(())
}

fn is_numeric(name: &str) -> bool {
    let digits = name.strip_prefix('-').unwrap_or(name);
    !digits.is_empty() && digits.chars().all(|character| character.is_ascii_digit())
}
