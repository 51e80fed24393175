use crate::basic_types::PropagationStatus;
use crate::domain::Domain;
use crate::engine::PropagationContext;
use crate::model::VariableId;

/// The arithmetic operation applied by a ring propagator.
///
/// A `plus` or `mul` constraint is lowered into three ring propagators (the forward operation and
/// both of its inverses) which together narrow every participating variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RingOperation {
    Plus,
    Minus,
    Mul,
    DivBy,
}

impl RingOperation {
    pub(crate) fn name(self) -> &'static str {
        match self {
            RingOperation::Plus => "ring-plus",
            RingOperation::Minus => "ring-minus",
            RingOperation::Mul => "ring-mul",
            RingOperation::DivBy => "ring-div",
        }
    }

    /// The operation which recovers an operand from the result and the other operand.
    pub(crate) fn inverse(self) -> RingOperation {
        match self {
            RingOperation::Plus => RingOperation::Minus,
            RingOperation::Minus => RingOperation::Plus,
            RingOperation::Mul => RingOperation::DivBy,
            RingOperation::DivBy => RingOperation::Mul,
        }
    }

    pub(crate) fn apply(self, a: &Domain, b: &Domain) -> Domain {
        match self {
            RingOperation::Plus => a.plus(b),
            RingOperation::Minus => a.minus(b),
            RingOperation::Mul => a.mul(b),
            RingOperation::DivBy => a.div_by(b),
        }
    }
}

/// Narrows `c` to the values which can be obtained as `a (operation) b`.
pub(crate) fn propagate_ring(
    operation: RingOperation,
    a: VariableId,
    b: VariableId,
    c: VariableId,
    context: &mut PropagationContext,
) -> PropagationStatus {
    let supported = operation.apply(context.domain(a), context.domain(b));
    let narrowed = context.domain(c).intersection(&supported);
    context.set_domain(c, narrowed)
}
