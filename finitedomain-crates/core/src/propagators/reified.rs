use super::Relation;
use crate::basic_types::PropagationStatus;
use crate::engine::PropagationContext;
use crate::model::VariableId;

/// Propagates `result <-> relation(a, b)`, where the domain of `result` is a subset of `[0, 1]`.
///
/// Once `result` is fixed the relation (or its negation) is enforced on the operands; otherwise
/// `result` is fixed as soon as one of the two directions can no longer hold.
pub(crate) fn propagate_reified(
    relation: Relation,
    a: VariableId,
    b: VariableId,
    result: VariableId,
    context: &mut PropagationContext,
) -> PropagationStatus {
    let result_domain = context.domain(result);

    if result_domain.is_value(1) {
        return relation.propagate(a, b, context);
    }
    if result_domain.is_value(0) {
        return relation.negate().propagate(a, b, context);
    }

    if relation.is_rejected(context.domain(a), context.domain(b)) {
        let narrowed = context.domain(result).remove_value(1);
        context.set_domain(result, narrowed)
    } else if relation
        .negate()
        .is_rejected(context.domain(a), context.domain(b))
    {
        let narrowed = context.domain(result).remove_value(0);
        context.set_domain(result, narrowed)
    } else {
        Ok(())
    }
}
