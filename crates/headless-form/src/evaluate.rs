// File: headless-form/src/evaluate.rs
// Purpose: The evaluation pass: derive every field, then validate against one shared snapshot

use crate::result::{FieldResult, FormResult};
use crate::state::FormState;
use crate::view::{FieldsView, ViewEntry};
use std::sync::Arc;
use tracing::trace;

/// Evaluate a form state.
///
/// Pure function of the state's raw values and the descriptors its slots
/// reference: no caching, no side effects besides a trace event.
///
/// 1. every field's transformer runs and the `{source, value}` pairs are
///    collected into a [`FieldsView`]
/// 2. every field's validators run, in declaration order, against its
///    derived value and that view
/// 3. errors are kept in order; a field is satisfied when it has none
pub fn evaluate<E: 'static>(state: &FormState<E>) -> FormResult<E> {
    let derived: Vec<_> = state.slots().iter().map(|slot| slot.derive()).collect();

    let entries: Vec<ViewEntry> = derived
        .iter()
        .map(|field| ViewEntry {
            source: field.source(),
            value: field.value(),
        })
        .collect();

    let index = Arc::clone(state.index());
    let view = FieldsView::new(&index, &entries);

    let fields: Vec<FieldResult<E>> = derived
        .iter()
        .zip(entries.iter())
        .enumerate()
        .map(|(position, (field, entry))| FieldResult {
            name: index
                .name(position)
                .cloned()
                .unwrap_or_else(|| Arc::from("")),
            errors: field.validate(&view),
            source: Arc::clone(&entry.source),
            value: Arc::clone(&entry.value),
            raw_type: field.raw_type_name(),
            derived_type: field.derived_type_name(),
        })
        .collect();

    let result = FormResult { index, fields };
    trace!(
        fields = result.len(),
        errors = result.error_count(),
        satisfied = result.satisfied(),
        "evaluated form"
    );
    result
}
