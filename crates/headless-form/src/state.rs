// File: headless-form/src/state.rs
// Purpose: Current raw value of every field

use crate::error::{FormError, Result};
use crate::schema::FieldIndex;
use crate::slot::FieldSlot;
use std::any::Any;
use std::sync::Arc;

/// Raw values of a form, one slot per field.
///
/// Created from a schema's defaults ([`FormSchema::initial_state`](crate::FormSchema::initial_state)),
/// replaced one slot at a time by [`FormState::set`] and wholesale on reset.
/// Every slot keeps a reference to its descriptor, so a state can be
/// evaluated on its own.
pub struct FormState<E> {
    index: Arc<FieldIndex>,
    slots: Vec<Box<dyn FieldSlot<E>>>,
}

impl<E: 'static> FormState<E> {
    pub(crate) fn new(index: Arc<FieldIndex>, slots: Vec<Box<dyn FieldSlot<E>>>) -> Self {
        Self { index, slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace one field's raw value, leaving every other field untouched
    pub fn set<T: Any>(&mut self, name: &str, value: T) -> Result<()> {
        let position = self.index.position(name)?;
        self.set_at(position, value)
    }

    pub(crate) fn set_at<T: Any>(&mut self, position: usize, value: T) -> Result<()> {
        let field = self
            .index
            .name(position)
            .map(|name| name.to_string())
            .unwrap_or_default();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or_else(|| FormError::UnknownField(field.clone()))?;

        slot.replace(Box::new(value))
            .map_err(|_| FormError::TypeMismatch {
                field,
                expected: slot.raw_type_name(),
                found: std::any::type_name::<T>(),
            })
    }

    pub(crate) fn index(&self) -> &Arc<FieldIndex> {
        &self.index
    }

    pub(crate) fn slots(&self) -> &[Box<dyn FieldSlot<E>>] {
        &self.slots
    }
}

impl<E> std::fmt::Debug for FormState<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("fields", &self.index.names().collect::<Vec<_>>())
            .finish()
    }
}
