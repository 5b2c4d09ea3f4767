// File: headless-form/src/view.rs
// Purpose: Read-only snapshot of every field's raw and derived value, handed to validators

use crate::descriptor::FieldKey;
use crate::schema::FieldIndex;
use std::any::Any;
use std::sync::Arc;

pub(crate) type SharedValue = Arc<dyn Any + Send + Sync>;

/// Raw and derived value of one field within an evaluation pass
#[derive(Clone)]
pub(crate) struct ViewEntry {
    pub(crate) source: SharedValue,
    pub(crate) value: SharedValue,
}

/// Cross-field snapshot passed to every validator.
///
/// All entries are derived before the first validator runs, so a validator
/// on one field always sees its siblings' values from the same pass.
///
/// Lookups return `None` for unknown names or mismatched types; validators
/// decide for themselves what a missing sibling means.
#[derive(Clone, Copy)]
pub struct FieldsView<'a> {
    index: &'a FieldIndex,
    entries: &'a [ViewEntry],
}

impl<'a> FieldsView<'a> {
    pub(crate) fn new(index: &'a FieldIndex, entries: &'a [ViewEntry]) -> Self {
        Self { index, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.position(name).is_ok()
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.index.names()
    }

    /// Derived value of the field behind `key`
    pub fn value<V, TV: 'static>(&self, key: &FieldKey<V, TV>) -> Option<&'a TV> {
        let position = self.index.resolve(key).ok()?;
        self.entries.get(position)?.value.downcast_ref::<TV>()
    }

    /// Raw value of the field behind `key`
    pub fn source_value<V: 'static, TV>(&self, key: &FieldKey<V, TV>) -> Option<&'a V> {
        let position = self.index.resolve(key).ok()?;
        self.entries.get(position)?.source.downcast_ref::<V>()
    }

    /// Derived value looked up by name
    pub fn get<T: 'static>(&self, name: &str) -> Option<&'a T> {
        let position = self.index.position(name).ok()?;
        self.entries.get(position)?.value.downcast_ref::<T>()
    }

    /// Raw value looked up by name
    pub fn get_source<T: 'static>(&self, name: &str) -> Option<&'a T> {
        let position = self.index.position(name).ok()?;
        self.entries.get(position)?.source.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for FieldsView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldsView")
            .field("fields", &self.index.names().collect::<Vec<_>>())
            .finish()
    }
}
