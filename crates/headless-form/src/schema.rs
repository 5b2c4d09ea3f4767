// File: headless-form/src/schema.rs
// Purpose: The descriptor mapping of a form and the builder that assembles it

use crate::descriptor::{FieldDescriptor, FieldKey};
use crate::error::{FormError, Result};
use crate::slot::{FieldSlot, TypedSlot};
use crate::state::FormState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

/// Field names in declaration order plus a name -> position lookup
#[derive(Debug, Default)]
pub(crate) struct FieldIndex {
    schema: u64,
    names: Vec<Arc<str>>,
    positions: HashMap<Arc<str>, usize>,
}

impl FieldIndex {
    fn issue() -> Self {
        Self {
            schema: NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed),
            ..Self::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|name| name.as_ref())
    }

    pub(crate) fn name(&self, position: usize) -> Option<&Arc<str>> {
        self.names.get(position)
    }

    pub(crate) fn position(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Position of a key issued by this index's schema
    pub(crate) fn resolve<V, TV>(&self, key: &FieldKey<V, TV>) -> Result<usize> {
        match self.names.get(key.position()) {
            Some(name) if key.schema() == self.schema && name.as_ref() == key.name() => {
                Ok(key.position())
            }
            _ => Err(FormError::UnknownField(key.name().to_string())),
        }
    }

    fn insert(&mut self, name: Arc<str>) -> usize {
        let position = self.names.len();
        self.positions.insert(Arc::clone(&name), position);
        self.names.push(name);
        position
    }
}

/// Type-erased access to a registered descriptor
pub(crate) trait FieldEntry<E>: Send + Sync {
    fn default_slot(&self) -> Box<dyn FieldSlot<E>>;
    fn raw_type_name(&self) -> &'static str;
    fn derived_type_name(&self) -> &'static str;
    fn has_transformer(&self) -> bool;
    fn validator_count(&self) -> usize;
}

impl<V, TV, E> FieldEntry<E> for Arc<FieldDescriptor<V, TV, E>>
where
    V: Clone + Send + Sync + 'static,
    TV: Send + Sync + 'static,
    E: 'static,
{
    fn default_slot(&self) -> Box<dyn FieldSlot<E>> {
        Box::new(TypedSlot::new(
            Arc::clone(self),
            self.default_value().clone(),
        ))
    }

    fn raw_type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn derived_type_name(&self) -> &'static str {
        std::any::type_name::<TV>()
    }

    fn has_transformer(&self) -> bool {
        (**self).has_transformer()
    }

    fn validator_count(&self) -> usize {
        (**self).validator_count()
    }
}

/// Summary of one registered field, for diagnostics and rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub raw_type: &'static str,
    pub derived_type: &'static str,
    pub has_transformer: bool,
    pub validators: usize,
}

/// The immutable descriptor mapping of a form.
///
/// Built once with [`FormBuilder`] and shared (`Arc`) by every
/// [`Form`](crate::Form) created from it. The set of field names never
/// changes after [`FormBuilder::build`].
pub struct FormSchema<E> {
    index: Arc<FieldIndex>,
    fields: Vec<Box<dyn FieldEntry<E>>>,
}

impl<E: 'static> FormSchema<E> {
    pub fn builder() -> FormBuilder<E> {
        FormBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.position(name).is_ok()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.names()
    }

    pub fn field_info(&self) -> Vec<FieldInfo> {
        self.index
            .names()
            .zip(&self.fields)
            .map(|(name, field)| FieldInfo {
                name: name.to_string(),
                raw_type: field.raw_type_name(),
                derived_type: field.derived_type_name(),
                has_transformer: field.has_transformer(),
                validators: field.validator_count(),
            })
            .collect()
    }

    /// Fresh state holding a copy of every field's default value
    pub fn initial_state(&self) -> FormState<E> {
        let slots = self.fields.iter().map(|field| field.default_slot()).collect();
        FormState::new(Arc::clone(&self.index), slots)
    }

    pub(crate) fn index(&self) -> &FieldIndex {
        &self.index
    }
}

impl<E> std::fmt::Debug for FormSchema<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSchema")
            .field("fields", &self.index.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Assembles a [`FormSchema`] one field at a time.
///
/// ```
/// use headless_form::{FieldDescriptor, FormBuilder};
///
/// let mut builder = FormBuilder::<String>::new();
/// let password = builder
///     .field("password", FieldDescriptor::new(String::new()))
///     .unwrap();
/// let again = builder
///     .field(
///         "password_again",
///         FieldDescriptor::new(String::new()).validator(move |value: &String, view| {
///             (view.value(&password) != Some(value)).then(|| "Passwords do not match".to_string())
///         }),
///     )
///     .unwrap();
/// let schema = builder.build();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(again.name(), "password_again");
/// ```
pub struct FormBuilder<E> {
    index: FieldIndex,
    fields: Vec<Box<dyn FieldEntry<E>>>,
}

impl<E: 'static> FormBuilder<E> {
    pub fn new() -> Self {
        Self {
            index: FieldIndex::issue(),
            fields: Vec::new(),
        }
    }

    /// Register a field and get a typed key back.
    ///
    /// Rejects empty and duplicate names.
    pub fn field<V, TV>(
        &mut self,
        name: impl Into<String>,
        descriptor: FieldDescriptor<V, TV, E>,
    ) -> Result<FieldKey<V, TV>>
    where
        V: Clone + Send + Sync + 'static,
        TV: Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(FormError::EmptyFieldName);
        }
        if self.index.position(&name).is_ok() {
            return Err(FormError::DuplicateField(name));
        }

        let name: Arc<str> = Arc::from(name);
        let position = self.index.insert(Arc::clone(&name));
        self.fields.push(Box::new(Arc::new(descriptor)));

        debug!(field = %name, position, "registered form field");
        Ok(FieldKey::new(self.index.schema, name, position))
    }

    pub fn build(self) -> FormSchema<E> {
        debug!(fields = self.fields.len(), "built form schema");
        FormSchema {
            index: Arc::new(self.index),
            fields: self.fields,
        }
    }
}

impl<E: 'static> Default for FormBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
