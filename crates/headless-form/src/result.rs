// File: headless-form/src/result.rs
// Purpose: Output of an evaluation pass: per-field errors and values, aggregate satisfaction

use crate::descriptor::FieldKey;
use crate::error::{FormError, Result};
use crate::schema::FieldIndex;
use crate::view::SharedValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Evaluated state of one field
pub struct FieldResult<E> {
    pub(crate) name: Arc<str>,
    pub(crate) errors: Vec<E>,
    pub(crate) source: SharedValue,
    pub(crate) value: SharedValue,
    pub(crate) raw_type: &'static str,
    pub(crate) derived_type: &'static str,
}

impl<E> FieldResult<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Errors from validators, in declaration order
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    pub fn satisfied(&self) -> bool {
        self.errors.is_empty()
    }

    /// Raw value as last set
    pub fn source_value<V: 'static>(&self) -> Result<&V> {
        self.source
            .downcast_ref::<V>()
            .ok_or_else(|| self.mismatch::<V>(self.raw_type))
    }

    /// Value after the field's transformer
    pub fn value<TV: 'static>(&self) -> Result<&TV> {
        self.value
            .downcast_ref::<TV>()
            .ok_or_else(|| self.mismatch::<TV>(self.derived_type))
    }

    fn mismatch<T>(&self, expected: &'static str) -> FormError {
        FormError::TypeMismatch {
            field: self.name.to_string(),
            expected,
            found: std::any::type_name::<T>(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for FieldResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldResult")
            .field("name", &self.name)
            .field("errors", &self.errors)
            .field("satisfied", &self.satisfied())
            .finish()
    }
}

/// A field result read through its typed key
#[derive(Debug)]
pub struct TypedField<'a, V, TV, E> {
    name: &'a str,
    source: &'a V,
    value: &'a TV,
    errors: &'a [E],
}

impl<'a, V, TV, E> TypedField<'a, V, TV, E> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn source_value(&self) -> &'a V {
        self.source
    }

    pub fn value(&self) -> &'a TV {
        self.value
    }

    pub fn errors(&self) -> &'a [E] {
        self.errors
    }

    pub fn satisfied(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Everything a host needs to render a form after one evaluation pass
pub struct FormResult<E> {
    pub(crate) index: Arc<FieldIndex>,
    pub(crate) fields: Vec<FieldResult<E>>,
}

impl<E> FormResult<E> {
    /// Field results in declaration order
    pub fn fields(&self) -> &[FieldResult<E>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_by_name(&self, name: &str) -> Result<&FieldResult<E>> {
        let position = self.index.position(name)?;
        self.fields
            .get(position)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn field<V: 'static, TV: 'static>(&self, key: &FieldKey<V, TV>) -> Result<TypedField<'_, V, TV, E>> {
        let position = self.index.resolve(key)?;
        let field = self
            .fields
            .get(position)
            .ok_or_else(|| FormError::UnknownField(key.name().to_string()))?;

        Ok(TypedField {
            name: field.name(),
            source: field.source_value::<V>()?,
            value: field.value::<TV>()?,
            errors: field.errors(),
        })
    }

    /// True when no field has errors. Vacuously true for an empty form.
    pub fn satisfied(&self) -> bool {
        self.fields.iter().all(FieldResult::satisfied)
    }

    /// True when every named field is satisfied.
    ///
    /// Every name is checked, so an unknown name is reported even after an
    /// unsatisfied field. The empty selection is satisfied.
    pub fn satisfies<I, N>(&self, names: I) -> Result<bool>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut satisfied = true;
        for name in names {
            satisfied &= self.field_by_name(name.as_ref())?.satisfied();
        }
        Ok(satisfied)
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|field| field.errors.len()).sum()
    }

    /// Errors keyed by field name, only for unsatisfied fields
    pub fn validate(&self) -> std::result::Result<(), HashMap<String, Vec<E>>>
    where
        E: Clone,
    {
        let errors: HashMap<String, Vec<E>> = self
            .fields
            .iter()
            .filter(|field| !field.satisfied())
            .map(|field| (field.name().to_string(), field.errors.clone()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for FormResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormResult")
            .field("fields", &self.fields)
            .field("satisfied", &self.satisfied())
            .finish()
    }
}
