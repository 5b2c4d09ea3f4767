// File: headless-form/src/descriptor.rs
// Purpose: Per-field descriptors (default, transformer, validators) and typed field keys

use crate::verdict::IntoFieldError;
use crate::view::FieldsView;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub(crate) type Derive<V, TV> = Box<dyn Fn(&Arc<V>) -> Arc<TV> + Send + Sync>;
pub(crate) type Validator<TV, E> = Box<dyn Fn(&TV, &FieldsView<'_>) -> Option<E> + Send + Sync>;

/// Static description of one field.
///
/// `V` is the raw type (what the caller sets), `TV` the derived type (what
/// validators and readers see after the transformer) and `E` the error payload.
///
/// A descriptor without a transformer can only be built with [`FieldDescriptor::new`],
/// which fixes `TV = V`. [`FieldDescriptor::with_transformer`] is the only way
/// to declare a different derived type.
///
/// ```
/// use headless_form::FieldDescriptor;
///
/// let username = FieldDescriptor::<String, String, String>::with_transformer(
///     String::new(),
///     |raw: &String| raw.trim().to_string(),
/// )
/// .validator(|value, _| {
///     (value.chars().count() < 2).then(|| "Username is too short".to_string())
/// });
///
/// assert!(username.has_transformer());
/// assert_eq!(username.validator_count(), 1);
/// ```
pub struct FieldDescriptor<V, TV = V, E = String> {
    default_value: V,
    derive: Derive<V, TV>,
    has_transformer: bool,
    validators: Vec<Validator<TV, E>>,
}

impl<V, E> FieldDescriptor<V, V, E>
where
    V: Send + Sync + 'static,
{
    /// A field whose derived value is its raw value
    pub fn new(default_value: V) -> Self {
        Self {
            default_value,
            derive: Box::new(|source: &Arc<V>| Arc::clone(source)),
            has_transformer: false,
            validators: Vec::new(),
        }
    }
}

impl<V, TV, E> FieldDescriptor<V, TV, E>
where
    V: Send + Sync + 'static,
    TV: Send + Sync + 'static,
{
    /// A field whose derived value is `transformer(raw)`
    pub fn with_transformer<F>(default_value: V, transformer: F) -> Self
    where
        F: Fn(&V) -> TV + Send + Sync + 'static,
    {
        Self {
            default_value,
            derive: Box::new(move |source: &Arc<V>| Arc::new(transformer(source))),
            has_transformer: true,
            validators: Vec::new(),
        }
    }

    /// Append a validator. Validators run in the order they were added.
    ///
    /// The closure receives the derived value and a view of every field's
    /// raw and derived values from the same evaluation pass.
    pub fn validator<F, R>(mut self, validator: F) -> Self
    where
        F: Fn(&TV, &FieldsView<'_>) -> R + Send + Sync + 'static,
        R: IntoFieldError<E>,
    {
        self.validators
            .push(Box::new(move |value, view| validator(value, view).into_field_error()));
        self
    }

    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    pub fn has_transformer(&self) -> bool {
        self.has_transformer
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    pub(crate) fn derive(&self, source: &Arc<V>) -> Arc<TV> {
        (self.derive)(source)
    }

    /// Run every validator, keeping the errors in declaration order
    pub(crate) fn run_validators(&self, value: &TV, view: &FieldsView<'_>) -> Vec<E> {
        self.validators
            .iter()
            .filter_map(|validator| validator(value, view))
            .collect()
    }
}

impl<V: fmt::Debug, TV, E> fmt::Debug for FieldDescriptor<V, TV, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("default_value", &self.default_value)
            .field("has_transformer", &self.has_transformer)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Typed handle to a registered field.
///
/// Returned by [`FormBuilder::field`](crate::FormBuilder::field). The type
/// parameters record the field's raw and derived types so reads through the
/// key need no annotations. A key only resolves against the schema that
/// issued it, even when another schema declares an identical field.
pub struct FieldKey<V, TV = V> {
    schema: u64,
    name: Arc<str>,
    position: usize,
    _types: PhantomData<fn() -> (V, TV)>,
}

impl<V, TV> FieldKey<V, TV> {
    pub(crate) fn new(schema: u64, name: Arc<str>, position: usize) -> Self {
        Self {
            schema,
            name,
            position,
            _types: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn schema(&self) -> u64 {
        self.schema
    }
}

impl<V, TV> Clone for FieldKey<V, TV> {
    fn clone(&self) -> Self {
        Self::new(self.schema, Arc::clone(&self.name), self.position)
    }
}

impl<V, TV> PartialEq for FieldKey<V, TV> {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.position == other.position && self.name == other.name
    }
}

impl<V, TV> Eq for FieldKey<V, TV> {}

impl<V, TV> fmt::Debug for FieldKey<V, TV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldKey")
            .field("schema", &self.schema)
            .field("name", &self.name)
            .field("position", &self.position)
            .finish()
    }
}

impl<V, TV> fmt::Display for FieldKey<V, TV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<V, TV> AsRef<str> for FieldKey<V, TV> {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
