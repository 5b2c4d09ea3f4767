// File: headless-form/src/slot.rs
// Purpose: Typed per-field storage behind the type-erased form state

use crate::descriptor::FieldDescriptor;
use crate::view::{FieldsView, SharedValue};
use std::any::Any;
use std::sync::Arc;

/// One field's current raw value, tied to its descriptor
pub(crate) trait FieldSlot<E>: Send + Sync {
    /// Replace the raw value. Hands the value back if its type is wrong.
    fn replace(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

    fn derive(&self) -> Box<dyn DerivedSlot<E>>;

    fn raw_type_name(&self) -> &'static str;
}

/// One field after its transformer ran within a pass
pub(crate) trait DerivedSlot<E> {
    fn source(&self) -> SharedValue;

    fn value(&self) -> SharedValue;

    fn validate(&self, view: &FieldsView<'_>) -> Vec<E>;

    fn raw_type_name(&self) -> &'static str;

    fn derived_type_name(&self) -> &'static str;
}

pub(crate) struct TypedSlot<V, TV, E> {
    field: Arc<FieldDescriptor<V, TV, E>>,
    source: Arc<V>,
}

impl<V, TV, E> TypedSlot<V, TV, E> {
    pub(crate) fn new(field: Arc<FieldDescriptor<V, TV, E>>, source: V) -> Self {
        Self {
            field,
            source: Arc::new(source),
        }
    }
}

impl<V, TV, E> FieldSlot<E> for TypedSlot<V, TV, E>
where
    V: Send + Sync + 'static,
    TV: Send + Sync + 'static,
    E: 'static,
{
    fn replace(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = value.downcast::<V>()?;
        self.source = Arc::from(value);
        Ok(())
    }

    fn derive(&self) -> Box<dyn DerivedSlot<E>> {
        Box::new(TypedDerived {
            value: self.field.derive(&self.source),
            source: Arc::clone(&self.source),
            field: Arc::clone(&self.field),
        })
    }

    fn raw_type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }
}

struct TypedDerived<V, TV, E> {
    field: Arc<FieldDescriptor<V, TV, E>>,
    source: Arc<V>,
    value: Arc<TV>,
}

impl<V, TV, E> DerivedSlot<E> for TypedDerived<V, TV, E>
where
    V: Send + Sync + 'static,
    TV: Send + Sync + 'static,
    E: 'static,
{
    fn source(&self) -> SharedValue {
        self.source.clone()
    }

    fn value(&self) -> SharedValue {
        self.value.clone()
    }

    fn validate(&self, view: &FieldsView<'_>) -> Vec<E> {
        self.field.run_validators(&self.value, view)
    }

    fn raw_type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn derived_type_name(&self) -> &'static str {
        std::any::type_name::<TV>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_checks_type() {
        let field = Arc::new(FieldDescriptor::<u32, u32, String>::new(7));
        let mut slot = TypedSlot::new(field, 7);

        assert!(slot.replace(Box::new(9_u32)).is_ok());
        let rejected = slot.replace(Box::new("nine")).unwrap_err();
        assert_eq!(rejected.downcast_ref::<&str>(), Some(&"nine"));

        let derived = slot.derive();
        assert_eq!(derived.source().downcast_ref::<u32>(), Some(&9));
    }
}
