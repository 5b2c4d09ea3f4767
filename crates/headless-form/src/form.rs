// File: headless-form/src/form.rs
// Purpose: The form handle: owns the state, applies mutations, notifies listeners

use crate::descriptor::FieldKey;
use crate::error::Result;
use crate::evaluate::evaluate;
use crate::result::FormResult;
use crate::schema::FormSchema;
use crate::state::FormState;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

type Listener<E> = Box<dyn Fn(&FormResult<E>) + Send + Sync>;

/// Identifies a listener registered with [`Form::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A live form: a shared schema plus this instance's raw values.
///
/// Reads go through [`Form::result`], which runs a fresh evaluation pass.
/// Every mutation replaces state and, when listeners are registered,
/// evaluates once and hands the new result to each of them.
///
/// ```
/// use headless_form::{FieldDescriptor, Form, FormBuilder};
/// use std::sync::Arc;
///
/// let mut builder = FormBuilder::<String>::new();
/// let name = builder
///     .field(
///         "name",
///         FieldDescriptor::new(String::new())
///             .validator(|v: &String, _| v.is_empty().then(|| "required".to_string())),
///     )
///     .unwrap();
/// let mut form = Form::new(Arc::new(builder.build()));
///
/// assert!(!form.result().satisfied());
/// form.set(&name, "Ada".to_string()).unwrap();
/// assert!(form.result().satisfied());
/// form.reset_fields();
/// assert_eq!(form.result().field(&name).unwrap().source_value(), "");
/// ```
pub struct Form<E> {
    schema: Arc<FormSchema<E>>,
    state: FormState<E>,
    listeners: Vec<(ListenerId, Listener<E>)>,
    next_listener: u64,
}

impl<E: 'static> Form<E> {
    /// New form holding a copy of every default. No validator runs yet.
    pub fn new(schema: Arc<FormSchema<E>>) -> Self {
        let state = schema.initial_state();
        Self {
            schema,
            state,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn schema(&self) -> &Arc<FormSchema<E>> {
        &self.schema
    }

    pub fn state(&self) -> &FormState<E> {
        &self.state
    }

    /// Run an evaluation pass over the current state
    pub fn result(&self) -> FormResult<E> {
        evaluate(&self.state)
    }

    /// Set a field's raw value through its typed key
    pub fn set<V, TV>(&mut self, key: &FieldKey<V, TV>, value: V) -> Result<()>
    where
        V: Any,
    {
        let position = self.schema.index().resolve(key)?;
        self.state.set_at(position, value)?;
        debug!(field = key.name(), "form field set");
        self.notify();
        Ok(())
    }

    /// Set a field's raw value by name; the value's type must match the field's raw type
    pub fn set_by_name<T: Any>(&mut self, name: &str, value: T) -> Result<()> {
        self.state.set(name, value)?;
        debug!(field = name, "form field set");
        self.notify();
        Ok(())
    }

    /// Discard every edit and return to the declared defaults
    pub fn reset_fields(&mut self) {
        self.state = self.schema.initial_state();
        debug!(fields = self.state.len(), "form fields reset");
        self.notify();
    }

    /// Register a listener called with the fresh result after every mutation
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&FormResult<E>) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let result = self.result();
        for (_, listener) in &self.listeners {
            listener(&result);
        }
    }
}

impl<E> std::fmt::Debug for Form<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
