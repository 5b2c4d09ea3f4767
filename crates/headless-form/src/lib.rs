//! # headless-form
//!
//! Form state without a UI: typed fields with defaults, optional
//! transformers, ordered validators, and aggregate "satisfied" status.
//!
//! ## Quick Start
//!
//! ```rust
//! use headless_form::{FieldDescriptor, Form, FormBuilder};
//! use std::sync::Arc;
//!
//! let mut builder = FormBuilder::<String>::new();
//! let password = builder
//!     .field(
//!         "password",
//!         FieldDescriptor::new(String::new())
//!             .validator(|v: &String, _| v.is_empty().then(|| "empty".to_string())),
//!     )
//!     .unwrap();
//! let password_key = password.clone();
//! let again = builder
//!     .field(
//!         "password_again",
//!         FieldDescriptor::new(String::new()).validator(move |v: &String, all| {
//!             (all.value(&password_key) != Some(v)).then(|| "mismatch".to_string())
//!         }),
//!     )
//!     .unwrap();
//!
//! let mut form = Form::new(Arc::new(builder.build()));
//! form.set(&password, "abc12345".to_string()).unwrap();
//! form.set(&again, "xyz".to_string()).unwrap();
//!
//! let result = form.result();
//! assert_eq!(result.field(&again).unwrap().errors(), ["mismatch".to_string()]);
//! assert!(!result.satisfied());
//! assert_eq!(result.satisfies(["password"]), Ok(true));
//! ```
//!
//! ## Architecture
//!
//! - [`FieldDescriptor`] - default value, transformer, validators for one field
//! - [`FormBuilder`] / [`FormSchema`] - the immutable descriptor mapping, shared by forms
//! - [`FormState`] - raw values; [`evaluate`] turns a state into a [`FormResult`]
//! - [`Form`] - owns a state, applies `set`/`reset_fields`, notifies listeners
//! - [`verdict`] - how validator return values map to "error" / "no error"

pub mod descriptor;
pub mod error;
pub mod evaluate;
pub mod form;
pub mod result;
pub mod schema;
pub mod state;
pub mod verdict;
pub mod view;

mod slot;

pub use descriptor::{FieldDescriptor, FieldKey};
pub use error::{FormError, Result};
pub use evaluate::evaluate;
pub use form::{Form, ListenerId};
pub use result::{FieldResult, FormResult, TypedField};
pub use schema::{FieldInfo, FormBuilder, FormSchema};
pub use state::FormState;
pub use verdict::{IntoFieldError, Truthiness, Truthy};
pub use view::FieldsView;
