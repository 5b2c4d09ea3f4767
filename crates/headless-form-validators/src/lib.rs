//! Reusable validators for headless-form
//!
//! Plain functions returning `Result<(), String>`, which plug straight into
//! [`FieldDescriptor::validator`](headless_form::FieldDescriptor::validator),
//! plus a builder for cross-field equality.
//!
//! ```
//! use headless_form::{FieldDescriptor, Form, FormBuilder};
//! use headless_form_validators::{matches_field, max_length, min_length};
//! use std::sync::Arc;
//!
//! let mut builder = FormBuilder::<String>::new();
//! let password = builder
//!     .field(
//!         "password",
//!         FieldDescriptor::new(String::new())
//!             .validator(|v: &String, _| min_length(v, 8))
//!             .validator(|v: &String, _| max_length(v, 250)),
//!     )
//!     .unwrap();
//! let again = builder
//!     .field(
//!         "password_again",
//!         FieldDescriptor::new(String::new())
//!             .validator(matches_field(password.clone(), || "Passwords do not match".to_string())),
//!     )
//!     .unwrap();
//!
//! let mut form = Form::new(Arc::new(builder.build()));
//! form.set(&password, "long enough".to_string()).unwrap();
//! form.set(&again, "long enough".to_string()).unwrap();
//! assert!(form.result().satisfied());
//! ```

pub mod field;
pub mod string;

pub use field::*;
pub use string::*;
