// File: headless-form/src/error.rs
// Purpose: Programmer-facing errors raised by form construction and field lookups

use thiserror::Error;

/// Misuse of a form: bad schema, unknown field, or a value of the wrong type.
///
/// Validation failures are never reported through this type; they are data
/// carried by [`FieldResult::errors`](crate::FieldResult::errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field was registered with an empty name
    #[error("field name cannot be empty")]
    EmptyFieldName,

    /// Two fields were registered under the same name
    #[error("duplicate field: '{0}'")]
    DuplicateField(String),

    /// A name or key that does not belong to this form
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// A value or key whose type differs from the field's declared type
    #[error("type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::UnknownField("email".to_string()).to_string(),
            "unknown field: 'email'"
        );
        assert_eq!(
            FormError::TypeMismatch {
                field: "age".to_string(),
                expected: "u32",
                found: "alloc::string::String",
            }
            .to_string(),
            "type mismatch for field 'age': expected u32, found alloc::string::String"
        );
    }
}
