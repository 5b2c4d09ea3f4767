// File: headless-form/src/verdict.rs
// Purpose: Conversion of validator return values into "error" or "no error"

//! Validator verdicts
//!
//! A validator reports "no error" explicitly. Any return type implementing
//! [`IntoFieldError`] is accepted:
//!
//! - `Option<E>`: `None` is no error, `Some(e)` is the error payload
//! - `Result<(), E>`: matches the `fn(&str) -> Result<(), String>` shape of
//!   plain validation functions
//! - [`Truthy<T>`]: the loose "falsy means no error" rule, opt-in only
//!
//! ```
//! use headless_form::{FieldDescriptor, IntoFieldError, Truthy};
//!
//! let _name = FieldDescriptor::<String, String, String>::new(String::new())
//!     .validator(|value, _| value.is_empty().then(|| "Name cannot be empty".to_string()));
//!
//! assert_eq!(IntoFieldError::<&str>::into_field_error(Truthy("")), None);
//! assert_eq!(IntoFieldError::<&str>::into_field_error(Truthy("oops")), Some("oops"));
//! ```

/// Converts a validator's return value into an optional error payload.
pub trait IntoFieldError<E> {
    fn into_field_error(self) -> Option<E>;
}

impl<E> IntoFieldError<E> for Option<E> {
    fn into_field_error(self) -> Option<E> {
        self
    }
}

impl<E> IntoFieldError<E> for Result<(), E> {
    fn into_field_error(self) -> Option<E> {
        self.err()
    }
}

/// Values with a notion of "falsy".
///
/// Falsy: `false`, numeric zero, NaN, empty text and `None`.
/// Everything else is truthy, including empty structured values.
pub trait Truthiness {
    fn is_truthy(&self) -> bool;
}

impl Truthiness for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthiness for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthiness for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthiness + ?Sized> Truthiness for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthiness> Truthiness for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthiness::is_truthy)
    }
}

macro_rules! impl_truthiness_int {
    ($($t:ty),*) => {
        $(
            impl Truthiness for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthiness_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthiness for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthiness for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

/// Wraps a value so that falsy values count as "no error".
///
/// Note that a deliberate error payload such as `0` or `""` is swallowed by
/// this rule. Prefer `Option` unless the loose behaviour is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truthy<T>(pub T);

impl<T, E> IntoFieldError<E> for Truthy<T>
where
    T: Truthiness + Into<E>,
{
    fn into_field_error(self) -> Option<E> {
        if self.0.is_truthy() {
            Some(self.0.into())
        } else {
            None
        }
    }
}
