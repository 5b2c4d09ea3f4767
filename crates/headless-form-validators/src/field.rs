//! Cross-field validators

use headless_form::{FieldKey, FieldsView};

/// Validator asserting the field's derived value equals another field's.
///
/// `error` builds the payload when the values differ or the other field
/// cannot be read.
pub fn matches_field<V, TV, E, F>(
    other: FieldKey<V, TV>,
    error: F,
) -> impl Fn(&TV, &FieldsView<'_>) -> Option<E> + Send + Sync + 'static
where
    V: 'static,
    TV: PartialEq + 'static,
    E: 'static,
    F: Fn() -> E + Send + Sync + 'static,
{
    move |value: &TV, view: &FieldsView<'_>| match view.value(&other) {
        Some(expected) if expected == value => None,
        _ => Some(error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headless_form::{FieldDescriptor, Form, FormBuilder};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_matches_field() {
        let mut builder = FormBuilder::<&'static str>::new();
        let email = builder
            .field(
                "email",
                FieldDescriptor::with_transformer(String::new(), |raw: &String| raw.trim().to_lowercase()),
            )
            .unwrap();
        let confirm = builder
            .field(
                "confirm",
                FieldDescriptor::with_transformer(String::new(), |raw: &String| raw.trim().to_lowercase())
                    .validator(matches_field(email.clone(), || "mismatch")),
            )
            .unwrap();
        let mut form = Form::new(Arc::new(builder.build()));

        form.set(&email, "Ada@Example.com".to_string()).unwrap();
        form.set(&confirm, "ada@example.org".to_string()).unwrap();
        assert_eq!(form.result().field(&confirm).unwrap().errors(), ["mismatch"]);

        // Compared after both transformers ran
        form.set(&confirm, " ada@example.COM ".to_string()).unwrap();
        assert!(form.result().satisfied());
    }

    #[test]
    fn test_matches_field_from_other_schema_fails() {
        let mut other = FormBuilder::<&'static str>::new();
        let foreign = other.field("elsewhere", FieldDescriptor::new(String::new())).unwrap();

        let mut builder = FormBuilder::<&'static str>::new();
        let confirm = builder
            .field(
                "confirm",
                FieldDescriptor::new(String::new()).validator(matches_field(foreign, || "missing")),
            )
            .unwrap();
        let form = Form::new(Arc::new(builder.build()));

        assert_eq!(form.result().field(&confirm).unwrap().errors(), ["missing"]);
    }
}
