//! End-to-end behaviour of the form engine
//!
//! Covers:
//! 1. Aggregate satisfaction equals the conjunction of field satisfaction
//! 2. `satisfies` over subsets, including unknown names
//! 3. Reset restores defaults and is idempotent
//! 4. Cross-field validators read values from the same pass
//! 5. Error ordering follows validator declaration order

use headless_form::{FieldDescriptor, FieldKey, Form, FormBuilder, FormError, FormResult, Truthy};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Passwords {
    form: Form<&'static str>,
    password: FieldKey<String>,
    again: FieldKey<String>,
}

fn passwords() -> Passwords {
    let mut builder = FormBuilder::<&'static str>::new();
    let password = builder
        .field(
            "password",
            FieldDescriptor::new(String::new()).validator(|v: &String, _| v.is_empty().then_some("empty")),
        )
        .unwrap();
    let sibling = password.clone();
    let again = builder
        .field(
            "password_again",
            FieldDescriptor::new(String::new())
                .validator(move |v: &String, all| (all.value(&sibling) != Some(v)).then_some("mismatch")),
        )
        .unwrap();

    Passwords {
        form: Form::new(Arc::new(builder.build())),
        password,
        again,
    }
}

fn conjunction(result: &FormResult<&'static str>) -> bool {
    result.fields().iter().all(|field| field.satisfied())
}

#[test]
fn test_matching_passwords_satisfy_the_form() {
    let Passwords { mut form, password, again } = passwords();

    form.set(&password, "abc12345".to_string()).unwrap();
    form.set(&again, "abc12345".to_string()).unwrap();

    let result = form.result();
    assert!(result.field(&password).unwrap().errors().is_empty());
    assert!(result.field(&again).unwrap().errors().is_empty());
    assert!(result.satisfied());
}

#[test]
fn test_mismatched_password_reports_mismatch() {
    let Passwords { mut form, password, again } = passwords();

    form.set(&password, "abc12345".to_string()).unwrap();
    form.set(&again, "xyz".to_string()).unwrap();

    let result = form.result();
    assert_eq!(result.field(&again).unwrap().errors(), ["mismatch"]);
    assert!(!result.satisfied());
}

#[test]
fn test_defaults_are_evaluated_on_first_read() {
    let Passwords { form, password, again } = passwords();

    let result = form.result();
    assert_eq!(result.field(&password).unwrap().errors(), ["empty"]);
    // Both empty: equal, so no mismatch yet
    assert!(result.field(&again).unwrap().satisfied());
}

#[test]
fn test_cross_field_sees_latest_sibling_value() {
    let Passwords { mut form, password, again } = passwords();

    form.set(&again, "second".to_string()).unwrap();
    form.set(&password, "first".to_string()).unwrap();
    assert_eq!(form.result().field(&again).unwrap().errors(), ["mismatch"]);

    form.set(&password, "second".to_string()).unwrap();
    assert!(form.result().field(&again).unwrap().satisfied());
}

#[rstest]
#[case(&[], true)]
#[case(&["password"], false)]
#[case(&["password_again"], true)]
#[case(&["password", "password_again"], false)]
fn test_satisfies_subsets_at_defaults(#[case] names: &[&str], #[case] expected: bool) {
    let Passwords { form, .. } = passwords();
    let result = form.result();

    let by_hand = names
        .iter()
        .all(|name| result.field_by_name(name).unwrap().satisfied());
    assert_eq!(result.satisfies(names.iter().copied()), Ok(expected));
    assert_eq!(by_hand, expected);
}

#[test]
fn test_satisfies_rejects_unknown_field() {
    let Passwords { form, .. } = passwords();
    let result = form.result();

    assert_eq!(
        result.satisfies(["password", "email"]),
        Err(FormError::UnknownField("email".to_string()))
    );
    assert!(result.field_by_name("email").is_err());
}

#[test]
fn test_satisfied_tracks_conjunction_through_edits() {
    let Passwords { mut form, password, again } = passwords();
    let edits = [
        (&password, "a"),
        (&again, "a"),
        (&password, ""),
        (&again, ""),
        (&password, "hunter22"),
        (&again, "hunter2"),
        (&again, "hunter22"),
    ];

    for (key, value) in edits {
        form.set(key, value.to_string()).unwrap();
        let result = form.result();
        assert_eq!(result.satisfied(), conjunction(&result));
    }
    assert!(form.result().satisfied());
}

#[test]
fn test_set_round_trips_source_value() {
    let Passwords { mut form, password, .. } = passwords();

    form.set(&password, "  spaced  ".to_string()).unwrap();
    let result = form.result();
    assert_eq!(result.field(&password).unwrap().source_value(), "  spaced  ");
    assert_eq!(
        result.field_by_name("password").unwrap().source_value::<String>().unwrap(),
        "  spaced  "
    );
}

#[test]
fn test_reset_restores_defaults_and_is_idempotent() {
    let Passwords { mut form, password, again } = passwords();

    form.set(&password, "abc12345".to_string()).unwrap();
    form.set(&again, "nope".to_string()).unwrap();

    form.reset_fields();
    let once: Vec<(String, Vec<&str>)> = snapshot(&form.result());
    form.reset_fields();
    let twice = snapshot(&form.result());

    assert_eq!(once, twice);
    assert_eq!(
        once,
        vec![
            (String::new(), vec!["empty"]),
            (String::new(), vec![]),
        ]
    );
}

fn snapshot(result: &FormResult<&'static str>) -> Vec<(String, Vec<&'static str>)> {
    result
        .fields()
        .iter()
        .map(|field| (field.source_value::<String>().unwrap().clone(), field.errors().to_vec()))
        .collect()
}

#[test]
fn test_transformer_changes_derived_type() {
    let mut builder = FormBuilder::<String>::new();
    let age = builder
        .field(
            "age",
            FieldDescriptor::with_transformer("18".to_string(), |raw: &String| raw.trim().parse::<u32>().ok())
                .validator(|age: &Option<u32>, _| age.is_none().then(|| "Age must be a number".to_string()))
                .validator(|age: &Option<u32>, _| {
                    age.is_some_and(|a| a < 18).then(|| "Must be an adult".to_string())
                }),
        )
        .unwrap();
    let mut form = Form::new(Arc::new(builder.build()));

    assert_eq!(form.result().field(&age).unwrap().value(), &Some(18));

    form.set(&age, " 12 ".to_string()).unwrap();
    let result = form.result();
    let field = result.field(&age).unwrap();
    assert_eq!(field.source_value(), " 12 ");
    assert_eq!(field.value(), &Some(12));
    assert_eq!(field.errors(), ["Must be an adult".to_string()]);

    form.set(&age, "twelve".to_string()).unwrap();
    assert_eq!(
        form.result().field(&age).unwrap().errors(),
        ["Age must be a number".to_string()]
    );
}

#[test]
fn test_reading_with_wrong_type_is_an_error() {
    let Passwords { form, .. } = passwords();
    let result = form.result();
    let field = result.field_by_name("password").unwrap();

    assert!(matches!(
        field.value::<u32>(),
        Err(FormError::TypeMismatch { expected, found: "u32", .. }) if expected == "alloc::string::String"
    ));
}

#[test]
fn test_validate_exports_error_map() {
    let Passwords { mut form, again, .. } = passwords();
    form.set(&again, "x".to_string()).unwrap();

    let errors = form.result().validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["password"], vec!["empty"]);
    assert_eq!(errors["password_again"], vec!["mismatch"]);
}

#[test]
fn test_truthy_validators_follow_falsy_rules() {
    let mut builder = FormBuilder::<String>::new();
    let code = builder
        .field(
            "code",
            FieldDescriptor::new(String::new())
                .validator(|v: &String, _| Truthy(if v.len() > 3 { "too long" } else { "" })),
        )
        .unwrap();
    let mut form = Form::new(Arc::new(builder.build()));

    assert!(form.result().satisfied());
    form.set(&code, "abcd".to_string()).unwrap();
    assert_eq!(form.result().field(&code).unwrap().errors(), ["too long".to_string()]);
}

#[test]
fn test_forms_share_a_schema_but_not_state() {
    let mut builder = FormBuilder::<String>::new();
    let name = builder.field("name", FieldDescriptor::new(String::new())).unwrap();
    let schema = Arc::new(builder.build());

    let mut first = Form::new(Arc::clone(&schema));
    let second = Form::new(Arc::clone(&schema));
    first.set(&name, "first".to_string()).unwrap();

    assert_eq!(first.result().field(&name).unwrap().source_value(), "first");
    assert_eq!(second.result().field(&name).unwrap().source_value(), "");
}

#[test]
fn test_construction_runs_no_validator() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut builder = FormBuilder::<String>::new();
    builder
        .field(
            "name",
            FieldDescriptor::new(String::new()).validator(move |_: &String, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                None::<String>
            }),
        )
        .unwrap();
    let form = Form::new(Arc::new(builder.build()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    form.result();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "validator blew up")]
fn test_validator_panic_propagates() {
    let mut builder = FormBuilder::<String>::new();
    builder
        .field(
            "name",
            FieldDescriptor::new(String::new()).validator(|_: &String, _| -> Option<String> {
                panic!("validator blew up")
            }),
        )
        .unwrap();
    let form = Form::new(Arc::new(builder.build()));

    form.result();
}

#[test]
fn test_key_from_identical_schema_is_rejected() {
    let build = || {
        let mut builder = FormBuilder::<String>::new();
        let name = builder.field("name", FieldDescriptor::new(String::new())).unwrap();
        (Form::new(Arc::new(builder.build())), name)
    };
    let (mut first, first_name) = build();
    let (_second, second_name) = build();

    assert_ne!(first_name, second_name);
    assert_eq!(
        first.set(&second_name, "intruder".to_string()),
        Err(FormError::UnknownField("name".to_string()))
    );
    assert!(first.result().field(&second_name).is_err());
    assert_eq!(first.result().field(&first_name).unwrap().source_value(), "");
}
