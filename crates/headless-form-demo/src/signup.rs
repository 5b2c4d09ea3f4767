// File: src/signup.rs
// Purpose: The signup form: field descriptors, typed keys, and a render-ready snapshot

use crate::config::FormConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use headless_form::{FieldDescriptor, FieldKey, Form, FormBuilder, FormResult, FormSchema, TypedField};
use headless_form_validators::{length_between, matches_field, max_length, min_length};
use maud::{html, Markup};
use std::sync::Arc;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const PASSWORD_AGAIN: &str = "password_again";
pub const STARTING_DATE: &str = "starting_date";

/// Fields that must be satisfied before leaving the first step
pub const ACCOUNT_FIELDS: [&str; 3] = [USERNAME, PASSWORD, PASSWORD_AGAIN];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Plain-text error payload
fn text(message: impl Into<String>) -> Markup {
    html! { (message.into()) }
}

pub struct SignupKeys {
    pub username: FieldKey<String>,
    pub password: FieldKey<String>,
    pub password_again: FieldKey<String>,
    pub starting_date: FieldKey<String, Option<NaiveDate>>,
}

/// Shared signup schema; each visitor gets a [`Form`] built from it
pub struct Signup {
    schema: Arc<FormSchema<Markup>>,
    keys: SignupKeys,
}

impl Signup {
    pub fn build(config: &FormConfig, today: NaiveDate) -> Result<Self> {
        let default_date = match &config.default_start_date {
            Some(date) => NaiveDate::parse_from_str(date, DATE_FORMAT)
                .with_context(|| format!("Invalid default_start_date: {:?}", date))?,
            None => today,
        };

        let mut builder = FormBuilder::<Markup>::new();
        let (user_min, user_max) = (config.username_min, config.username_max);
        let (pass_min, pass_max) = (config.password_min, config.password_max);

        let username = builder.field(
            USERNAME,
            FieldDescriptor::with_transformer(String::new(), |raw: &String| raw.trim().to_string())
                .validator(move |value: &String, _| {
                    length_between(value, user_min, user_max).map_err(|_| {
                        text(format!("Username must be between {}-{} characters.", user_min, user_max))
                    })
                }),
        )?;

        let password = builder.field(
            PASSWORD,
            FieldDescriptor::new(String::new())
                .validator(|value: &String, _| {
                    value
                        .is_empty()
                        .then(|| html! { span class="bg-red-500" { "Password cannot be empty." } })
                })
                .validator(move |value: &String, _| {
                    min_length(value, pass_min).map_err(|_| {
                        text(format!("Password needs to be at least {} characters long.", pass_min))
                    })
                })
                .validator(move |value: &String, _| {
                    max_length(value, pass_max)
                        .map_err(|_| text(format!("Password cannot be more than {} characters.", pass_max)))
                }),
        )?;

        let password_again = builder.field(
            PASSWORD_AGAIN,
            FieldDescriptor::new(String::new())
                .validator(|value: &String, _| value.is_empty().then(|| text("Password cannot be empty")))
                .validator(matches_field(password.clone(), || text("Passwords do not match"))),
        )?;

        let starting_date = builder.field(
            STARTING_DATE,
            FieldDescriptor::with_transformer(
                default_date.format(DATE_FORMAT).to_string(),
                |raw: &String| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok(),
            )
            .validator(|date: &Option<NaiveDate>, _| date.is_none().then(|| text("Choose a valid starting date."))),
        )?;

        Ok(Self {
            schema: Arc::new(builder.build()),
            keys: SignupKeys {
                username,
                password,
                password_again,
                starting_date,
            },
        })
    }

    pub fn keys(&self) -> &SignupKeys {
        &self.keys
    }

    pub fn new_form(&self) -> Form<Markup> {
        Form::new(Arc::clone(&self.schema))
    }

    /// Extract everything the views need from one evaluation pass
    pub fn snapshot(&self, result: &FormResult<Markup>) -> headless_form::Result<SignupSnapshot> {
        let username = result.field(&self.keys.username)?;
        let password = result.field(&self.keys.password)?;
        let password_again = result.field(&self.keys.password_again)?;
        let starting_date = result.field(&self.keys.starting_date)?;

        Ok(SignupSnapshot {
            username_value: username.value().clone(),
            password_value: password.value().clone(),
            start: *starting_date.value(),
            username: FieldSnapshot::capture(&username),
            password: FieldSnapshot::capture(&password),
            password_again: FieldSnapshot::capture(&password_again),
            starting_date: FieldSnapshot::capture(&starting_date),
            account_ready: result.satisfies(ACCOUNT_FIELDS)?,
            satisfied: result.satisfied(),
        })
    }
}

/// Raw input and errors of one text field
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    pub name: String,
    pub source: String,
    pub errors: Vec<Markup>,
}

impl FieldSnapshot {
    fn capture<TV>(field: &TypedField<'_, String, TV, Markup>) -> Self {
        Self {
            name: field.name().to_string(),
            source: field.source_value().clone(),
            errors: field.errors().to_vec(),
        }
    }

    pub fn satisfied(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors rendered to HTML strings
    pub fn error_html(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.0.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SignupSnapshot {
    pub username: FieldSnapshot,
    pub password: FieldSnapshot,
    pub password_again: FieldSnapshot,
    pub starting_date: FieldSnapshot,
    /// Trimmed username
    pub username_value: String,
    pub password_value: String,
    pub start: Option<NaiveDate>,
    /// `satisfies(username, password, password_again)`
    pub account_ready: bool,
    pub satisfied: bool,
}

impl SignupSnapshot {
    pub fn fields(&self) -> [&FieldSnapshot; 4] {
        [
            &self.username,
            &self.password,
            &self.password_again,
            &self.starting_date,
        ]
    }
}
