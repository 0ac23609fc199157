//! Checks an incoming feedback payload field by field.
//!
//! Every failing field is reported, not just the first one, so the client can
//! highlight all of them at once. Server-assigned keys (`id`, `created_at`) and
//! unknown keys are ignored.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::FieldErrors;
use crate::feedback::repo_types::NewFeedback;

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 254;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const BAD_EMAIL: &str = "Enter a valid email address.";
const BAD_INTEGER: &str = "A valid integer is required.";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate(payload: &Value) -> Result<NewFeedback, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(obj) = payload.as_object() else {
        errors.insert(
            "non_field_errors".into(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                kind_of(payload)
            )],
        );
        return Err(errors);
    };

    let name = required_text(obj, "name", NAME_MAX_LEN, &mut errors);
    let email = required_text(obj, "email", EMAIL_MAX_LEN, &mut errors).and_then(|email| {
        if is_valid_email(&email) {
            Some(email)
        } else {
            push(&mut errors, "email", BAD_EMAIL);
            None
        }
    });
    let rating = rating(obj, &mut errors);
    let comments = optional_text(obj, "comments", &mut errors);

    match (name, email, rating, comments) {
        (Some(name), Some(email), Some(rating), Some(comments)) if errors.is_empty() => {
            Ok(NewFeedback {
                name,
                email,
                rating,
                comments,
            })
        }
        _ => Err(errors),
    }
}

fn push(errors: &mut FieldErrors, field: &str, msg: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(msg.into());
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn required_text(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = match obj.get(field) {
        None => {
            push(errors, field, REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            push(errors, field, NOT_NULL);
            return None;
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => {
            push(errors, field, NOT_STRING);
            return None;
        }
    };

    if value.is_empty() {
        push(errors, field, NOT_BLANK);
        return None;
    }
    if value.chars().count() > max_len {
        push(
            errors,
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
        return None;
    }
    Some(value.to_string())
}

fn optional_text(obj: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            push(errors, field, NOT_STRING);
            None
        }
    }
}

fn rating(obj: &Map<String, Value>, errors: &mut FieldErrors) -> Option<i32> {
    let parsed = match obj.get("rating") {
        None => {
            push(errors, "rating", REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            push(errors, "rating", NOT_NULL);
            return None;
        }
        // 5.0 counts as 5; 4.5 does not
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        // form posts send numbers as strings
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let Some(value) = parsed else {
        push(errors, "rating", BAD_INTEGER);
        return None;
    };

    if value < RATING_MIN {
        push(
            errors,
            "rating",
            format!("Ensure this value is greater than or equal to {RATING_MIN}."),
        );
        return None;
    }
    if value > RATING_MAX {
        push(
            errors,
            "rating",
            format!("Ensure this value is less than or equal to {RATING_MAX}."),
        );
        return None;
    }
    // bounded to 1..=5 above
    Some(value as i32)
}
