//! Conversion between stored rows and the JSON wire format.
//!
//! Incoming snippet payloads are validated field by field; every problem is
//! collected into [`FieldErrors`] so the client sees all of them at once.
//! Read-only fields (`id`, `owner`, `created`, `url`, `highlight`) and unknown
//! keys in a payload are ignored.

use serde_json::{Map, Value};
use tracing::warn;

use snippets_db::models::{SnippetRow, UserWithSnippets};
use snippets_types::api::{SnippetResponse, UserResponse};
use snippets_types::choices;
use snippets_types::models::{SnippetFields, TITLE_MAX_CHARS};

use crate::error::FieldErrors;
use crate::urls::BaseUrl;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_BOOLEAN: &str = "Must be a valid boolean.";

/// Validate a snippet payload.
///
/// `instance` is the stored snippet for updates; its values fill any field the
/// payload leaves out. With `partial` unset the payload must carry `code`.
pub fn validate_snippet(
    data: &Value,
    instance: Option<&SnippetFields>,
    partial: bool,
) -> Result<SnippetFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(map) = data.as_object() else {
        errors.add(
            "non_field_errors",
            format!("Invalid data. Expected an object, but got {}.", json_type(data)),
        );
        return Err(errors);
    };

    let mut fields = instance.cloned().unwrap_or_default();

    if let Some(title) = string_field(map, "title", &mut errors) {
        if title.chars().count() > TITLE_MAX_CHARS {
            errors.add(
                "title",
                format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
            );
        } else {
            fields.title = title;
        }
    }

    match string_field(map, "code", &mut errors) {
        Some(code) => fields.code = code,
        None if !partial && !map.contains_key("code") => errors.add("code", REQUIRED),
        None => {}
    }

    if let Some(value) = map.get("linenos") {
        match parse_bool(value) {
            Some(linenos) => fields.linenos = linenos,
            None => errors.add("linenos", NOT_A_BOOLEAN),
        }
    }

    if let Some(language) = choice_field(map, "language", choices::is_language, &mut errors) {
        fields.language = language;
    }

    if let Some(style) = choice_field(map, "style", choices::is_style, &mut errors) {
        fields.style = style;
    }

    errors.into_result(fields)
}

fn string_field(map: &Map<String, Value>, name: &str, errors: &mut FieldErrors) -> Option<String> {
    match map.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => {
            errors.add(name, NOT_NULL);
            None
        }
        _ => {
            errors.add(name, NOT_A_STRING);
            None
        }
    }
}

fn choice_field(
    map: &Map<String, Value>,
    name: &str,
    is_member: fn(&str) -> bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = map.get(name)?;
    match value {
        Value::String(s) if is_member(s) => Some(s.clone()),
        Value::String(s) => {
            errors.add(name, format!("\"{s}\" is not a valid choice."));
            None
        }
        Value::Null => {
            errors.add(name, NOT_NULL);
            None
        }
        other => {
            errors.add(name, format!("\"{other}\" is not a valid choice."));
            None
        }
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "on" | "On" | "ON" | "yes" | "Yes" | "YES" | "1" => Some(true),
            "false" | "False" | "FALSE" | "off" | "Off" | "OFF" | "no" | "No" | "NO" | "0" => {
                Some(false)
            }
            _ => None,
        },
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn snippet_response(row: SnippetRow, base: &BaseUrl) -> SnippetResponse {
    let created = chrono::DateTime::parse_from_rfc3339(&row.created)
        .map(|dt| dt.to_utc())
        .unwrap_or_else(|e| {
            warn!("Corrupt created '{}' on snippet {}: {}", row.created, row.id, e);
            chrono::DateTime::default()
        });

    SnippetResponse {
        url: base.snippet(row.id),
        id: row.id,
        highlight: base.snippet_highlight(row.id),
        owner: row.owner_username,
        title: row.title,
        code: row.code,
        linenos: row.linenos,
        language: row.language,
        style: row.style,
        created,
    }
}

pub fn user_response(user: UserWithSnippets, base: &BaseUrl) -> UserResponse {
    UserResponse {
        url: base.user(user.id),
        id: user.id,
        username: user.username,
        snippets: user.snippet_ids,
    }
}
