use serde::{Deserialize, Serialize};

use crate::choices::{DEFAULT_LANGUAGE, DEFAULT_STYLE};

/// The user-editable fields of a snippet, after validation.
///
/// Owner, id and creation time are assigned by the server and never travel
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetFields {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
}

impl Default for SnippetFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            code: String::new(),
            linenos: false,
            language: DEFAULT_LANGUAGE.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

pub const TITLE_MAX_CHARS: usize = 100;
