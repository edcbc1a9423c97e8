//! Database row types. These map directly to SQLite rows and are kept apart
//! from the wire types in snippets-types.

use snippets_types::models::SnippetFields;

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

/// A user together with the ids of the snippets it owns, oldest first.
pub struct UserWithSnippets {
    pub id: i64,
    pub username: String,
    pub snippet_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnippetRow {
    pub id: i64,
    pub created: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub highlighted: String,
}

impl SnippetRow {
    pub fn fields(&self) -> SnippetFields {
        SnippetFields {
            title: self.title.clone(),
            code: self.code.clone(),
            linenos: self.linenos,
            language: self.language.clone(),
            style: self.style.clone(),
        }
    }
}

/// Everything a save writes: the validated fields plus their HTML rendering.
pub struct SnippetWrite<'a> {
    pub fields: &'a SnippetFields,
    pub highlighted: &'a str,
}
