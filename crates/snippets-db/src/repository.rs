use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::Database;
use crate::models::{SnippetRow, SnippetWrite};

/// Snippet persistence. `owner_id` and `created` are written once by
/// `insert`; `update` only ever touches the user-editable columns.
pub trait SnippetRepository {
    /// All snippets, oldest first.
    fn list(&self) -> Result<Vec<SnippetRow>>;

    fn get(&self, id: i64) -> Result<Option<SnippetRow>>;

    fn insert(&self, owner_id: i64, snippet: &SnippetWrite<'_>) -> Result<SnippetRow>;

    /// Returns `None` when no snippet has this id.
    fn update(&self, id: i64, snippet: &SnippetWrite<'_>) -> Result<Option<SnippetRow>>;

    /// Returns whether a row was removed.
    fn delete(&self, id: i64) -> Result<bool>;
}

const SELECT_SNIPPET: &str = "
    SELECT s.id, s.created, s.title, s.code, s.linenos, s.language, s.style,
           s.owner_id, u.username, s.highlighted
    FROM snippets s
    JOIN users u ON s.owner_id = u.id";

impl SnippetRepository for Database {
    fn list(&self) -> Result<Vec<SnippetRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_SNIPPET} ORDER BY s.created, s.id"))?;
            let rows = stmt
                .query_map([], snippet_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn get(&self, id: i64) -> Result<Option<SnippetRow>> {
        self.with_conn(|conn| query_snippet(conn, id))
    }

    fn insert(&self, owner_id: i64, snippet: &SnippetWrite<'_>) -> Result<SnippetRow> {
        let created = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
        let fields = snippet.fields;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO snippets (created, title, code, linenos, language, style, owner_id, highlighted)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    created,
                    fields.title,
                    fields.code,
                    fields.linenos,
                    fields.language,
                    fields.style,
                    owner_id,
                    snippet.highlighted,
                ],
            )?;

            let id = conn.last_insert_rowid();
            query_snippet(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Snippet {} vanished after insert", id))
        })
    }

    fn update(&self, id: i64, snippet: &SnippetWrite<'_>) -> Result<Option<SnippetRow>> {
        let fields = snippet.fields;

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE snippets
                 SET title = ?2, code = ?3, linenos = ?4, language = ?5, style = ?6, highlighted = ?7
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    fields.title,
                    fields.code,
                    fields.linenos,
                    fields.language,
                    fields.style,
                    snippet.highlighted,
                ],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_snippet(conn, id)
        })
    }

    fn delete(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM snippets WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

fn query_snippet(conn: &Connection, id: i64) -> Result<Option<SnippetRow>> {
    let mut stmt = conn.prepare(&format!("{SELECT_SNIPPET} WHERE s.id = ?1"))?;
    let row = stmt.query_row([id], snippet_from_row).optional()?;
    Ok(row)
}

fn snippet_from_row(row: &Row<'_>) -> rusqlite::Result<SnippetRow> {
    Ok(SnippetRow {
        id: row.get(0)?,
        created: row.get(1)?,
        title: row.get(2)?,
        code: row.get(3)?,
        linenos: row.get(4)?,
        language: row.get(5)?,
        style: row.get(6)?,
        owner_id: row.get(7)?,
        owner_username: row.get(8)?,
        highlighted: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snippets_types::models::SnippetFields;

    fn fields(code: &str) -> SnippetFields {
        SnippetFields {
            code: code.to_string(),
            ..SnippetFields::default()
        }
    }

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let owner = db.create_user("alice", "hash").unwrap();
        (db, owner)
    }

    #[test]
    fn insert_assigns_id_owner_and_created() {
        let (db, owner) = setup();
        let f = fields("print('hi')");

        let row = db
            .insert(owner, &SnippetWrite { fields: &f, highlighted: "<pre></pre>" })
            .unwrap();

        assert!(row.id > 0);
        assert_eq!(row.owner_id, owner);
        assert_eq!(row.owner_username, "alice");
        assert_eq!(row.fields(), f);
        assert_eq!(row.highlighted, "<pre></pre>");
        assert!(chrono::DateTime::parse_from_rfc3339(&row.created).is_ok());

        assert_eq!(db.get(row.id).unwrap(), Some(row));
    }

    #[test]
    fn insert_with_unknown_owner_fails() {
        let (db, owner) = setup();
        let f = fields("x");
        assert!(db.insert(owner + 42, &SnippetWrite { fields: &f, highlighted: "" }).is_err());
        assert!(db.list().unwrap().is_empty());
    }

    #[test]
    fn update_keeps_owner_and_created() {
        let (db, owner) = setup();
        let original = db
            .insert(owner, &SnippetWrite { fields: &fields("a = 1"), highlighted: "old" })
            .unwrap();

        let changed = SnippetFields {
            title: "renamed".into(),
            code: "a = 2".into(),
            linenos: true,
            language: "rust".into(),
            style: "monokai".into(),
        };
        let updated = db
            .update(original.id, &SnippetWrite { fields: &changed, highlighted: "new" })
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created, original.created);
        assert_eq!(updated.owner_id, original.owner_id);
        assert_eq!(updated.fields(), changed);
        assert_eq!(updated.highlighted, "new");
    }

    #[test]
    fn update_missing_returns_none() {
        let (db, _) = setup();
        let f = fields("x");
        assert!(db.update(7, &SnippetWrite { fields: &f, highlighted: "" }).unwrap().is_none());
    }

    #[test]
    fn delete_is_hard_and_reports_misses() {
        let (db, owner) = setup();
        let row = db
            .insert(owner, &SnippetWrite { fields: &fields("x"), highlighted: "" })
            .unwrap();

        assert!(db.delete(row.id).unwrap());
        assert!(db.get(row.id).unwrap().is_none());
        assert!(!db.delete(row.id).unwrap());
    }

    #[test]
    fn list_is_ordered_by_creation_and_feeds_user_lists() {
        let (db, alice) = setup();
        let bob = db.create_user("bob", "hash").unwrap();

        let first = db.insert(alice, &SnippetWrite { fields: &fields("1"), highlighted: "" }).unwrap();
        let second = db.insert(bob, &SnippetWrite { fields: &fields("2"), highlighted: "" }).unwrap();
        let third = db.insert(alice, &SnippetWrite { fields: &fields("3"), highlighted: "" }).unwrap();

        let ids: Vec<i64> = db.list().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);

        let users = db.list_users().unwrap();
        assert_eq!(users[0].snippet_ids, vec![first.id, third.id]);
        assert_eq!(users[1].snippet_ids, vec![second.id]);

        db.delete(first.id).unwrap();
        let alice_now = db.get_user_with_snippets(alice).unwrap().unwrap();
        assert_eq!(alice_now.snippet_ids, vec![third.id]);
    }
}
