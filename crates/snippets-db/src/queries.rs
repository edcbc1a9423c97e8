use std::collections::HashMap;

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::Database;
use crate::models::{UserRow, UserWithSnippets};

impl Database {
    // -- Users --

    /// Inserts a user and returns its new id.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username = ?1", username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id = ?1", id))
    }

    /// All users ordered by id, each with the ids of the snippets it owns.
    pub fn list_users(&self) -> Result<Vec<UserWithSnippets>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username FROM users ORDER BY id")?;
            let users = stmt
                .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            // One pass over snippets instead of a query per user
            let mut stmt =
                conn.prepare("SELECT owner_id, id FROM snippets ORDER BY created, id")?;
            let mut owned: HashMap<i64, Vec<i64>> = HashMap::new();
            let pairs = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
            for pair in pairs {
                let (owner_id, snippet_id) = pair?;
                owned.entry(owner_id).or_default().push(snippet_id);
            }

            Ok(users
                .into_iter()
                .map(|(id, username)| UserWithSnippets {
                    id,
                    username,
                    snippet_ids: owned.remove(&id).unwrap_or_default(),
                })
                .collect())
        })
    }

    pub fn get_user_with_snippets(&self, id: i64) -> Result<Option<UserWithSnippets>> {
        self.with_conn(|conn| {
            let username: Option<String> = conn
                .query_row("SELECT username FROM users WHERE id = ?1", [id], |row| row.get(0))
                .optional()?;

            let Some(username) = username else {
                return Ok(None);
            };

            let mut stmt =
                conn.prepare("SELECT id FROM snippets WHERE owner_id = ?1 ORDER BY created, id")?;
            let snippet_ids = stmt
                .query_map([id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<i64>, _>>()?;

            Ok(Some(UserWithSnippets {
                id,
                username,
                snippet_ids,
            }))
        })
    }
}

fn query_user<P: rusqlite::ToSql>(conn: &Connection, filter: &str, value: P) -> Result<Option<UserRow>> {
    let sql = format!("SELECT id, username, password, created_at FROM users WHERE {filter}");
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_look_up_user() {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_user("alice", "hash").unwrap();

        let by_name = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.password, "hash");
        assert!(!by_name.created_at.is_empty());

        let by_id = db.get_user_by_id(id).unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(db.get_user_by_username("bob").unwrap().is_none());
        assert!(db.get_user_by_id(id + 1).unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "hash").unwrap();
        assert!(db.create_user("alice", "other").is_err());
    }

    #[test]
    fn users_without_snippets_have_empty_lists() {
        let db = Database::open_in_memory().unwrap();
        let alice = db.create_user("alice", "hash").unwrap();
        db.create_user("bob", "hash").unwrap();

        let users = db.list_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, alice);
        assert!(users.iter().all(|u| u.snippet_ids.is_empty()));

        let one = db.get_user_with_snippets(alice).unwrap().unwrap();
        assert_eq!(one.username, "alice");
        assert!(db.get_user_with_snippets(999).unwrap().is_none());
    }
}
