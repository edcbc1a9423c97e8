use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (users, snippets)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                username    TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE snippets (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                created     TEXT NOT NULL,
                title       TEXT NOT NULL DEFAULT '',
                code        TEXT NOT NULL,
                linenos     INTEGER NOT NULL DEFAULT 0,
                language    TEXT NOT NULL DEFAULT 'python',
                style       TEXT NOT NULL DEFAULT 'friendly',
                owner_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                highlighted TEXT NOT NULL
            );

            CREATE INDEX idx_snippets_created ON snippets(created, id);
            CREATE INDEX idx_snippets_owner ON snippets(owner_id, created);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
