//! SQL migration definitions for the published-OKR database.
//!
//! Migrations are applied in order on database open. Each migration has a
//! version number and a batch of SQL statements.

/// A database migration with a version and SQL statements.
pub(crate) struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// All migrations, in ascending version order.
pub(crate) fn all_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Initial schema: published_okrs",
        sql: r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version    INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Approved OKRs, newest id first when listed
CREATE TABLE IF NOT EXISTS published_okrs (
    id               INTEGER PRIMARY KEY,
    theme            TEXT NOT NULL,
    objective        TEXT NOT NULL,
    key_results_json TEXT NOT NULL,
    confidence       TEXT NOT NULL,
    published_at     TEXT NOT NULL
);

INSERT INTO schema_migrations (version) VALUES (1);
"#,
    }]
}
