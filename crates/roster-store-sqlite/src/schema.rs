//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    position    TEXT    NOT NULL DEFAULT '',
    email       TEXT    NOT NULL UNIQUE,
    phone       INTEGER,
    note        TEXT    NOT NULL DEFAULT '',
    is_chief    INTEGER NOT NULL DEFAULT 0,   -- derived; see roster_core::hierarchy
    parent_id   INTEGER REFERENCES employees(id)   -- NULL marks a root
);

CREATE INDEX IF NOT EXISTS employees_parent_idx ON employees(parent_id);

-- Full-text index over names, kept in sync by the triggers below.
CREATE VIRTUAL TABLE IF NOT EXISTS employees_fts USING fts5(
    first_name,
    last_name,
    content = 'employees',
    content_rowid = 'id'
);

CREATE TRIGGER IF NOT EXISTS employees_fts_ai AFTER INSERT ON employees BEGIN
    INSERT INTO employees_fts (rowid, first_name, last_name)
    VALUES (new.id, new.first_name, new.last_name);
END;

CREATE TRIGGER IF NOT EXISTS employees_fts_ad AFTER DELETE ON employees BEGIN
    INSERT INTO employees_fts (employees_fts, rowid, first_name, last_name)
    VALUES ('delete', old.id, old.first_name, old.last_name);
END;

CREATE TRIGGER IF NOT EXISTS employees_fts_au
AFTER UPDATE OF first_name, last_name ON employees BEGIN
    INSERT INTO employees_fts (employees_fts, rowid, first_name, last_name)
    VALUES ('delete', old.id, old.first_name, old.last_name);
    INSERT INTO employees_fts (rowid, first_name, last_name)
    VALUES (new.id, new.first_name, new.last_name);
END;

PRAGMA user_version = 1;
";
