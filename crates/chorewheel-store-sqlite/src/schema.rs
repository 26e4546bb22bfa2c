//! SQL schema for the Chorewheel SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `position` preserves the in-memory order; distribution depends on it.
-- Ids are not unique by constraint: the household accepts duplicates.
CREATE TABLE IF NOT EXISTS chores (
    position        INTEGER PRIMARY KEY,
    chore_id        TEXT NOT NULL,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL,
    assigned_to     TEXT NOT NULL,   -- member display name, not a foreign key
    due_date        TEXT NOT NULL,   -- ISO 8601 UTC
    priority        TEXT NOT NULL,   -- 'low' | 'medium' | 'high'
    is_completed    INTEGER NOT NULL,
    category        TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    is_weekly_chore INTEGER NOT NULL DEFAULT 0,
    week_number     INTEGER
);

CREATE TABLE IF NOT EXISTS members (
    position  INTEGER PRIMARY KEY,
    member_id TEXT NOT NULL,
    name      TEXT NOT NULL,
    color     TEXT NOT NULL,
    is_active INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS templates (
    position          INTEGER PRIMARY KEY,
    template_id       TEXT NOT NULL,
    title             TEXT NOT NULL,
    description       TEXT NOT NULL,
    category          TEXT NOT NULL,
    estimated_minutes INTEGER NOT NULL,
    priority          TEXT NOT NULL
);

-- Single row; its presence marks a store that has been saved at least once.
CREATE TABLE IF NOT EXISTS household (
    singleton         INTEGER PRIMARY KEY CHECK (singleton = 1),
    last_distribution TEXT,          -- ISO 8601 UTC or NULL
    saved_at          TEXT NOT NULL
);

PRAGMA user_version = 1;
";
