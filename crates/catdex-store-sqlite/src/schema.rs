//! SQL schema for the catdex SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys deliberately have no `ON DELETE` action: deleting a cat that
/// still has reviews or memberships fails, so the cascade has to be spelled
/// out (see `destroy_cat_cascade`).
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,           -- argon2 PHC string
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

-- AUTOINCREMENT so a deleted cat's id never comes back.
CREATE TABLE IF NOT EXISTS cats (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL CHECK (length(name)  <= 50),
    breed      TEXT NOT NULL CHECK (length(breed) <= 50),
    size       TEXT NOT NULL CHECK (length(size)  <= 50),
    friendly   TEXT NOT NULL,
    coat       TEXT NOT NULL CHECK (length(coat)  <= 50),
    img_url    TEXT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reviews (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    cat_id     INTEGER NOT NULL REFERENCES cats(id),
    user_id    INTEGER NOT NULL REFERENCES users(id),
    body       TEXT NOT NULL,
    rating     INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cat_lists (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL CHECK (length(name) <= 50),
    user_id    INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- A cat in a user's list context.
CREATE TABLE IF NOT EXISTS cats_in_lists (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    cat_id     INTEGER NOT NULL REFERENCES cats(id),
    user_id    INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (cat_id, user_id)
);

CREATE INDEX IF NOT EXISTS cats_user_idx        ON cats(user_id);
CREATE INDEX IF NOT EXISTS reviews_cat_idx      ON reviews(cat_id);
CREATE INDEX IF NOT EXISTS cat_lists_user_idx   ON cat_lists(user_id);
CREATE INDEX IF NOT EXISTS cats_in_lists_user_idx ON cats_in_lists(user_id);

PRAGMA user_version = 1;
";
