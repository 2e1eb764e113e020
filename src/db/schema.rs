//! SQL DDL for initializing the queue desk storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `clients`: business accounts, `email` UNIQUE (stored lower-cased)
/// - `queues`: queue metadata owned by one client
/// - `attendees`: the ledger of every queue in one table, keyed by `queue_id`
///
/// `AUTOINCREMENT` on `attendees.id` guarantees ids are never reused, so
/// arrival order is id order even after rows are deleted.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    business_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone_number TEXT NOT NULL,
    password_hash TEXT NOT NULL, -- argon2 PHC string
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS queues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id),
    queue_name TEXT NOT NULL,
    purpose TEXT NOT NULL DEFAULT '',
    instructions TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_queues_client_id ON queues(client_id);

CREATE TABLE IF NOT EXISTS attendees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    queue_id INTEGER NOT NULL REFERENCES queues(id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    account_number TEXT NOT NULL DEFAULT '',
    service_requested TEXT NOT NULL DEFAULT '',
    joined_at TEXT NOT NULL
);

-- Position lookups count rows per queue up to an id.
CREATE INDEX IF NOT EXISTS idx_attendees_queue_id ON attendees(queue_id, id);
"#;
