//! SQLite adapter for EventRepository
//!
//! Single-file store with versioned migrations. The connection sits
//! behind a mutex; every query is a quick single-table operation.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::domain::entities::{Event, EventAction, EventId, NewEvent};
use crate::domain::ports::EventRepository;
use crate::error::DomainError;

const MIGRATION_V1_SQL: &str = r#"
CREATE TABLE events (
    id           TEXT PRIMARY KEY,
    request_id   TEXT NOT NULL,
    author       TEXT NOT NULL,
    action       TEXT NOT NULL,
    from_branch  TEXT NULL,
    to_branch    TEXT NOT NULL,
    timestamp    TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE INDEX events_timestamp_idx ON events (timestamp);
"#;

const MIGRATIONS: &[(i64, &str)] = &[(1, MIGRATION_V1_SQL)];

/// SQLite implementation of EventRepository
pub struct SqliteEventRepository {
    conn: Mutex<Connection>,
}

impl SqliteEventRepository {
    /// Open (or create) the store at the given path and apply pending migrations
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DomainError::Internal(format!(
                        "failed to create event store directory `{}`: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| DomainError::Database(format!("failed to open event store: {}", e)))?;
        Self::init(conn)
    }

    /// In-memory store, used by tests
    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Result<Self, DomainError> {
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            ",
        )
        .map_err(|e| DomainError::Database(format!("failed to configure sqlite: {}", e)))?;

        ensure_migration_table(&conn)?;
        apply_pending_migrations(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Internal("event store mutex poisoned".to_string()))
    }

    #[cfg(test)]
    pub fn schema_version(&self) -> Result<i64, DomainError> {
        let conn = self.lock()?;
        current_schema_version(&conn)
    }
}

fn ensure_migration_table(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| DomainError::Database(format!("failed to ensure schema_migrations: {}", e)))
}

fn current_schema_version(conn: &Connection) -> Result<i64, DomainError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| DomainError::Database(format!("failed to read schema version: {}", e)))
}

fn apply_pending_migrations(conn: &mut Connection) -> Result<(), DomainError> {
    let current_version = current_schema_version(conn)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current_version {
            continue;
        }

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        tx.execute_batch(sql)
            .map_err(|e| DomainError::Database(format!("migration v{} failed: {}", version, e)))?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            params![version],
        )
        .map_err(|e| DomainError::Database(format!("recording v{} failed: {}", version, e)))?;
        tx.commit()
            .map_err(|e| DomainError::Database(format!("commit of v{} failed: {}", version, e)))?;
    }

    Ok(())
}

fn row_to_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    let id_text: String = row.get(0)?;
    let id = Uuid::parse_str(&id_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let action: String = row.get(3)?;

    Ok(Event {
        id: EventId(id),
        request_id: row.get(1)?,
        author: row.get(2)?,
        action: EventAction::from(action.as_str()),
        from_branch: row.get(4)?,
        to_branch: row.get(5)?,
        timestamp: row.get::<_, DateTime<Utc>>(6)?,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
    })
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn insert(&self, event: &NewEvent) -> Result<Event, DomainError> {
        let id = EventId::new();
        let created_at = Utc::now();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO events (id, request_id, author, action, from_branch, to_branch, timestamp, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id.to_string(),
                event.request_id,
                event.author,
                event.action.to_string(),
                event.from_branch,
                event.to_branch,
                event.timestamp,
                created_at,
            ],
        )
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Event {
            id,
            request_id: event.request_id.clone(),
            author: event.author.clone(),
            action: event.action.clone(),
            from_branch: event.from_branch.clone(),
            to_branch: event.to_branch.clone(),
            timestamp: event.timestamp,
            created_at,
        })
    }

    async fn list_all(&self) -> Result<Vec<Event>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, request_id, author, action, from_branch, to_branch, timestamp, created_at
                 FROM events ORDER BY rowid",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_event)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::TimeZone;

    use super::*;

    fn unique_temp_db_path(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();

        std::env::temp_dir().join(format!("gitfeed-{prefix}-{nanos}.db"))
    }

    fn cleanup_sqlite_files(path: &PathBuf) {
        let path_str = path.display().to_string();
        let wal = format!("{path_str}-wal");
        let shm = format!("{path_str}-shm");

        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(wal);
        let _ = std::fs::remove_file(shm);
    }

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let repo = SqliteEventRepository::in_memory().expect("store should open");
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 13, 5, 0).unwrap();

        let push = repo
            .insert(&NewEvent::push(
                "abc123".to_string(),
                "octocat".to_string(),
                "main".to_string(),
                ts,
            ))
            .await
            .expect("insert should succeed");

        repo.insert(&NewEvent::merge(
            "42".to_string(),
            "hubot".to_string(),
            "feature".to_string(),
            "main".to_string(),
            ts,
        ))
        .await
        .expect("insert should succeed");

        let events = repo.list_all().await.expect("list should succeed");
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].id, push.id);
        assert_eq!(events[0].request_id, "abc123");
        assert_eq!(events[0].author, "octocat");
        assert_eq!(events[0].action, EventAction::Push);
        assert_eq!(events[0].from_branch, None);
        assert_eq!(events[0].to_branch, "main");
        assert_eq!(events[0].timestamp, ts);

        assert_eq!(events[1].action, EventAction::Merge);
        assert_eq!(events[1].from_branch.as_deref(), Some("feature"));
    }

    #[tokio::test]
    async fn unknown_action_survives_round_trip() {
        let repo = SqliteEventRepository::in_memory().expect("store should open");

        repo.insert(&NewEvent {
            request_id: "test123".to_string(),
            author: "system".to_string(),
            action: EventAction::Other("TEST".to_string()),
            from_branch: None,
            to_branch: "main".to_string(),
            timestamp: Utc::now(),
        })
        .await
        .expect("insert should succeed");

        let events = repo.list_all().await.expect("list should succeed");
        assert_eq!(events[0].action, EventAction::Other("TEST".to_string()));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = SqliteEventRepository::in_memory().expect("store should open");
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        // Insert with descending timestamps; listing must still follow insertion order
        for i in (0..3).rev() {
            repo.insert(&NewEvent::push(
                format!("sha-{}", i),
                "octocat".to_string(),
                "main".to_string(),
                base + chrono::Duration::minutes(i),
            ))
            .await
            .expect("insert should succeed");
        }

        let events = repo.list_all().await.expect("list should succeed");
        let ids: Vec<_> = events.iter().map(|e| e.request_id.as_str()).collect();
        assert_eq!(ids, ["sha-2", "sha-1", "sha-0"]);
    }

    #[tokio::test]
    async fn opening_twice_is_idempotent_for_migrations() {
        let db_path = unique_temp_db_path("events-idempotent");
        {
            let first = SqliteEventRepository::open(&db_path).expect("first open should succeed");
            assert_eq!(first.schema_version().expect("version readable"), 1);
            first
                .insert(&NewEvent::push(
                    "abc".to_string(),
                    "octocat".to_string(),
                    "main".to_string(),
                    Utc::now(),
                ))
                .await
                .expect("insert should succeed");
        }

        let second = SqliteEventRepository::open(&db_path).expect("second open should succeed");
        assert_eq!(second.schema_version().expect("version readable"), 1);

        let events = second.list_all().await.expect("list should succeed");
        assert_eq!(events.len(), 1, "reopen must not wipe stored events");

        drop(second);
        cleanup_sqlite_files(&db_path);
    }
}
